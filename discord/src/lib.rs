//! Terraform provider for Discord application commands.
//!
//! The provider resolves a bot token and base URL, builds the commands API
//! client, and exposes the `discord-application_command` resource that maps
//! the Terraform lifecycle onto Discord's application-commands REST API.

pub mod api;
pub mod provider;
pub mod provider_data;
pub mod resources;

pub use provider::DiscordProvider;
pub use provider_data::DiscordProviderData;

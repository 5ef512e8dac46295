//! Provider data structure passed to resources

use crate::api::{Client, CommandsApi};
use std::sync::Arc;

/// Shared handle every resource in a run receives from the provider. Holds
/// the command API as a trait object so tests can substitute a stub.
#[derive(Clone)]
pub struct DiscordProviderData {
    pub commands: Arc<dyn CommandsApi>,
}

impl DiscordProviderData {
    pub fn new(client: Client) -> Self {
        Self {
            commands: client.commands(),
        }
    }
}

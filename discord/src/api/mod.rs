//! Discord application API client modules

pub mod client;
pub mod commands;
pub mod common;
pub mod config;
pub mod error;
pub mod transport;

pub use client::Client;
pub use commands::CommandsApi;
pub use common::{expect_status, ServiceResponse};
pub use config::{Config, TokenType};
pub use error::ApiError;
pub use transport::Transport;

#[cfg(test)]
mod commands_test;
#[cfg(test)]
mod test_helpers;

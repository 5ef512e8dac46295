//! Discord application API client

use std::sync::Arc;

use super::commands::{CommandService, CommandsApi};
use super::config::Config;

/// Client facade owning one service per API area the provider touches.
#[derive(Clone)]
pub struct Client {
    commands: Arc<CommandService>,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self {
            commands: Arc::new(CommandService::new(config)),
        }
    }

    /// Application command operations
    pub fn commands(&self) -> Arc<dyn CommandsApi> {
        self.commands.clone()
    }
}

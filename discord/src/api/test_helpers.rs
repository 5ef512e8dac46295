//! Test helpers for the Discord API client

use super::commands::CommandService;
use super::config::{Config, TokenType};

pub fn test_config(url: &str) -> Config {
    Config::new(TokenType::Bot, "test-token", url)
}

pub fn test_service(url: &str) -> CommandService {
    CommandService::new(test_config(url))
}

/// A command response body the way Discord returns it.
pub fn command_body(id: &str, application_id: &str, name: &str, description: &str) -> String {
    format!(
        r#"{{"id":"{id}","type":1,"application_id":"{application_id}","name":"{name}","description":"{description}","dm_permission":true,"nsfw":false,"version":"1"}}"#
    )
}

//! Client configuration for the Discord application API

use std::fmt;

/// Base URL used when neither configuration nor environment supplies one.
pub const DEFAULT_BASE_URL: &str = "https://discord.com/api";

/// API version the client pins every request to.
pub const DEFAULT_API_VERSION: &str = "10";

/// The token scheme sent in the Authorization header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Bot,
    Bearer,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Bot => write!(f, "Bot"),
            TokenType::Bearer => write!(f, "Bearer"),
        }
    }
}

/// Connection settings shared by every request the client makes.
#[derive(Debug, Clone)]
pub struct Config {
    pub token_type: TokenType,
    pub token: String,
    pub base_url: String,
    api_version: String,
}

impl Config {
    pub fn new(token_type: TokenType, token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            token_type,
            token: token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// The versioned base every endpoint path is templated onto,
    /// e.g. `https://discord.com/api/v10`.
    pub fn versioned_url(&self) -> String {
        format!("{}/v{}", self.base_url, self.api_version)
    }

    /// Value for the Authorization header: `<token-type> <token>`.
    pub fn auth_header(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }
}

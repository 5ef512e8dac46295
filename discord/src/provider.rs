//! Discord application provider implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::config::{Config, DEFAULT_BASE_URL};
use crate::api::{Client, TokenType};
use crate::provider_data::DiscordProviderData;
use crate::resources::CommandResource;
use tfkit::context::Context;
use tfkit::provider::{
    ConfigureProviderRequest, ConfigureProviderResponse, Provider, ProviderMetadataRequest,
    ProviderMetadataResponse, ProviderSchemaRequest, ProviderSchemaResponse, ResourceFactory,
};
use tfkit::schema::{AttributeBuilder, AttributeType, SchemaBuilder};
use tfkit::types::{AttributePath, Diagnostic};

/// Environment fallback for the provider token.
pub const TOKEN_ENV_VAR: &str = "DISCORD_APPLICATION_TOKEN";
/// Environment fallback for the API base URL.
pub const BASE_URL_ENV_VAR: &str = "DISCORD_APPLICATION_BASE_URL";

#[derive(Default)]
pub struct DiscordProvider;

impl DiscordProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Provider for DiscordProvider {
    fn type_name(&self) -> &str {
        "discord-application"
    }

    async fn metadata(
        &self,
        _ctx: Context,
        _request: ProviderMetadataRequest,
    ) -> ProviderMetadataResponse {
        ProviderMetadataResponse {
            type_name: self.type_name().to_string(),
        }
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: ProviderSchemaRequest,
    ) -> ProviderSchemaResponse {
        let schema = SchemaBuilder::new()
            .description("Interact with Discord's Application API")
            .attribute(
                AttributeBuilder::new("token", AttributeType::String)
                    .description(
                        "Application token used against the Discord Application API. \
                         Falls back to the DISCORD_APPLICATION_TOKEN environment variable.",
                    )
                    .required()
                    .sensitive()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("base_url", AttributeType::String)
                    .description(
                        "Base URL of the Discord API. Falls back to the \
                         DISCORD_APPLICATION_BASE_URL environment variable, then to the \
                         public endpoint.",
                    )
                    .optional()
                    .build(),
            )
            .build();

        ProviderSchemaResponse {
            schema,
            diagnostics: vec![],
        }
    }

    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureProviderRequest,
    ) -> ConfigureProviderResponse {
        let mut diagnostics = vec![];

        // Configuration values win over environment variables.
        let token = request
            .config
            .get_string(&AttributePath::new("token"))
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
            .filter(|t| !t.is_empty());

        let base_url = request
            .config
            .get_string(&AttributePath::new("base_url"))
            .ok()
            .filter(|u| !u.is_empty())
            .or_else(|| std::env::var(BASE_URL_ENV_VAR).ok())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let token = match token {
            Some(token) => token,
            None => {
                diagnostics.push(
                    Diagnostic::error(
                        "Missing Discord API token",
                        format!(
                            "The provider cannot authenticate without a token. Set the 'token' \
                             attribute in the provider configuration or the {} environment \
                             variable.",
                            TOKEN_ENV_VAR
                        ),
                    )
                    .with_attribute(AttributePath::new("token")),
                );
                return ConfigureProviderResponse {
                    provider_data: None,
                    diagnostics,
                };
            }
        };

        tracing::debug!(%base_url, "configuring Discord application client");

        let config = Config::new(TokenType::Bot, token, base_url);
        let client = Client::new(config);

        ConfigureProviderResponse {
            provider_data: Some(Arc::new(DiscordProviderData::new(client))),
            diagnostics,
        }
    }

    fn resources(&self) -> HashMap<String, ResourceFactory> {
        let mut resources: HashMap<String, ResourceFactory> = HashMap::new();
        resources.insert(
            "discord-application_command".to_string(),
            Box::new(|| {
                Box::new(CommandResource::new()) as Box<dyn tfkit::resource::ResourceWithConfigure>
            }),
        );
        resources
    }
}

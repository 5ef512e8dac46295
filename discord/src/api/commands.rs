//! Application command API implementation
//!
//! Endpoints live under `{versioned_url}/applications/{application_id}/commands`.
//! The service reports the raw response status alongside any decoded body;
//! callers decide which statuses an operation accepts.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

use super::common::ServiceResponse;
use super::config::Config;
use super::error::ApiError;
use super::transport::Transport;
use tfkit::context::Context;

fn default_command_type() -> i64 {
    1
}

/// An application command as Discord represents it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Command {
    pub id: String,
    #[serde(rename = "type", default = "default_command_type")]
    pub command_type: i64,
    #[serde(default)]
    pub application_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<HashMap<String, String>>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_localizations: Option<HashMap<String, String>>,
    /// When defining multiple options, required ones must precede optional ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<CommandOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<String>,
    #[serde(default)]
    pub dm_permission: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_permission: Option<bool>,
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOption {
    #[serde(rename = "type")]
    pub option_type: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<HashMap<String, String>>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_localizations: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<CommandOptionChoice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<CommandOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_types: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    /// Must be false when choices are defined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOptionChoice {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<HashMap<String, String>>,
    /// String, integer, or double; strings are capped at 100 characters.
    pub value: serde_json::Value,
}

/// Request body for POST /applications/{application_id}/commands
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCommand {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<HashMap<String, String>>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_localizations: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<CommandOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<String>,
    pub dm_permission: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_permission: Option<bool>,
    /// Defaults to 1 (chat input) on the remote side when omitted.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub command_type: Option<i64>,
    pub nsfw: bool,
}

/// Request body for PATCH /applications/{application_id}/commands/{command_id};
/// absent fields are left untouched by the remote service.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatchCommand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_localizations: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<CommandOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dm_permission: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_permission: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
}

/// The remote command API as a single swappable capability. Production and
/// test implementations both satisfy it, so resources never need a live
/// network to be exercised.
#[async_trait]
pub trait CommandsApi: Send + Sync {
    /// GET /applications/{application_id}/commands
    async fn list(
        &self,
        ctx: &Context,
        application_id: &str,
    ) -> Result<ServiceResponse<Vec<Command>>, ApiError>;

    /// GET /applications/{application_id}/commands/{command_id}
    async fn get(
        &self,
        ctx: &Context,
        application_id: &str,
        command_id: &str,
    ) -> Result<ServiceResponse<Command>, ApiError>;

    /// POST /applications/{application_id}/commands
    async fn create(
        &self,
        ctx: &Context,
        application_id: &str,
        request: &CreateCommand,
    ) -> Result<ServiceResponse<Command>, ApiError>;

    /// PATCH /applications/{application_id}/commands/{command_id}
    async fn patch(
        &self,
        ctx: &Context,
        application_id: &str,
        command_id: &str,
        request: &PatchCommand,
    ) -> Result<ServiceResponse<Command>, ApiError>;

    /// DELETE /applications/{application_id}/commands/{command_id}
    async fn delete(
        &self,
        ctx: &Context,
        application_id: &str,
        command_id: &str,
    ) -> Result<StatusCode, ApiError>;
}

/// Production implementation backed by the single-shot Transport.
pub struct CommandService {
    config: Config,
    http: reqwest::Client,
}

impl CommandService {
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn commands_url(&self, application_id: &str) -> Result<Url, ApiError> {
        Url::parse(&format!(
            "{}/applications/{}/commands",
            self.config.versioned_url(),
            application_id
        ))
        .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    fn command_url(&self, application_id: &str, command_id: &str) -> Result<Url, ApiError> {
        Url::parse(&format!(
            "{}/applications/{}/commands/{}",
            self.config.versioned_url(),
            application_id,
            command_id
        ))
        .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    /// One fresh transport per call; the transport is single-shot and must
    /// not be shared across in-flight requests.
    async fn dispatch(
        &self,
        ctx: &Context,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, ApiError> {
        let mut transport = Transport::with_client(self.config.clone(), self.http.clone());
        transport.with_request(request);
        transport.execute(ctx).await?;
        transport.take_response().ok_or(ApiError::MissingResponse)
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<ServiceResponse<T>, ApiError> {
        let status = response.status();

        if !status.is_success() {
            return Ok(ServiceResponse {
                status,
                value: None,
            });
        }

        let text = response.text().await?;
        let value = serde_json::from_str(&text).map_err(|e| {
            tracing::error!(%status, "failed to decode response body: {}", e);
            ApiError::Parse(e.to_string())
        })?;

        Ok(ServiceResponse {
            status,
            value: Some(value),
        })
    }
}

#[async_trait]
impl CommandsApi for CommandService {
    async fn list(
        &self,
        ctx: &Context,
        application_id: &str,
    ) -> Result<ServiceResponse<Vec<Command>>, ApiError> {
        let url = self.commands_url(application_id)?;
        let request = self.http.get(url).build()?;

        let response = self.dispatch(ctx, request).await?;
        self.decode(response).await
    }

    async fn get(
        &self,
        ctx: &Context,
        application_id: &str,
        command_id: &str,
    ) -> Result<ServiceResponse<Command>, ApiError> {
        let url = self.command_url(application_id, command_id)?;
        let request = self.http.get(url).build()?;

        let response = self.dispatch(ctx, request).await?;
        self.decode(response).await
    }

    async fn create(
        &self,
        ctx: &Context,
        application_id: &str,
        request: &CreateCommand,
    ) -> Result<ServiceResponse<Command>, ApiError> {
        let url = self.commands_url(application_id)?;
        let body = serde_json::to_vec(request)?;
        let request = self.http.post(url).body(body).build()?;

        let response = self.dispatch(ctx, request).await?;
        self.decode(response).await
    }

    async fn patch(
        &self,
        ctx: &Context,
        application_id: &str,
        command_id: &str,
        request: &PatchCommand,
    ) -> Result<ServiceResponse<Command>, ApiError> {
        let url = self.command_url(application_id, command_id)?;
        let body = serde_json::to_vec(request)?;
        let request = self.http.patch(url).body(body).build()?;

        let response = self.dispatch(ctx, request).await?;
        self.decode(response).await
    }

    async fn delete(
        &self,
        ctx: &Context,
        application_id: &str,
        command_id: &str,
    ) -> Result<StatusCode, ApiError> {
        let url = self.command_url(application_id, command_id)?;
        let request = self.http.delete(url).build()?;

        let response = self.dispatch(ctx, request).await?;
        Ok(response.status())
    }
}

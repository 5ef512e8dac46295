//! Single-shot authenticated request execution
//!
//! A Transport carries at most one in-flight request/response pair: attach a
//! request, execute it, take the response exactly once. It is not safe to
//! share across concurrent calls; the command service builds a fresh one per
//! operation.

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use super::config::Config;
use super::error::ApiError;
use tfkit::context::Context;

pub struct Transport {
    config: Config,
    http: reqwest::Client,
    request: Option<reqwest::Request>,
    response: Option<reqwest::Response>,
}

impl Transport {
    pub fn new(config: Config) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Reuses an existing connection pool instead of building a new client.
    pub fn with_client(config: Config, http: reqwest::Client) -> Self {
        Self {
            config,
            http,
            request: None,
            response: None,
        }
    }

    pub fn with_request(&mut self, request: reqwest::Request) -> &mut Self {
        self.request = Some(request);
        self
    }

    /// Executes the attached request: injects the Authorization and
    /// Content-Type headers, performs exactly one round trip, and stores the
    /// response for `take_response`. Fails if no request is attached or the
    /// context is cancelled mid-flight.
    pub async fn execute(&mut self, ctx: &Context) -> Result<(), ApiError> {
        let mut request = self.request.take().ok_or(ApiError::MissingRequest)?;

        if ctx.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        let auth = HeaderValue::from_str(&self.config.auth_header())
            .map_err(|e| ApiError::InvalidHeader(e.to_string()))?;

        let headers = request.headers_mut();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!(method = %request.method(), url = %request.url(), "dispatching request");

        let mut done = ctx.done();
        let response = tokio::select! {
            _ = done.changed() => return Err(ApiError::Cancelled),
            result = self.http.execute(request) => result?,
        };

        tracing::debug!(status = %response.status(), "received response");

        self.response = Some(response);
        Ok(())
    }

    /// Hands back the response exactly once; subsequent calls without a new
    /// execute yield None.
    pub fn take_response(&mut self) -> Option<reqwest::Response> {
        self.response.take()
    }
}

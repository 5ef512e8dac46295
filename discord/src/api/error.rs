use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("API returned unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("cannot perform request without a request object")]
    MissingRequest,

    #[error("no response available; execute a request first")]
    MissingResponse,

    #[error("operation cancelled")]
    Cancelled,
}

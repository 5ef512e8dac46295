//! Shared types and utilities for the Discord API client

use reqwest::StatusCode;

use super::error::ApiError;

/// Outcome of a single remote call: the status the server answered with and,
/// when the status was a success, the decoded body.
///
/// A non-success status is not an error at this layer; interpreting status
/// codes is the caller's job. `value` is `None` whenever no body was decoded.
#[derive(Debug)]
pub struct ServiceResponse<T> {
    pub status: StatusCode,
    pub value: Option<T>,
}

/// Checks a response status against the set of codes an operation accepts.
pub fn expect_status(status: StatusCode, expected: &[StatusCode]) -> Result<(), ApiError> {
    if expected.contains(&status) {
        return Ok(());
    }

    Err(ApiError::UnexpectedStatus {
        status: status.as_u16(),
        message: status
            .canonical_reason()
            .unwrap_or("unrecognized status")
            .to_string(),
    })
}

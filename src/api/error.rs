//! API client error types

use thiserror::Error;

/// Errors returned by the backend client
///
/// The coordinator does not distinguish between them: any error fails the
/// section that issued the request.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Backend unreachable (connection refused, DNS, offline)
    #[error("Backend unavailable")]
    Unavailable,

    /// Transport timeout
    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a transport error the way the rest of the crate expects
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Unavailable
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Request(err)
        }
    }

    /// Short, user-facing text for inline section errors
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Unavailable => "Server unreachable",
            ApiError::Timeout => "Server did not answer in time",
            ApiError::Decode(_) => "Unexpected response from server",
            ApiError::Status { .. } | ApiError::Request(_) => "Error while loading",
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

//! API client error types.

use thiserror::Error;

/// Errors produced by a signed API request.
///
/// The display strings are what ends up in `api_error` log entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid API response format - missing status code")]
    InvalidResponseFormat,

    #[error("Resource does not exist")]
    ResourceNotFound,

    #[error("Unknown API error")]
    UnknownApiError,

    #[error("API Error: {0}")]
    Api(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

impl ApiError {
    /// Transport-level failures are the only ones worth repeating.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RequestFailed(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

//! Error types for the SendSay API client

use thiserror::Error;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while talking to the SendSay API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connection, timeout)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider returned a non-success status
    #[error("SendSay API error {status}: {message}")]
    Api {
        status: u16,
        /// Provider error id, e.g. "error/auth/failed" (empty if absent)
        code: String,
        /// Provider explanation (empty if absent)
        message: String,
        /// Raw response body for diagnostics
        body: String,
    },

    /// Success status with an unparsable body
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Request could not be serialized to JSON
    #[error("Failed to serialize request: {0}")]
    Serialize(#[from] serde_json::Error),
}

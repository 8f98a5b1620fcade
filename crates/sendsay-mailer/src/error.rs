//! Error types for the mail transport

use sendsay_api::ApiError;
use thiserror::Error;

/// Result type for transport operations
pub type MailerResult<T> = Result<T, MailerError>;

/// Errors that can occur while delivering a message
#[derive(Debug, Error)]
pub enum MailerError {
    /// The provider call failed; never retried or downgraded
    #[error("Send failed: {0}")]
    Send(#[from] ApiError),

    /// The built payload could not be serialized
    #[error("Failed to serialize request: {0}")]
    Serialize(#[from] serde_json::Error),
}

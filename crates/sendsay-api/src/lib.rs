//! SendSay JSON API client
//!
//! Translates a generic outgoing email message into the SendSay
//! `issue.send` request format and posts it to the provider endpoint
//! with one-time credentials. Also builds the `track.get` and
//! `stat.uni` auxiliary requests.

pub mod client;
pub mod error;
pub mod message;
pub mod redact;
pub mod types;

pub use client::{Credentials, SendSayClient, SenderIdentity};
pub use error::{ApiError, ApiResult};
pub use message::{OutgoingAttachment, OutgoingMessage, Recipient};
pub use types::*;

//! SendSay mail transport for host mailer frameworks
//!
//! Wires configuration, the [`sendsay_api`] client and a transport
//! selectable by the `sendsay` scheme. Supports a dry-run mode that
//! reports success without network I/O.

mod config;
mod error;
mod service;
mod transport;

pub use config::{SendSayConfig, DEFAULT_ENDPOINT};
pub use error::{MailerError, MailerResult};
pub use service::MailService;
pub use transport::{SendOutcome, SendSayTransport};

//! The `sendsay` mail transport
//!
//! Delivers an outgoing message through a [`MailService`]: build the
//! `issue.send` payload, post it (or skip the network in dry-run) and
//! hand the serialized outcome to an optional completion callback.

use std::fmt;

use sendsay_api::OutgoingMessage;
use serde_json::Value;
use tracing::debug;

use crate::error::MailerResult;
use crate::service::MailService;

/// Result of a delivery attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Parsed provider response
    Sent(Value),
    /// Dry-run mode: no request was issued
    DryRun,
}

impl SendOutcome {
    /// JSON form of the outcome. Dry-run reports a literal `true`,
    /// matching what a caller checking for success expects.
    pub fn to_value(&self) -> Value {
        match self {
            SendOutcome::Sent(value) => value.clone(),
            SendOutcome::DryRun => Value::Bool(true),
        }
    }
}

type DebugCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Mail transport selectable by the `sendsay` scheme.
///
/// Dry-run is fixed at construction, so two transports in one process
/// can behave differently (test isolation does not rely on any
/// process-wide state).
pub struct SendSayTransport<S> {
    service: S,
    dry_run: bool,
    on_debug: Option<DebugCallback>,
}

impl<S: MailService> SendSayTransport<S> {
    /// Scheme identifier a host mailer registry selects this transport by
    pub const SCHEME: &'static str = "sendsay";

    pub fn new(service: S) -> Self {
        Self {
            service,
            dry_run: false,
            on_debug: None,
        }
    }

    /// Enable or disable dry-run mode
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Install a completion callback receiving the serialized outcome
    /// after each successful delivery
    pub fn on_debug(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_debug = Some(Box::new(callback));
        self
    }

    /// Deliver a message: exactly one provider call, or none in dry-run.
    /// Failures propagate untouched; the callback only runs on success.
    pub async fn deliver(&self, message: &OutgoingMessage) -> MailerResult<SendOutcome> {
        let request = self.service.build_message_payload(message);

        let outcome = if self.dry_run {
            debug!("SendSay: dry-run, skipping delivery of '{}'", message.subject);
            SendOutcome::DryRun
        } else {
            let request = serde_json::to_value(&request)?;
            SendOutcome::Sent(self.service.send(request).await?)
        };

        if let Some(callback) = &self.on_debug {
            callback(&outcome.to_value().to_string());
        }

        Ok(outcome)
    }
}

impl<S> fmt::Display for SendSayTransport<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sendsay")
    }
}

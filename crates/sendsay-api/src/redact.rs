//! Redaction helpers for request logging
//!
//! Log records must never leak credentials, attachment bytes, or (in
//! the info tier) HTML bodies. These helpers work on the serialized
//! request so the same code covers every request shape.

use serde_json::Value;

const ATTACH_PLACEHOLDER: &str = "[base64encoded]";
const HTML_PLACEHOLDER: &str = "[html]";

/// Replace a secret with asterisks of the same length.
/// An empty secret stays empty.
pub fn mask_secret(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}

/// Deep-copy `request` with sensitive fields replaced:
/// `one_time_auth.passwd` and `.sublogin` are masked, every
/// `letter.attaches[*].content` becomes `"[base64encoded]"`, and with
/// `redact_html` the `letter.message.html` body becomes `"[html]"`.
pub fn redact_request(request: &Value, redact_html: bool) -> Value {
    let mut redacted = request.clone();

    if let Some(auth) = redacted.get_mut("one_time_auth").and_then(Value::as_object_mut) {
        for key in ["passwd", "sublogin"] {
            if let Some(mask) = auth.get(key).and_then(Value::as_str).map(mask_secret) {
                auth.insert(key.to_string(), Value::String(mask));
            }
        }
    }

    if let Some(attaches) = redacted
        .pointer_mut("/letter/attaches")
        .and_then(Value::as_array_mut)
    {
        for attach in attaches.iter_mut().filter_map(Value::as_object_mut) {
            if attach.contains_key("content") {
                attach.insert("content".to_string(), Value::String(ATTACH_PLACEHOLDER.into()));
            }
        }
    }

    if redact_html {
        if let Some(message) = redacted
            .pointer_mut("/letter/message")
            .and_then(Value::as_object_mut)
        {
            if message.contains_key("html") {
                message.insert("html".to_string(), Value::String(HTML_PLACEHOLDER.into()));
            }
        }
    }

    redacted
}

//! SendSay API client
//!
//! Builds `issue.send`, `track.get` and `stat.uni` request payloads
//! and posts them to the SendSay JSON endpoint. The account login
//! doubles as the URL path segment, and every request carries the
//! credentials as a nested `one_time_auth` object.

use crate::error::{ApiError, ApiResult};
use crate::message::{OutgoingMessage, METADATA_LABEL_HEADER};
use crate::redact;
use crate::types::{
    Attach, IssueRequest, Letter, LetterMessage, Member, StatFilter, StatRequest, TrackRequest,
    UserEntry,
};
use base64::Engine;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

/// Account credentials injected into every request as `one_time_auth`
#[derive(Debug, Clone)]
pub struct Credentials {
    pub login: String,
    pub password: String,
    pub sub_login: String,
}

impl Credentials {
    /// Create credentials with no sub-login
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            sub_login: String::new(),
        }
    }

    /// Set the sub-login
    pub fn sub_login(mut self, sub_login: impl Into<String>) -> Self {
        self.sub_login = sub_login.into();
        self
    }
}

/// Sender identity placed in `letter.from.*`
#[derive(Debug, Clone, Default)]
pub struct SenderIdentity {
    pub name: String,
    pub address: String,
}

impl SenderIdentity {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Client for the SendSay JSON API.
///
/// Credentials and sender identity are fixed at construction; the
/// client holds no other state, so concurrent sends are safe.
pub struct SendSayClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    sender: SenderIdentity,
}

impl SendSayClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        sender: SenderIdentity,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            credentials,
            sender,
        }
    }

    /// Build the `issue.send` payload for an outgoing message.
    ///
    /// A single-recipient message becomes a "personal" issue whose
    /// campaign name carries the recipient address; anything else is a
    /// "masssending" issue named after the subject. The source message
    /// is never modified.
    pub fn build_message_payload(&self, email: &OutgoingMessage) -> IssueRequest {
        let (name, group) = if email.recipients.len() == 1 {
            let sole = email.recipients[0].address();
            (format!("{}. Email: {}", email.subject, sole), "personal")
        } else {
            (email.subject.clone(), "masssending")
        };

        let engine = base64::engine::general_purpose::STANDARD;
        let attaches = email
            .attachments
            .iter()
            .map(|att| Attach {
                name: att.name.clone(),
                content: engine.encode(&att.data),
                encoding: "base64",
                mime_type: att.mime_type.clone(),
            })
            .collect();

        let users = email
            .recipients
            .iter()
            .map(|recipient| UserEntry {
                member: Member {
                    email: recipient.address().to_string(),
                },
            })
            .collect();

        IssueRequest {
            action: "issue.send",
            label: email
                .header_value(METADATA_LABEL_HEADER)
                .unwrap_or("")
                .to_string(),
            letter: Letter {
                subject: email.subject.clone(),
                from_name: self.sender.name.clone(),
                from_email: self.sender.address.clone(),
                message: LetterMessage {
                    html: email.html_body.clone(),
                    text: email.text_body.clone(),
                },
                attaches,
            },
            name,
            group,
            sendwhen: "now",
            relink: 0,
            users,
        }
    }

    /// Build the `track.get` payload to exchange a track id for an issue id
    pub fn build_track_request(&self, track_id: impl Into<String>) -> TrackRequest {
        TrackRequest {
            action: "track.get",
            id: track_id.into(),
        }
    }

    /// Build the `stat.uni` payload for issue statistics over the last day
    pub fn build_statistics_request(&self, attributes: Vec<String>) -> StatRequest {
        StatRequest {
            action: "stat.uni",
            select: attributes,
            order: vec!["issue.dt".to_string()],
            filter: vec![StatFilter {
                a: "issue.dt".to_string(),
                op: ">=".to_string(),
                v: "current -1 days".to_string(),
            }],
        }
    }

    /// Post a request to `{base_url}/{login}` with `one_time_auth`
    /// merged in. Single attempt, no retry. The request is logged in
    /// redacted form whatever the outcome.
    pub async fn send<T: Serialize>(&self, request: &T) -> ApiResult<Value> {
        let mut body = serde_json::to_value(request)?;
        if let Some(map) = body.as_object_mut() {
            map.insert(
                "one_time_auth".to_string(),
                serde_json::json!({
                    "login": self.credentials.login,
                    "passwd": self.credentials.password,
                    "sublogin": self.credentials.sub_login,
                }),
            );
        }

        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.credentials.login
        );
        let logged = redact::redact_request(&body, false);

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("SendSay: POST {} failed: {} request={}", url, e, logged);
                return Err(ApiError::Request(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            let (code, message) = provider_error(&body_text);
            error!(
                "SendSay: POST {} status={} error_code={} error_message={} body={} request={}",
                url,
                status.as_u16(),
                code,
                message,
                body_text,
                logged
            );
            return Err(ApiError::Api {
                status: status.as_u16(),
                code,
                message,
                body: body_text,
            });
        }

        let json: Value = match response.json().await {
            Ok(json) => json,
            Err(e) => {
                error!("SendSay: POST {} unparsable response: {} request={}", url, e, logged);
                return Err(ApiError::Parse(e.to_string()));
            }
        };

        debug!(
            "SendSay: POST {} status={} request={} response={}",
            url,
            status.as_u16(),
            logged,
            json
        );
        // Info tier additionally hides the HTML body
        let visible = redact::redact_request(&body, true);
        info!(
            "SendSay: POST {} status={} request={} response={}",
            url,
            status.as_u16(),
            visible,
            json
        );

        Ok(json)
    }

    /// Build and send an `issue.send` request for a message
    pub async fn submit_issue(&self, email: &OutgoingMessage) -> ApiResult<Value> {
        let request = self.build_message_payload(email);
        self.send(&request).await
    }

    /// Build and send a `track.get` request
    pub async fn track(&self, track_id: &str) -> ApiResult<Value> {
        let request = self.build_track_request(track_id);
        self.send(&request).await
    }

    /// Build and send a `stat.uni` request
    pub async fn statistics(&self, attributes: Vec<String>) -> ApiResult<Value> {
        let request = self.build_statistics_request(attributes);
        self.send(&request).await
    }
}

/// Pull `errors[0].id` / `errors[0].explain` out of a failed response
/// body, falling back to empty strings when the body is not the usual
/// error document.
fn provider_error(body: &str) -> (String, String) {
    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let first = parsed.get("errors").and_then(|errors| errors.get(0));
    let code = first
        .and_then(|e| e.get("id"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let message = first
        .and_then(|e| e.get("explain"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    (code, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> SendSayClient {
        SendSayClient::new(
            "https://api.sendsay.ru/general/api/v100/json",
            Credentials::new("acme", "secret").sub_login("robot"),
            SenderIdentity::new("Acme", "noreply@acme.io"),
        )
    }

    #[test]
    fn test_single_recipient_payload() {
        let email = OutgoingMessage::new("Hi").to("a@x.com").text("hello");

        let request = client().build_message_payload(&email);

        assert_eq!(request.group, "personal");
        assert_eq!(request.name, "Hi. Email: a@x.com");
        assert_eq!(request.letter.subject, "Hi");
        assert_eq!(request.letter.message.text.as_deref(), Some("hello"));
        assert!(request.letter.message.html.is_none());
        assert_eq!(request.users.len(), 1);
        assert_eq!(request.users[0].member.email, "a@x.com");
    }

    #[test]
    fn test_multiple_recipients_payload() {
        let email = OutgoingMessage::new("News").to("a@x.com").to("b@x.com");

        let request = client().build_message_payload(&email);

        assert_eq!(request.group, "masssending");
        assert_eq!(request.name, "News");
        let emails: Vec<&str> = request
            .users
            .iter()
            .map(|u| u.member.email.as_str())
            .collect();
        assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_named_recipient_uses_bare_address() {
        let email = OutgoingMessage::new("Hi").to_named("a@x.com", "Alice");

        let request = client().build_message_payload(&email);

        assert_eq!(request.name, "Hi. Email: a@x.com");
        assert_eq!(request.users[0].member.email, "a@x.com");
    }

    #[test]
    fn test_label_from_header() {
        let email = OutgoingMessage::new("Hi")
            .to("a@x.com")
            .header("x-metadata-label", "promo-42");
        assert_eq!(client().build_message_payload(&email).label, "promo-42");

        let unlabeled = OutgoingMessage::new("Hi").to("a@x.com");
        assert_eq!(client().build_message_payload(&unlabeled).label, "");
    }

    #[test]
    fn test_absent_bodies_are_omitted_from_wire() {
        let email = OutgoingMessage::new("Hi").to("a@x.com").text("hello");

        let json = serde_json::to_value(client().build_message_payload(&email)).unwrap();

        let message = json["letter"]["message"].as_object().unwrap();
        assert_eq!(message.get("text"), Some(&json!("hello")));
        assert!(!message.contains_key("html"));
    }

    #[test]
    fn test_attachment_content_round_trips_through_base64() {
        let data = vec![0u8, 159, 146, 150];
        let email = OutgoingMessage::new("Hi")
            .to("a@x.com")
            .attachment("blob.bin", "application/octet-stream", data.clone());

        let request = client().build_message_payload(&email);

        let attach = &request.letter.attaches[0];
        assert_eq!(attach.name, "blob.bin");
        assert_eq!(attach.encoding, "base64");
        assert_eq!(attach.mime_type, "application/octet-stream");
        let engine = base64::engine::general_purpose::STANDARD;
        assert_eq!(attach.content, engine.encode(&data));
        assert_eq!(engine.decode(&attach.content).unwrap(), data);
    }

    #[test]
    fn test_attachment_order_is_preserved() {
        let email = OutgoingMessage::new("Hi")
            .to("a@x.com")
            .attachment("first.txt", "text/plain", b"1".to_vec())
            .attachment("second.txt", "text/plain", b"2".to_vec());

        let request = client().build_message_payload(&email);

        let names: Vec<&str> = request
            .letter
            .attaches
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["first.txt", "second.txt"]);
    }

    #[test]
    fn test_wire_format_keys() {
        let email = OutgoingMessage::new("Hi")
            .to("a@x.com")
            .html("<b>hi</b>")
            .attachment("a.pdf", "application/pdf", b"pdf".to_vec());

        let json = serde_json::to_value(client().build_message_payload(&email)).unwrap();

        assert_eq!(json["action"], "issue.send");
        assert_eq!(json["sendwhen"], "now");
        assert_eq!(json["relink"], 0);
        assert_eq!(json["letter"]["from.name"], "Acme");
        assert_eq!(json["letter"]["from.email"], "noreply@acme.io");
        assert_eq!(json["letter"]["attaches"][0]["mime-type"], "application/pdf");
        assert_eq!(json["users.list"][0]["member"]["email"], "a@x.com");
    }

    #[test]
    fn test_build_does_not_mutate_message() {
        let email = OutgoingMessage::new("Hi").to("a@x.com").text("hello");
        let before = format!("{:?}", email);

        let _ = client().build_message_payload(&email);

        assert_eq!(format!("{:?}", email), before);
    }

    #[test]
    fn test_track_request() {
        let json = serde_json::to_value(client().build_track_request("t-1")).unwrap();
        assert_eq!(json, json!({ "action": "track.get", "id": "t-1" }));
    }

    #[test]
    fn test_statistics_request() {
        let attributes = vec!["issue.id".to_string(), "issue.dt".to_string()];

        let json = serde_json::to_value(client().build_statistics_request(attributes)).unwrap();

        assert_eq!(
            json,
            json!({
                "action": "stat.uni",
                "select": ["issue.id", "issue.dt"],
                "order": ["issue.dt"],
                "filter": [{ "a": "issue.dt", "op": ">=", "v": "current -1 days" }]
            })
        );
    }

    #[test]
    fn test_provider_error_extraction() {
        let (code, message) =
            provider_error(r#"{"errors":[{"id":"error/auth/failed","explain":"bad password"}]}"#);
        assert_eq!(code, "error/auth/failed");
        assert_eq!(message, "bad password");

        let (code, message) = provider_error("not json at all");
        assert_eq!(code, "");
        assert_eq!(message, "");
    }
}

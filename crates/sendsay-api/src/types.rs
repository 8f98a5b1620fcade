//! SendSay request payload types
//!
//! Typed forms of the JSON documents the provider accepts. Field names
//! follow the wire format, including the dotted keys (`from.name`,
//! `users.list`) the API uses.

use serde::Serialize;

/// An `issue.send` request: one outbound mail campaign
#[derive(Debug, Clone, Serialize)]
pub struct IssueRequest {
    pub action: &'static str,
    /// Caller-supplied correlation label, empty if unset
    pub label: String,
    pub letter: Letter,
    /// Campaign name shown in provider statistics
    pub name: String,
    /// "personal" for a single recipient, "masssending" otherwise
    pub group: &'static str,
    pub sendwhen: &'static str,
    pub relink: u8,
    #[serde(rename = "users.list")]
    pub users: Vec<UserEntry>,
}

/// The letter body of an `issue.send` request
#[derive(Debug, Clone, Serialize)]
pub struct Letter {
    pub subject: String,
    #[serde(rename = "from.name")]
    pub from_name: String,
    #[serde(rename = "from.email")]
    pub from_email: String,
    pub message: LetterMessage,
    pub attaches: Vec<Attach>,
}

/// Letter content; absent bodies are omitted from the wire entirely
#[derive(Debug, Clone, Serialize)]
pub struct LetterMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A base64-encoded letter attachment
#[derive(Debug, Clone, Serialize)]
pub struct Attach {
    pub name: String,
    pub content: String,
    pub encoding: &'static str,
    #[serde(rename = "mime-type")]
    pub mime_type: String,
}

/// One recipient entry in `users.list`
#[derive(Debug, Clone, Serialize)]
pub struct UserEntry {
    pub member: Member,
}

#[derive(Debug, Clone, Serialize)]
pub struct Member {
    pub email: String,
}

/// A `track.get` request: exchange a track id for an issue id
#[derive(Debug, Clone, Serialize)]
pub struct TrackRequest {
    pub action: &'static str,
    pub id: String,
}

/// A `stat.uni` request: campaign statistics for the last day
#[derive(Debug, Clone, Serialize)]
pub struct StatRequest {
    pub action: &'static str,
    pub select: Vec<String>,
    pub order: Vec<String>,
    pub filter: Vec<StatFilter>,
}

/// One predicate in a `stat.uni` filter
#[derive(Debug, Clone, Serialize)]
pub struct StatFilter {
    pub a: String,
    pub op: String,
    pub v: String,
}

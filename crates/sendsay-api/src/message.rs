//! Generic outgoing email model
//!
//! Provider-agnostic representation of a message to send. The payload
//! builders in [`crate::client`] translate this into SendSay request
//! types; nothing here is SendSay-specific except the label header
//! convention.

/// Custom header carrying the caller-supplied send label, used for
/// later correlation in provider statistics.
pub const METADATA_LABEL_HEADER: &str = "x-metadata-label";

/// A message recipient: either a bare address or an address with a
/// display name. Only the bare address goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// Bare email address
    Address(String),
    /// Address with display name
    Named { address: String, name: String },
}

impl Recipient {
    /// The bare email address for either variant
    pub fn address(&self) -> &str {
        match self {
            Recipient::Address(address) => address,
            Recipient::Named { address, .. } => address,
        }
    }
}

impl From<&str> for Recipient {
    fn from(address: &str) -> Self {
        Recipient::Address(address.to_string())
    }
}

impl From<String> for Recipient {
    fn from(address: String) -> Self {
        Recipient::Address(address)
    }
}

/// An attachment to include in an outgoing message
#[derive(Debug, Clone)]
pub struct OutgoingAttachment {
    /// Filename to display
    pub name: String,
    /// MIME type (e.g., "application/pdf")
    pub mime_type: String,
    /// Raw file data
    pub data: Vec<u8>,
}

/// Email message to send
#[derive(Debug, Clone)]
pub struct OutgoingMessage {
    /// Subject line
    pub subject: String,
    /// Recipients, in order
    pub recipients: Vec<Recipient>,
    /// HTML body
    pub html_body: Option<String>,
    /// Plain text body
    pub text_body: Option<String>,
    /// File attachments, in order
    pub attachments: Vec<OutgoingAttachment>,
    /// Custom headers as (name, value) pairs, in order
    pub headers: Vec<(String, String)>,
}

impl OutgoingMessage {
    /// Create a new message builder
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            recipients: Vec::new(),
            html_body: None,
            text_body: None,
            attachments: Vec::new(),
            headers: Vec::new(),
        }
    }

    /// Add a recipient by bare address
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.recipients.push(Recipient::Address(address.into()));
        self
    }

    /// Add a recipient with a display name
    pub fn to_named(mut self, address: impl Into<String>, name: impl Into<String>) -> Self {
        self.recipients.push(Recipient::Named {
            address: address.into(),
            name: name.into(),
        });
        self
    }

    /// Set the HTML body
    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.html_body = Some(body.into());
        self
    }

    /// Set the plain text body
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.text_body = Some(body.into());
        self
    }

    /// Add an attachment
    pub fn attachment(
        mut self,
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        self.attachments.push(OutgoingAttachment {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        });
        self
    }

    /// Add a custom header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a custom header by name (case-insensitive, first match)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The send label from the `x-metadata-label` header, empty if unset
    pub fn label(&self) -> &str {
        self.header_value(METADATA_LABEL_HEADER).unwrap_or("")
    }
}

//! SendSay transport configuration
//!
//! The one place host configuration is consumed: endpoint, account
//! credentials, sender identity and the dry-run flag.

use sendsay_api::{Credentials, SendSayClient, SenderIdentity};
use serde::{Deserialize, Serialize};

use crate::transport::SendSayTransport;

/// Documented default endpoint of the SendSay JSON API
pub const DEFAULT_ENDPOINT: &str = "https://api.sendsay.ru/general/api/v100/json";

/// SendSay mailer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendSayConfig {
    /// API endpoint base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Account login; also the request path segment
    pub login: String,
    /// Account password
    pub password: String,
    /// Optional sub-login
    #[serde(default)]
    pub sub_login: String,
    /// Sender display name for `letter.from.name`
    #[serde(default)]
    pub from_name: String,
    /// Sender address for `letter.from.email`
    #[serde(default)]
    pub from_address: String,
    /// Skip network I/O and report success
    #[serde(default)]
    pub dry_run: bool,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl SendSayConfig {
    /// Configuration with provider defaults for everything but the account
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            endpoint: default_endpoint(),
            login: login.into(),
            password: password.into(),
            sub_login: String::new(),
            from_name: String::new(),
            from_address: String::new(),
            dry_run: false,
        }
    }

    /// Set the sender identity
    pub fn from_sender(mut self, name: impl Into<String>, address: impl Into<String>) -> Self {
        self.from_name = name.into();
        self.from_address = address.into();
        self
    }

    /// Build the API client this configuration describes
    pub fn into_client(self) -> SendSayClient {
        SendSayClient::new(
            self.endpoint,
            Credentials::new(self.login, self.password).sub_login(self.sub_login),
            SenderIdentity::new(self.from_name, self.from_address),
        )
    }

    /// Build a ready-to-register transport
    pub fn into_transport(self) -> SendSayTransport<SendSayClient> {
        let dry_run = self.dry_run;
        SendSayTransport::new(self.into_client()).dry_run(dry_run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SendSayConfig::new("acme", "secret");

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.sub_login, "");
        assert!(!config.dry_run);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: SendSayConfig =
            serde_json::from_str(r#"{ "login": "acme", "password": "secret" }"#).unwrap();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.login, "acme");
        assert_eq!(config.from_name, "");
        assert!(!config.dry_run);
    }

    #[test]
    fn test_deserialize_full() {
        let config: SendSayConfig = serde_json::from_str(
            r#"{
                "endpoint": "https://api.example.test/json",
                "login": "acme",
                "password": "secret",
                "sub_login": "robot",
                "from_name": "Acme",
                "from_address": "noreply@acme.io",
                "dry_run": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.endpoint, "https://api.example.test/json");
        assert_eq!(config.sub_login, "robot");
        assert!(config.dry_run);
    }
}

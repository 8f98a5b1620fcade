//! Mail service seam
//!
//! The surface a transport needs from a SendSay service: the three
//! request builders plus `send`. [`sendsay_api::SendSayClient`]
//! implements it; tests substitute their own.

use async_trait::async_trait;
use sendsay_api::{ApiResult, IssueRequest, OutgoingMessage, SendSayClient, StatRequest, TrackRequest};
use serde_json::Value;

#[async_trait]
pub trait MailService: Send + Sync {
    /// Build the `issue.send` payload for an outgoing message
    fn build_message_payload(&self, message: &OutgoingMessage) -> IssueRequest;

    /// Build the `track.get` payload for a track id
    fn build_track_request(&self, track_id: &str) -> TrackRequest;

    /// Build the `stat.uni` payload for a set of attributes
    fn build_statistics_request(&self, attributes: Vec<String>) -> StatRequest;

    /// Post a request to the provider
    async fn send(&self, request: Value) -> ApiResult<Value>;
}

#[async_trait]
impl MailService for SendSayClient {
    fn build_message_payload(&self, message: &OutgoingMessage) -> IssueRequest {
        SendSayClient::build_message_payload(self, message)
    }

    fn build_track_request(&self, track_id: &str) -> TrackRequest {
        SendSayClient::build_track_request(self, track_id)
    }

    fn build_statistics_request(&self, attributes: Vec<String>) -> StatRequest {
        SendSayClient::build_statistics_request(self, attributes)
    }

    async fn send(&self, request: Value) -> ApiResult<Value> {
        SendSayClient::send(self, &request).await
    }
}

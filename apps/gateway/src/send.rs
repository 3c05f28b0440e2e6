//! Outbound dispatcher: serializes replies and posts them to the Send API.
//!
//! Delivery is at-most-once; a failed send is logged and counted, never
//! retried, and never affects the webhook's own HTTP response.

use async_trait::async_trait;
use emo_core::{OutboundMessage, SendRequest, SendResponse};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SendError {
    #[error("send api request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("send api returned {status} {message}")]
    Api {
        status: u16,
        message: String,
        platform_error: Option<Value>,
    },
}

/// Result of a successful Send API call. Sender-action calls come back
/// without a message id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    pub recipient_id: Option<String>,
    pub message_id: Option<String>,
}

#[async_trait]
pub trait SendApi: Send + Sync {
    async fn send(
        &self,
        recipient_id: &str,
        message: &OutboundMessage,
    ) -> Result<SendReceipt, SendError>;
}

/// Send API client authenticated with a page access token.
pub struct GraphSendClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl GraphSendClient {
    pub fn new(http: reqwest::Client, api_base: &str, access_token: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: format!("{}/v2.6/me/messages", api_base.trim_end_matches('/')),
            access_token: access_token.into(),
        }
    }
}

#[async_trait]
impl SendApi for GraphSendClient {
    async fn send(
        &self,
        recipient_id: &str,
        message: &OutboundMessage,
    ) -> Result<SendReceipt, SendError> {
        let request = SendRequest::new(recipient_id, message.clone());
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("access_token", self.access_token.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or_default();
            return Err(SendError::Api {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
                platform_error: body.get("error").cloned(),
            });
        }

        let body: SendResponse = response.json().await?;
        Ok(SendReceipt {
            recipient_id: body.recipient_id,
            message_id: body.message_id,
        })
    }
}

/// Sends one reply and reports the outcome through logs and counters.
pub async fn dispatch(send: &dyn SendApi, recipient_id: &str, message: &OutboundMessage) {
    match send.send(recipient_id, message).await {
        Ok(receipt) => {
            metrics::counter!("send_api_calls", "outcome" => "ok").increment(1);
            match receipt.message_id {
                Some(message_id) => tracing::info!(
                    recipient = %recipient_id,
                    message_id = %message_id,
                    "message sent"
                ),
                None => tracing::info!(recipient = %recipient_id, "send api call succeeded"),
            }
        }
        Err(err) => {
            metrics::counter!("send_api_calls", "outcome" => "failed").increment(1);
            tracing::warn!(recipient = %recipient_id, error = %err, "send api call failed");
        }
    }
}

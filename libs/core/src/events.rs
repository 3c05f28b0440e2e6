use serde::Deserialize;
use serde_json::Value;

/// Top-level webhook callback body.
///
/// Page subscriptions arrive with `object == "page"`; anything else is
/// acknowledged and ignored by the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEnvelope {
    pub object: String,
    #[serde(default)]
    pub entry: Vec<PageEntry>,
}

/// One batch unit in a webhook delivery, scoped to a single page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageEntry {
    pub id: String,
    #[serde(default)]
    pub time: Option<i64>,
    /// Raw messaging events. Kept undecoded so one malformed event can be
    /// skipped without dropping the rest of the batch.
    #[serde(default)]
    pub messaging: Vec<Value>,
}

/// One messaging event as delivered by the platform. At most one of the
/// variant fields is populated per event.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagingEvent {
    pub sender: Party,
    pub recipient: Party,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub optin: Option<Optin>,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
    #[serde(default)]
    pub delivery: Option<Delivery>,
    #[serde(default)]
    pub postback: Option<Postback>,
    #[serde(default)]
    pub read: Option<ReadReceipt>,
    #[serde(default)]
    pub account_linking: Option<AccountLinking>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Party {
    pub id: String,
}

/// Authentication callback from the "Send to Messenger" plugin.
#[derive(Debug, Clone, Deserialize)]
pub struct Optin {
    /// Developer-defined pass-through parameter (`data-ref` on the plugin).
    #[serde(rename = "ref")]
    pub data_ref: Option<String>,
}

/// Variant payload of a `message` event.
///
/// Text and attachments are mutually exclusive in practice, though the wire
/// schema does not enforce it. Echo messages (`is_echo`) are the bot's own
/// prior sends reflected back and must never produce a reply.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub mid: Option<String>,
    #[serde(default)]
    pub is_echo: bool,
    pub app_id: Option<i64>,
    pub metadata: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub attachments: Vec<InboundAttachment>,
    pub quick_reply: Option<QuickReplySelection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboundAttachment {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Option<Value>,
}

/// The payload returned when a user taps a quick-reply option.
#[derive(Debug, Clone, Deserialize)]
pub struct QuickReplySelection {
    pub payload: String,
}

/// Delivery confirmation for previously sent messages.
#[derive(Debug, Clone, Deserialize)]
pub struct Delivery {
    #[serde(default)]
    pub mids: Vec<String>,
    pub watermark: Option<i64>,
    pub seq: Option<i64>,
}

/// A button tap returning a developer-defined payload string.
#[derive(Debug, Clone, Deserialize)]
pub struct Postback {
    pub payload: String,
}

/// Read receipt: everything before `watermark` has been seen.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadReceipt {
    pub watermark: Option<i64>,
    pub seq: Option<i64>,
}

/// Link/unlink outcome of the account-linking flow.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountLinking {
    pub status: Option<String>,
    pub authorization_code: Option<String>,
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One outbound payload for the Send API.
///
/// The closed sum keeps the wire invariant by construction: a call carries
/// either a `message` member or a `sender_action` member, never both.
///
/// ```
/// use emo_core::{OutboundMessage, SendRequest};
///
/// let request = SendRequest::new("1523218931038166", OutboundMessage::text("hi!"));
/// let wire = serde_json::to_value(&request).unwrap();
/// assert_eq!(wire, serde_json::json!({
///     "recipient": {"id": "1523218931038166"},
///     "message": {"text": "hi!"}
/// }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundMessage {
    Message(MessagePayload),
    SenderAction(SenderAction),
}

impl OutboundMessage {
    /// A plain text reply.
    pub fn text(text: impl Into<String>) -> Self {
        OutboundMessage::Message(MessagePayload::Text {
            text: text.into(),
            metadata: None,
            quick_replies: Vec::new(),
        })
    }

    /// An attachment reply (media or template).
    pub fn attachment(attachment: Attachment) -> Self {
        OutboundMessage::Message(MessagePayload::Attachment { attachment })
    }

    /// A non-content sender action (typing indicator, read marker).
    pub fn sender_action(action: SenderAction) -> Self {
        OutboundMessage::SenderAction(action)
    }
}

/// The `message` member of a Send API call: text or a single attachment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessagePayload {
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        quick_replies: Vec<QuickReply>,
    },
    Attachment { attachment: Attachment },
}

/// Attachment kinds. Media variants carry a URL payload; `template` carries
/// one of the structured template payloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum Attachment {
    Image(MediaPayload),
    Audio(MediaPayload),
    Video(MediaPayload),
    File(MediaPayload),
    Template(TemplatePayload),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaPayload {
    pub url: String,
}

/// Structured template payloads, tagged by `template_type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "template_type", rename_all = "lowercase")]
pub enum TemplatePayload {
    Button {
        text: String,
        buttons: Vec<ActionButton>,
    },
    Generic {
        elements: Vec<TemplateElement>,
    },
    Receipt(ReceiptData),
}

/// One card in a generic (carousel) template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateElement {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<ActionButton>,
}

/// Template/action buttons. Each tag carries a disjoint field set, so an
/// invalid combination (a postback button with a URL, say) cannot be built.
///
/// ```
/// use emo_core::ActionButton;
///
/// let share = serde_json::to_value(ActionButton::ElementShare).unwrap();
/// assert_eq!(share, serde_json::json!({"type": "element_share"}));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionButton {
    WebUrl { url: String, title: String },
    Postback { title: String, payload: String },
    PhoneNumber { title: String, payload: String },
    AccountLink { url: String },
    ElementShare,
}

/// Receipt template body: order confirmation with line items, address, and
/// cost summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptData {
    pub recipient_name: String,
    pub order_number: String,
    pub currency: String,
    pub payment_method: String,
    pub timestamp: String,
    pub elements: Vec<ReceiptElement>,
    pub address: Address,
    pub summary: CostSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub adjustments: Vec<Adjustment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptElement {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub quantity: u32,
    pub price: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub street_1: String,
    pub street_2: String,
    pub city: String,
    pub postal_code: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSummary {
    pub subtotal: f64,
    pub shipping_cost: f64,
    pub total_tax: f64,
    pub total_cost: f64,
}

/// A named, signed price adjustment (discounts are negative).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub name: String,
    pub amount: f64,
}

/// A constrained reply option offered alongside a text message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickReply {
    pub content_type: String,
    pub title: String,
    pub payload: String,
}

impl QuickReply {
    pub fn text(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            content_type: "text".into(),
            title: title.into(),
            payload: payload.into(),
        }
    }
}

/// Non-content signals understood by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderAction {
    MarkSeen,
    TypingOn,
    TypingOff,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipient {
    pub id: String,
}

/// The JSON body POSTed to the Send API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendRequest {
    pub recipient: Recipient,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<MessagePayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_action: Option<SenderAction>,
}

impl SendRequest {
    pub fn new(recipient_id: impl Into<String>, message: OutboundMessage) -> Self {
        let recipient = Recipient {
            id: recipient_id.into(),
        };
        match message {
            OutboundMessage::Message(payload) => Self {
                recipient,
                message: Some(payload),
                sender_action: None,
            },
            OutboundMessage::SenderAction(action) => Self {
                recipient,
                message: None,
                sender_action: Some(action),
            },
        }
    }
}

/// Send API response body. Sender-action calls omit `message_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendResponse {
    pub recipient_id: Option<String>,
    pub message_id: Option<String>,
    pub error: Option<Value>,
}

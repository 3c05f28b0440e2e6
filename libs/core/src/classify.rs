use crate::events::{
    AccountLinking, Delivery, IncomingMessage, MessagingEvent, Optin, Postback, ReadReceipt,
};

/// Sender/recipient/timestamp shared by every event category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMeta {
    pub sender_id: String,
    pub recipient_id: String,
    pub timestamp: Option<i64>,
}

/// A classified messaging event.
///
/// ```
/// use emo_core::{classify, MessagingEvent, Event};
///
/// let raw = serde_json::json!({
///     "sender": {"id": "100"},
///     "recipient": {"id": "200"},
///     "timestamp": 1479260940690i64,
///     "postback": {"payload": "jobs"}
/// });
/// let event: MessagingEvent = serde_json::from_value(raw).unwrap();
/// assert!(matches!(classify(event), Event::Postback { .. }));
/// ```
#[derive(Debug, Clone)]
pub enum Event {
    Optin { meta: EventMeta, optin: Optin },
    Message { meta: EventMeta, message: IncomingMessage },
    Delivery { meta: EventMeta, delivery: Delivery },
    Postback { meta: EventMeta, postback: Postback },
    Read { meta: EventMeta, read: ReadReceipt },
    AccountLink { meta: EventMeta, link: AccountLinking },
    Unknown,
}

/// Classifies one decoded messaging event into exactly one category.
///
/// The variant fields are mutually exclusive by platform contract, but the
/// evaluation order is fixed anyway so a malformed event with several fields
/// set still resolves deterministically. An event with no variant field is
/// `Unknown`; the caller logs and drops it.
pub fn classify(event: MessagingEvent) -> Event {
    let meta = EventMeta {
        sender_id: event.sender.id,
        recipient_id: event.recipient.id,
        timestamp: event.timestamp,
    };

    if let Some(optin) = event.optin {
        Event::Optin { meta, optin }
    } else if let Some(message) = event.message {
        Event::Message { meta, message }
    } else if let Some(delivery) = event.delivery {
        Event::Delivery { meta, delivery }
    } else if let Some(postback) = event.postback {
        Event::Postback { meta, postback }
    } else if let Some(read) = event.read {
        Event::Read { meta, read }
    } else if let Some(link) = event.account_linking {
        Event::AccountLink { meta, link }
    } else {
        Event::Unknown
    }
}

//! Derives replies for classified message and postback events.

use emo_core::{IncomingMessage, OutboundMessage, Postback};

use crate::builders;
use crate::lookup::CompanyLookup;
use crate::router::{self, PostbackCommand, TextCommand};

/// Derives the replies for one message event. Echo messages and empty
/// payloads yield no replies; everything else resolves through the routing
/// rules.
pub async fn replies_for_message(
    message: &IncomingMessage,
    asset_base: &str,
    lookup: &dyn CompanyLookup,
) -> Vec<OutboundMessage> {
    if message.is_echo {
        tracing::debug!(
            mid = ?message.mid,
            app_id = ?message.app_id,
            metadata = ?message.metadata,
            "ignoring echo of our own message"
        );
        return Vec::new();
    }

    if let Some(quick_reply) = &message.quick_reply {
        tracing::info!(mid = ?message.mid, payload = %quick_reply.payload, "quick reply selected");
        return vec![builders::text_reply("Quick reply tapped")];
    }

    if let Some(text) = &message.text {
        return replies_for_text(text, asset_base, lookup).await;
    }

    if !message.attachments.is_empty() {
        return vec![builders::text_reply("Message with attachment received")];
    }

    Vec::new()
}

async fn replies_for_text(
    text: &str,
    asset_base: &str,
    lookup: &dyn CompanyLookup,
) -> Vec<OutboundMessage> {
    match router::route_text(text) {
        TextCommand::Image => vec![builders::image_reply(asset_base)],
        TextCommand::Gif => vec![builders::gif_reply(asset_base)],
        TextCommand::Audio => vec![builders::audio_reply(asset_base)],
        TextCommand::Video => vec![builders::video_reply(asset_base)],
        TextCommand::File => vec![builders::file_reply(asset_base)],
        TextCommand::Button => vec![builders::button_reply()],
        TextCommand::Generic => vec![builders::generic_reply(asset_base)],
        TextCommand::Receipt => vec![builders::receipt_reply(asset_base)],
        TextCommand::QuickReply => vec![builders::quick_reply_prompt()],
        TextCommand::ReadReceipt => vec![builders::read_receipt_reply()],
        TextCommand::TypingOn => vec![builders::typing_on_reply()],
        TextCommand::TypingOff => vec![builders::typing_off_reply()],
        TextCommand::AccountLinking => vec![builders::account_linking_reply(asset_base)],
        TextCommand::Jobs(None) => builders::jobs_prompts(),
        TextCommand::Jobs(Some(keyword)) => builders::jobs_results(&keyword),
        TextCommand::Events(None) => builders::events_prompts(),
        TextCommand::Events(Some(keyword)) => builders::events_results(&keyword),
        TextCommand::Company(None) => builders::companies_prompts(),
        TextCommand::Company(Some(keyword)) => company_search(&keyword, lookup).await,
        TextCommand::Echo(original) => vec![builders::text_reply(original)],
    }
}

async fn company_search(keyword: &str, lookup: &dyn CompanyLookup) -> Vec<OutboundMessage> {
    let mut replies = vec![builders::company_lead_in(keyword)];
    let employers = match lookup.search_employers(keyword).await {
        Ok(employers) => employers,
        Err(err) => {
            tracing::warn!(keyword = %keyword, error = %err, "company lookup failed");
            Vec::new()
        }
    };
    replies.push(builders::company_results(keyword, &employers));
    replies
}

/// Derives the replies for one postback event. Unmatched payloads produce no
/// outbound call.
pub fn replies_for_postback(postback: &Postback) -> Vec<OutboundMessage> {
    match router::route_postback(&postback.payload) {
        Some(PostbackCommand::Jobs) => builders::jobs_prompts(),
        Some(PostbackCommand::Events) => builders::events_prompts(),
        Some(PostbackCommand::Companies) => builders::companies_prompts(),
        None => {
            tracing::info!(payload = %postback.payload, "postback with unhandled payload");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{Employer, LookupError};
    use async_trait::async_trait;
    use emo_core::{MessagePayload, SendRequest};

    const ASSET_BASE: &str = "https://bot.example.com";

    struct StubLookup {
        employers: Vec<Employer>,
        fail: bool,
    }

    impl StubLookup {
        fn empty() -> Self {
            Self {
                employers: Vec::new(),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                employers: Vec::new(),
                fail: true,
            }
        }

        fn with(employers: Vec<Employer>) -> Self {
            Self {
                employers,
                fail: false,
            }
        }
    }

    #[async_trait]
    impl CompanyLookup for StubLookup {
        async fn search_employers(&self, _keyword: &str) -> Result<Vec<Employer>, LookupError> {
            if self.fail {
                return Err(LookupError::Status(503));
            }
            Ok(self.employers.clone())
        }
    }

    fn message(value: serde_json::Value) -> IncomingMessage {
        serde_json::from_value(value).unwrap()
    }

    fn text_of(reply: &OutboundMessage) -> Option<&str> {
        match reply {
            OutboundMessage::Message(MessagePayload::Text { text, .. }) => Some(text),
            _ => None,
        }
    }

    fn is_generic_template(reply: &OutboundMessage) -> bool {
        let wire = serde_json::to_value(SendRequest::new("100", reply.clone())).unwrap();
        wire["message"]["attachment"]["payload"]["template_type"] == "generic"
    }

    #[tokio::test]
    async fn echo_messages_yield_no_replies() {
        let msg = message(serde_json::json!({
            "mid": "mid.1", "is_echo": true, "app_id": 325210964538357i64, "text": "hi"
        }));
        let replies = replies_for_message(&msg, ASSET_BASE, &StubLookup::empty()).await;
        assert!(replies.is_empty());
    }

    #[tokio::test]
    async fn quick_reply_selection_is_acknowledged() {
        let msg = message(serde_json::json!({
            "mid": "mid.1", "text": "Action",
            "quick_reply": {"payload": "DEVELOPER_DEFINED_PAYLOAD_FOR_PICKING_ACTION"}
        }));
        let replies = replies_for_message(&msg, ASSET_BASE, &StubLookup::empty()).await;
        assert_eq!(replies.len(), 1);
        assert_eq!(text_of(&replies[0]), Some("Quick reply tapped"));
    }

    #[tokio::test]
    async fn attachment_only_messages_are_acknowledged() {
        let msg = message(serde_json::json!({
            "mid": "mid.1",
            "attachments": [{"type": "image", "payload": {"url": "https://example.com/photo.jpg"}}]
        }));
        let replies = replies_for_message(&msg, ASSET_BASE, &StubLookup::empty()).await;
        assert_eq!(replies.len(), 1);
        assert_eq!(text_of(&replies[0]), Some("Message with attachment received"));
    }

    #[tokio::test]
    async fn bare_jobs_onboards_with_two_prompts() {
        let msg = message(serde_json::json!({"mid": "mid.1", "text": "jobs"}));
        let replies = replies_for_message(&msg, ASSET_BASE, &StubLookup::empty()).await;
        assert_eq!(replies.len(), 2);
        assert!(replies.iter().all(|r| text_of(r).is_some()));
    }

    #[tokio::test]
    async fn jobs_keyword_searches_instead_of_onboarding() {
        let msg = message(serde_json::json!({"mid": "mid.1", "text": "jobs javascript"}));
        let replies = replies_for_message(&msg, ASSET_BASE, &StubLookup::empty()).await;
        assert_eq!(replies.len(), 2);
        assert!(text_of(&replies[0]).unwrap().contains("javascript"));
        assert!(is_generic_template(&replies[1]));
    }

    #[tokio::test]
    async fn unmatched_text_echoes_verbatim() {
        let msg = message(serde_json::json!({"mid": "mid.1", "text": "Hello There"}));
        let replies = replies_for_message(&msg, ASSET_BASE, &StubLookup::empty()).await;
        assert_eq!(replies.len(), 1);
        assert_eq!(text_of(&replies[0]), Some("Hello There"));
    }

    #[tokio::test]
    async fn company_search_recovers_from_lookup_failure() {
        let msg = message(serde_json::json!({"mid": "mid.1", "text": "company google"}));
        let replies = replies_for_message(&msg, ASSET_BASE, &StubLookup::failing()).await;
        assert_eq!(replies.len(), 2);
        assert!(text_of(&replies[1]).unwrap().contains("google"));
        assert!(!replies.iter().any(is_generic_template));
    }

    #[tokio::test]
    async fn company_search_builds_a_card_from_the_first_record() {
        let msg = message(serde_json::json!({"mid": "mid.1", "text": "company google"}));
        let lookup = StubLookup::with(vec![Employer {
            name: "Google".into(),
            square_logo: None,
            review_url: Some("https://www.glassdoor.com/Reviews/Google-Reviews-E9079.htm".into()),
        }]);
        let replies = replies_for_message(&msg, ASSET_BASE, &lookup).await;
        assert_eq!(replies.len(), 2);
        assert!(is_generic_template(&replies[1]));
    }

    #[tokio::test]
    async fn sender_action_commands_route_to_actions() {
        let msg = message(serde_json::json!({"mid": "mid.1", "text": "typing on"}));
        let replies = replies_for_message(&msg, ASSET_BASE, &StubLookup::empty()).await;
        assert!(matches!(replies[0], OutboundMessage::SenderAction(_)));
    }

    #[test]
    fn postback_vocabulary_onboards() {
        let postback = Postback {
            payload: "Companies".into(),
        };
        let replies = replies_for_postback(&postback);
        assert_eq!(replies.len(), 2);
    }

    #[test]
    fn unmatched_postback_is_silent() {
        let postback = Postback {
            payload: "unknown_payload".into(),
        };
        assert!(replies_for_postback(&postback).is_empty());
    }
}

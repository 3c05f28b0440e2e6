//! Reply builders: pure functions from minimal inputs to outbound payloads.
//!
//! Media and template builders that embed bundled assets take the externally
//! reachable base URL of the deployment. Keyword-parameterized builders keep
//! the keyword literal in display text and percent-encode it inside URLs.

use emo_core::{
    ActionButton, Address, Adjustment, Attachment, CostSummary, MediaPayload, MessagePayload,
    OutboundMessage, QuickReply, ReceiptData, ReceiptElement, SenderAction, TemplateElement,
    TemplatePayload,
};
use rand::Rng;

const LINKEDIN_LOGO: &str =
    "https://upload.wikimedia.org/wikipedia/commons/c/ca/LinkedIn_logo_initials.png";
const INDEED_LOGO: &str = "http://deltafonts.com/wp-content/uploads/Indeed.jpg";
const CRAIGSLIST_LOGO: &str =
    "https://media.glassdoor.com/sqll/32819/craigslist-squarelogo-1470847108861.png";
const MEETUP_LOGO: &str =
    "http://img2.meetupstatic.com/img/041003812446967856280/logo/svg/logo--script.svg";
const EVENTBRITE_LOGO: &str =
    "https://cdn.evbstatic.com/s3-build/perm_001/48d2e1/django/images/logos/eb_logo_white_1200x1200.png";
const FACEBOOK_LOGO: &str =
    "https://upload.wikimedia.org/wikipedia/commons/thumb/c/c2/F_icon.svg/2000px-F_icon.svg.png";

pub fn text_reply(text: impl Into<String>) -> OutboundMessage {
    OutboundMessage::text(text)
}

pub fn image_reply(asset_base: &str) -> OutboundMessage {
    media(asset_base, "rift.png", Attachment::Image)
}

pub fn gif_reply(asset_base: &str) -> OutboundMessage {
    media(asset_base, "gunter.gif", Attachment::Image)
}

pub fn audio_reply(asset_base: &str) -> OutboundMessage {
    media(asset_base, "sample.mp3", Attachment::Audio)
}

pub fn video_reply(asset_base: &str) -> OutboundMessage {
    media(asset_base, "allofus480.mov", Attachment::Video)
}

pub fn file_reply(asset_base: &str) -> OutboundMessage {
    media(asset_base, "test.txt", Attachment::File)
}

fn media(
    asset_base: &str,
    file: &str,
    wrap: impl FnOnce(MediaPayload) -> Attachment,
) -> OutboundMessage {
    OutboundMessage::attachment(wrap(MediaPayload {
        url: asset_url(asset_base, file),
    }))
}

fn asset_url(asset_base: &str, file: &str) -> String {
    format!("{}/assets/{file}", asset_base.trim_end_matches('/'))
}

/// Sample button template: one of each button kind that carries a payload.
pub fn button_reply() -> OutboundMessage {
    OutboundMessage::attachment(Attachment::Template(TemplatePayload::Button {
        text: "This is test text".into(),
        buttons: vec![
            ActionButton::WebUrl {
                url: "https://www.oculus.com/en-us/rift/".into(),
                title: "Open Web URL".into(),
            },
            ActionButton::Postback {
                title: "Trigger Postback".into(),
                payload: "DEVELOPER_DEFINED_PAYLOAD".into(),
            },
            ActionButton::PhoneNumber {
                title: "Call Phone Number".into(),
                payload: "+16505551234".into(),
            },
        ],
    }))
}

/// Sample two-card carousel.
pub fn generic_reply(asset_base: &str) -> OutboundMessage {
    OutboundMessage::attachment(Attachment::Template(TemplatePayload::Generic {
        elements: vec![
            TemplateElement {
                title: "rift".into(),
                subtitle: Some("Next-generation virtual reality".into()),
                item_url: Some("https://www.oculus.com/en-us/rift/".into()),
                image_url: Some(asset_url(asset_base, "rift.png")),
                buttons: vec![
                    ActionButton::WebUrl {
                        url: "https://www.oculus.com/en-us/rift/".into(),
                        title: "Open Web URL".into(),
                    },
                    ActionButton::Postback {
                        title: "Call Postback".into(),
                        payload: "Payload for first bubble".into(),
                    },
                ],
            },
            TemplateElement {
                title: "touch".into(),
                subtitle: Some("Your Hands, Now in VR".into()),
                item_url: Some("https://www.oculus.com/en-us/touch/".into()),
                image_url: Some(asset_url(asset_base, "touch.png")),
                buttons: vec![
                    ActionButton::WebUrl {
                        url: "https://www.oculus.com/en-us/touch/".into(),
                        title: "Open Web URL".into(),
                    },
                    ActionButton::Postback {
                        title: "Call Postback".into(),
                        payload: "Payload for second bubble".into(),
                    },
                ],
            },
        ],
    }))
}

/// Sample order confirmation. Order numbers must be unique per call.
pub fn receipt_reply(asset_base: &str) -> OutboundMessage {
    let order_number = format!("order{}", rand::rng().random_range(0..1000));
    OutboundMessage::attachment(Attachment::Template(TemplatePayload::Receipt(ReceiptData {
        recipient_name: "Peter Chang".into(),
        order_number,
        currency: "USD".into(),
        payment_method: "Visa 1234".into(),
        timestamp: time::OffsetDateTime::now_utc().unix_timestamp().to_string(),
        elements: vec![
            ReceiptElement {
                title: "Oculus Rift".into(),
                subtitle: Some("Includes: headset, sensor, remote".into()),
                quantity: 1,
                price: 599.00,
                currency: "USD".into(),
                image_url: Some(asset_url(asset_base, "riftsq.png")),
            },
            ReceiptElement {
                title: "Samsung Gear VR".into(),
                subtitle: Some("Frost White".into()),
                quantity: 1,
                price: 99.99,
                currency: "USD".into(),
                image_url: Some(asset_url(asset_base, "gearvrsq.png")),
            },
        ],
        address: Address {
            street_1: "1 Hacker Way".into(),
            street_2: String::new(),
            city: "Menlo Park".into(),
            postal_code: "94025".into(),
            state: "CA".into(),
            country: "US".into(),
        },
        summary: CostSummary {
            subtotal: 698.99,
            shipping_cost: 20.00,
            total_tax: 57.67,
            total_cost: 626.66,
        },
        adjustments: vec![
            Adjustment {
                name: "New Customer Discount".into(),
                amount: -50.0,
            },
            Adjustment {
                name: "$100 Off Coupon".into(),
                amount: -100.0,
            },
        ],
    })))
}

pub fn quick_reply_prompt() -> OutboundMessage {
    OutboundMessage::Message(MessagePayload::Text {
        text: "What's your favorite movie genre?".into(),
        metadata: None,
        quick_replies: vec![
            QuickReply::text("Action", "DEVELOPER_DEFINED_PAYLOAD_FOR_PICKING_ACTION"),
            QuickReply::text("Comedy", "DEVELOPER_DEFINED_PAYLOAD_FOR_PICKING_COMEDY"),
            QuickReply::text("Drama", "DEVELOPER_DEFINED_PAYLOAD_FOR_PICKING_DRAMA"),
        ],
    })
}

pub fn read_receipt_reply() -> OutboundMessage {
    OutboundMessage::sender_action(SenderAction::MarkSeen)
}

pub fn typing_on_reply() -> OutboundMessage {
    OutboundMessage::sender_action(SenderAction::TypingOn)
}

pub fn typing_off_reply() -> OutboundMessage {
    OutboundMessage::sender_action(SenderAction::TypingOff)
}

/// Button template carrying the account-linking call-to-action.
pub fn account_linking_reply(asset_base: &str) -> OutboundMessage {
    OutboundMessage::attachment(Attachment::Template(TemplatePayload::Button {
        text: "Welcome. Link your account.".into(),
        buttons: vec![ActionButton::AccountLink {
            url: format!("{}/authorize", asset_base.trim_end_matches('/')),
        }],
    }))
}

/// First-contact greeting: the bot introduction with one postback button per
/// search category.
pub fn welcome_reply() -> OutboundMessage {
    OutboundMessage::attachment(Attachment::Template(TemplatePayload::Button {
        text: "Hi! My name is EMO. I am a chatbot for EmployMe - I'm here to help you \
               with your career. Please select from any of the options below to get started."
            .into(),
        buttons: vec![
            ActionButton::Postback {
                title: "Jobs".into(),
                payload: "jobs".into(),
            },
            ActionButton::Postback {
                title: "Events".into(),
                payload: "events".into(),
            },
            ActionButton::Postback {
                title: "Companies".into(),
                payload: "companies".into(),
            },
        ],
    }))
}

/// Two-message onboarding prompt for the jobs category.
pub fn jobs_prompts() -> Vec<OutboundMessage> {
    vec![
        text_reply("Great! I can help you look for jobs in and about the internets."),
        text_reply(
            "Enter keywords for the type of jobs you are interested in. For example: \
             for jobs focused on JavaScript, reply \"jobs javascript\".",
        ),
    ]
}

pub fn events_prompts() -> Vec<OutboundMessage> {
    vec![
        text_reply("Great! I can help you look for events around your location."),
        text_reply(
            "Enter keywords for the type of events you are interested in. For example: \
             for events focused on iOS development, reply 'events iOS'",
        ),
    ]
}

pub fn companies_prompts() -> Vec<OutboundMessage> {
    vec![
        text_reply("Great! I can help you lookup information about companies."),
        text_reply(
            "Enter company name, so I can pull up some basic Glassdoor reviews for you \
             to look through. For Example reply \"company google\" to look up glassdoor \
             reviews for Google.",
        ),
    ]
}

/// Keyword search across three fixed job boards: a lead-in text plus a
/// three-card carousel deep-linking into each board.
pub fn jobs_results(keyword: &str) -> Vec<OutboundMessage> {
    let q = urlencoding::encode(keyword);
    let linkedin = format!("https://www.linkedin.com/jobs/search?keywords={q}");
    let indeed = format!("https://www.indeed.ca/jobs?q={q}&l=toronto");
    let craigslist = format!("https://toronto.craigslist.ca/search/jjj?query={q}");
    vec![
        text_reply(format!(
            "Here are some job postings for{keyword} I was able to dig up."
        )),
        OutboundMessage::attachment(Attachment::Template(TemplatePayload::Generic {
            elements: vec![
                provider_element("LinkedIn", format!("LinkedIn jobs for {keyword}"), linkedin, LINKEDIN_LOGO),
                provider_element("Indeed", format!("Indeed jobs for {keyword}"), indeed, INDEED_LOGO),
                provider_element(
                    "Craigslist",
                    format!("Craigslist jobs for{keyword}"),
                    craigslist,
                    CRAIGSLIST_LOGO,
                ),
            ],
        })),
    ]
}

/// Keyword search across three fixed event listings.
pub fn events_results(keyword: &str) -> Vec<OutboundMessage> {
    let q = urlencoding::encode(keyword);
    let meetup = format!("http://www.meetup.com/find/?allMeetups=false&keywords={q}");
    let eventbrite = format!("https://www.eventbrite.com/d/canada--toronto/{q}/?crt=regular&sort=best");
    let facebook = format!("https://graph.facebook.com/search?q={q}&type=event");
    vec![
        text_reply(format!(
            "Here are some events for{keyword} I was able to dig up."
        )),
        OutboundMessage::attachment(Attachment::Template(TemplatePayload::Generic {
            elements: vec![
                provider_element("Meetup", format!("Meetup groups for {keyword}"), meetup, MEETUP_LOGO),
                provider_element(
                    "Eventbrite",
                    format!("Eventbrite events for {keyword}"),
                    eventbrite,
                    EVENTBRITE_LOGO,
                ),
                provider_element(
                    "Facebook",
                    format!("Facebook events for{keyword}"),
                    facebook,
                    FACEBOOK_LOGO,
                ),
            ],
        })),
    ]
}

fn provider_element(
    title: &str,
    subtitle: String,
    url: String,
    logo: &str,
) -> TemplateElement {
    TemplateElement {
        title: title.into(),
        subtitle: Some(subtitle),
        item_url: Some(url.clone()),
        image_url: Some(logo.into()),
        buttons: vec![
            ActionButton::WebUrl {
                url,
                title: "Open Web URL".into(),
            },
            ActionButton::ElementShare,
        ],
    }
}

/// Lead-in text sent before the company lookup resolves.
pub fn company_lead_in(keyword: &str) -> OutboundMessage {
    text_reply(format!("Here are some glassdoor reviews for {keyword}"))
}

/// Company search outcome: a single-card carousel for the first employer
/// record, or a text reply naming the keyword when nothing resolved.
pub fn company_results(keyword: &str, employers: &[crate::Employer]) -> OutboundMessage {
    let Some(employer) = employers.first() else {
        return text_reply(format!("Sorry I couldn't find anything for{keyword}"));
    };

    let mut buttons = Vec::new();
    if let Some(review_url) = &employer.review_url {
        buttons.push(ActionButton::WebUrl {
            url: review_url.clone(),
            title: "GlassDoor Review".into(),
        });
    }
    buttons.push(ActionButton::ElementShare);

    OutboundMessage::attachment(Attachment::Template(TemplatePayload::Generic {
        elements: vec![TemplateElement {
            title: employer.name.clone(),
            subtitle: Some(format!("Glassdoor reviews for{keyword}")),
            item_url: employer.review_url.clone(),
            image_url: employer.square_logo.clone(),
            buttons,
        }],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Employer;
    use emo_core::SendRequest;
    use serde_json::json;

    fn wire(message: OutboundMessage) -> serde_json::Value {
        serde_json::to_value(SendRequest::new("100", message)).unwrap()
    }

    #[test]
    fn image_reply_points_at_the_configured_base() {
        let value = wire(image_reply("https://bot.example.com"));
        assert_eq!(
            value["message"]["attachment"],
            json!({
                "type": "image",
                "payload": {"url": "https://bot.example.com/assets/rift.png"}
            })
        );
    }

    #[test]
    fn asset_base_trailing_slash_is_normalized() {
        let value = wire(gif_reply("https://bot.example.com/"));
        assert_eq!(
            value["message"]["attachment"]["payload"]["url"],
            "https://bot.example.com/assets/gunter.gif"
        );
    }

    #[test]
    fn jobs_results_template_has_three_providers() {
        let replies = jobs_results(" javascript");
        assert_eq!(replies.len(), 2);

        let lead_in = wire(replies[0].clone());
        assert_eq!(
            lead_in["message"]["text"],
            "Here are some job postings for javascript I was able to dig up."
        );

        let template = wire(replies[1].clone());
        let elements = template["message"]["attachment"]["payload"]["elements"]
            .as_array()
            .unwrap();
        assert_eq!(elements.len(), 3);
        let titles: Vec<_> = elements.iter().map(|e| e["title"].as_str().unwrap()).collect();
        assert_eq!(titles, ["LinkedIn", "Indeed", "Craigslist"]);
        for element in elements {
            assert!(element["item_url"].as_str().unwrap().contains("javascript"));
            assert_eq!(element["buttons"][1], json!({"type": "element_share"}));
        }
    }

    #[test]
    fn events_results_template_has_three_providers() {
        let replies = events_results(" ios");
        let template = wire(replies[1].clone());
        let elements = template["message"]["attachment"]["payload"]["elements"]
            .as_array()
            .unwrap();
        let titles: Vec<_> = elements.iter().map(|e| e["title"].as_str().unwrap()).collect();
        assert_eq!(titles, ["Meetup", "Eventbrite", "Facebook"]);
        assert!(elements[1]["item_url"]
            .as_str()
            .unwrap()
            .contains("eventbrite.com/d/canada--toronto/%20ios/"));
    }

    #[test]
    fn keywords_are_percent_encoded_in_urls_only() {
        let replies = jobs_results(" c++ & rust");
        let lead_in = wire(replies[0].clone());
        assert_eq!(
            lead_in["message"]["text"],
            "Here are some job postings for c++ & rust I was able to dig up."
        );
        let template = wire(replies[1].clone());
        let url = template["message"]["attachment"]["payload"]["elements"][0]["item_url"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(url.contains("%20c%2B%2B%20%26%20rust"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn company_results_with_a_record_builds_one_card() {
        let employers = vec![Employer {
            name: "Google".into(),
            square_logo: Some("https://media.glassdoor.com/sqll/9079/google-squarelogo.png".into()),
            review_url: Some("https://www.glassdoor.com/Reviews/Google-Reviews-E9079.htm".into()),
        }];
        let value = wire(company_results(" google", &employers));
        let payload = &value["message"]["attachment"]["payload"];
        assert_eq!(payload["template_type"], "generic");
        let elements = payload["elements"].as_array().unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0]["title"], "Google");
        assert_eq!(elements[0]["subtitle"], "Glassdoor reviews for google");
        assert_eq!(elements[0]["buttons"][0]["title"], "GlassDoor Review");
    }

    #[test]
    fn company_results_without_records_is_one_text_reply() {
        let value = wire(company_results(" initech", &[]));
        assert_eq!(
            value["message"],
            json!({"text": "Sorry I couldn't find anything for initech"})
        );
        assert!(value["message"].get("attachment").is_none());
    }

    #[test]
    fn welcome_reply_offers_the_three_categories() {
        let value = wire(welcome_reply());
        let buttons = value["message"]["attachment"]["payload"]["buttons"]
            .as_array()
            .unwrap();
        let payloads: Vec<_> = buttons.iter().map(|b| b["payload"].as_str().unwrap()).collect();
        assert_eq!(payloads, ["jobs", "events", "companies"]);
    }

    #[test]
    fn account_linking_reply_targets_the_authorize_view() {
        let value = wire(account_linking_reply("https://bot.example.com"));
        assert_eq!(
            value["message"]["attachment"]["payload"]["buttons"][0],
            json!({"type": "account_link", "url": "https://bot.example.com/authorize"})
        );
    }

    #[test]
    fn sender_action_builders_produce_no_message_body() {
        for reply in [read_receipt_reply(), typing_on_reply(), typing_off_reply()] {
            let value = wire(reply);
            assert!(value.get("message").is_none());
            assert!(value.get("sender_action").is_some());
        }
    }

    #[test]
    fn receipt_reply_totals_match_the_line_items() {
        let value = wire(receipt_reply("https://bot.example.com"));
        let payload = &value["message"]["attachment"]["payload"];
        assert!(payload["order_number"].as_str().unwrap().starts_with("order"));
        assert_eq!(payload["elements"].as_array().unwrap().len(), 2);
        assert_eq!(payload["summary"]["subtotal"], 698.99);
        assert_eq!(payload["adjustments"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn quick_reply_prompt_offers_three_genres() {
        let value = wire(quick_reply_prompt());
        let quick_replies = value["message"]["quick_replies"].as_array().unwrap();
        assert_eq!(quick_replies.len(), 3);
        assert_eq!(quick_replies[0]["content_type"], "text");
    }
}

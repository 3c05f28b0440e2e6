//! Ordered routing rules for free-text messages and postback payloads.
//!
//! Matching is case-insensitive. Prefix rules (`jobs`, `events`, `company`)
//! are evaluated first with an explicit empty/non-empty remainder branch:
//! "jobs" alone onboards, "jobs javascript" carries a keyword. The remainder
//! is taken from the folded text with the literal prefix stripped and is not
//! trimmed, so a keyword normally keeps its leading space.

/// Routing outcome for a free-text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextCommand {
    Image,
    Gif,
    Audio,
    Video,
    File,
    Button,
    Generic,
    Receipt,
    QuickReply,
    ReadReceipt,
    TypingOn,
    TypingOff,
    AccountLinking,
    /// `None` onboards; `Some(keyword)` searches.
    Jobs(Option<String>),
    Events(Option<String>),
    Company(Option<String>),
    /// Default rule: echo the original text back verbatim.
    Echo(String),
}

/// Routing outcome for a postback payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostbackCommand {
    Jobs,
    Events,
    Companies,
}

pub fn route_text(text: &str) -> TextCommand {
    let folded = text.to_lowercase();

    if let Some(rest) = folded.strip_prefix("jobs") {
        return TextCommand::Jobs(keyword(rest));
    }
    if let Some(rest) = folded.strip_prefix("events") {
        return TextCommand::Events(keyword(rest));
    }
    if let Some(rest) = folded.strip_prefix("company") {
        return TextCommand::Company(keyword(rest));
    }

    match folded.as_str() {
        "image" => TextCommand::Image,
        "gif" => TextCommand::Gif,
        "audio" => TextCommand::Audio,
        "video" => TextCommand::Video,
        "file" => TextCommand::File,
        "button" => TextCommand::Button,
        "generic" => TextCommand::Generic,
        "receipt" => TextCommand::Receipt,
        "quick reply" => TextCommand::QuickReply,
        "read receipt" => TextCommand::ReadReceipt,
        "typing on" => TextCommand::TypingOn,
        "typing off" => TextCommand::TypingOff,
        "account linking" => TextCommand::AccountLinking,
        _ => TextCommand::Echo(text.to_string()),
    }
}

/// Postback payloads use a smaller fixed vocabulary; anything else is
/// unhandled and produces no reply.
pub fn route_postback(payload: &str) -> Option<PostbackCommand> {
    match payload.to_lowercase().as_str() {
        "jobs" => Some(PostbackCommand::Jobs),
        "events" => Some(PostbackCommand::Events),
        "companies" => Some(PostbackCommand::Companies),
        _ => None,
    }
}

fn keyword(rest: &str) -> Option<String> {
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_commands_match_case_insensitively() {
        assert_eq!(route_text("image"), TextCommand::Image);
        assert_eq!(route_text("IMAGE"), TextCommand::Image);
        assert_eq!(route_text("Quick Reply"), TextCommand::QuickReply);
        assert_eq!(route_text("typing off"), TextCommand::TypingOff);
        assert_eq!(route_text("account linking"), TextCommand::AccountLinking);
    }

    #[test]
    fn bare_prefix_onboards() {
        assert_eq!(route_text("jobs"), TextCommand::Jobs(None));
        assert_eq!(route_text("Events"), TextCommand::Events(None));
        assert_eq!(route_text("company"), TextCommand::Company(None));
    }

    #[test]
    fn prefix_with_remainder_carries_the_keyword() {
        assert_eq!(
            route_text("jobs javascript"),
            TextCommand::Jobs(Some(" javascript".into()))
        );
        assert_eq!(
            route_text("Events iOS"),
            TextCommand::Events(Some(" ios".into()))
        );
        assert_eq!(
            route_text("company google"),
            TextCommand::Company(Some(" google".into()))
        );
    }

    #[test]
    fn keyword_is_folded_but_not_trimmed() {
        assert_eq!(
            route_text("JOBS JavaScript"),
            TextCommand::Jobs(Some(" javascript".into()))
        );
    }

    #[test]
    fn unmatched_text_echoes_the_original_casing() {
        assert_eq!(
            route_text("Hello There"),
            TextCommand::Echo("Hello There".into())
        );
    }

    #[test]
    fn postback_vocabulary_is_case_folded() {
        assert_eq!(route_postback("jobs"), Some(PostbackCommand::Jobs));
        assert_eq!(route_postback("COMPANIES"), Some(PostbackCommand::Companies));
        assert_eq!(route_postback("Events"), Some(PostbackCommand::Events));
        assert_eq!(route_postback("unknown_payload"), None);
    }
}

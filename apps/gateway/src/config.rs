use std::net::SocketAddr;

use anyhow::{Context, Result};

/// Process configuration, loaded once at startup. The four Messenger values
/// are required; startup fails without them.
#[derive(Debug, Clone)]
pub struct Config {
    /// App secret used to verify `x-hub-signature` headers.
    pub app_secret: String,
    /// Token echoed back during the `GET /webhook` subscription handshake.
    pub validation_token: String,
    /// Page access token passed to the Send API.
    pub page_access_token: String,
    /// Externally reachable base URL of this deployment; templated into
    /// asset links and the account-linking call-to-action.
    pub server_url: String,
    pub bind: SocketAddr,
    pub graph_api_base: String,
    pub glassdoor_api_base: String,
    pub glassdoor_partner_id: String,
    pub glassdoor_partner_key: String,
    /// Reject webhook posts that carry no signature header. On by default;
    /// relaxing this logs and accepts instead.
    pub require_signature: bool,
    /// Greet first-time senders with the welcome template instead of routing
    /// their first message.
    pub greet_first_contact: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let app_secret = require("MESSENGER_APP_SECRET")?;
        let validation_token = require("MESSENGER_VALIDATION_TOKEN")?;
        let page_access_token = require("MESSENGER_PAGE_ACCESS_TOKEN")?;
        let server_url = require("SERVER_URL")?;

        let bind = std::env::var("BIND")
            .unwrap_or_else(|_| "0.0.0.0:5000".into())
            .parse()
            .context("invalid BIND address")?;
        let graph_api_base = std::env::var("GRAPH_API_BASE")
            .unwrap_or_else(|_| "https://graph.facebook.com".into());
        let glassdoor_api_base = std::env::var("GLASSDOOR_API_BASE")
            .unwrap_or_else(|_| "http://api.glassdoor.com".into());
        let glassdoor_partner_id =
            std::env::var("GLASSDOOR_PARTNER_ID").unwrap_or_else(|_| "110754".into());
        let glassdoor_partner_key =
            std::env::var("GLASSDOOR_PARTNER_KEY").unwrap_or_else(|_| "juaQEPEZfps".into());

        Ok(Self {
            app_secret,
            validation_token,
            page_access_token,
            server_url,
            bind,
            graph_api_base,
            glassdoor_api_base,
            glassdoor_partner_id,
            glassdoor_partner_key,
            require_signature: flag_from(std::env::var("REQUIRE_SIGNATURE").ok(), true),
            greet_first_contact: flag_from(std::env::var("GREET_FIRST_CONTACT").ok(), false),
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} is required"))
}

fn flag_from(value: Option<String>, default: bool) -> bool {
    match value {
        Some(value) => matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"),
        None => default,
    }
}

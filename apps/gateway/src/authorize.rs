//! Account-linking confirmation view.
//!
//! The account-link call-to-action points the platform's login dialog at
//! `GET /authorize`; the page confirms the link and forwards the user to the
//! platform's `redirect_uri` with a generated authorization code appended.

use axum::extract::Query;
use axum::response::Html;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AuthorizeQs {
    pub account_linking_token: Option<String>,
    pub redirect_uri: Option<String>,
}

pub async fn authorize(Query(q): Query<AuthorizeQs>) -> Html<String> {
    let authorization_code = nanoid::nanoid!();
    let redirect_uri = q.redirect_uri.unwrap_or_default();
    let success_uri = format!("{redirect_uri}&authorization_code={authorization_code}");
    tracing::info!(
        has_token = q.account_linking_token.is_some(),
        "rendering account-linking confirmation"
    );
    Html(render(&success_uri))
}

fn render(success_uri: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Link your account</title>
  </head>
  <body>
    <h1>Link your account</h1>
    <p>Confirm to connect your EmployMe account with Messenger.</p>
    <p><a href="{}">Confirm and continue</a></p>
  </body>
</html>
"#,
        attr_escape(success_uri)
    )
}

fn attr_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

//! Webhook endpoints and per-event handling.
//!
//! `POST /webhook` acknowledges eagerly: once the payload is structurally
//! accepted the platform gets a 200 and event processing continues in the
//! background. Nothing downstream of acceptance may change that response;
//! a non-200 would trigger the platform's redelivery policy.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use emo_core::{classify, Event, MessagingEvent, OutboundMessage, WebhookEnvelope};
use emo_replies::{builders, respond, CompanyLookup};
use emo_session::ContactStore;
use serde::Deserialize;

use crate::authorize;
use crate::config::Config;
use crate::send::{self, SendApi};
use crate::signature::{self, SignatureError};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub send: Arc<dyn SendApi>,
    pub lookup: Arc<dyn CompanyLookup>,
    pub contacts: Arc<dyn ContactStore>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", get(verify_webhook).post(receive_webhook))
        .route("/authorize", get(authorize::authorize))
        .route("/healthz", get(healthz))
        .with_state(state)
}

#[derive(Deserialize)]
struct VerifyQs {
    #[serde(rename = "hub.mode")]
    mode: Option<String>,
    #[serde(rename = "hub.challenge")]
    challenge: Option<String>,
    #[serde(rename = "hub.verify_token")]
    token: Option<String>,
}

async fn verify_webhook(
    State(state): State<AppState>,
    Query(q): Query<VerifyQs>,
) -> impl IntoResponse {
    if q.mode.as_deref() == Some("subscribe")
        && q.token.as_deref() == Some(state.config.validation_token.as_str())
    {
        tracing::info!("webhook subscription validated");
        (StatusCode::OK, q.challenge.unwrap_or_default())
    } else {
        tracing::warn!("webhook validation failed; check that the validation tokens match");
        (StatusCode::FORBIDDEN, "forbidden".to_string())
    }
}

async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let header = headers
        .get("x-hub-signature")
        .and_then(|value| value.to_str().ok());
    match signature::verify(&state.config.app_secret, header, &body) {
        Ok(()) => {}
        Err(SignatureError::Missing) if !state.config.require_signature => {
            tracing::warn!("accepting webhook request without a signature header");
        }
        Err(err) => {
            tracing::warn!(error = %err, "rejecting webhook request");
            return StatusCode::UNAUTHORIZED;
        }
    }

    let envelope: WebhookEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(err) => {
            tracing::warn!(error = %err, "failed to decode webhook payload");
            return StatusCode::BAD_REQUEST;
        }
    };

    if envelope.object != "page" {
        tracing::info!(object = %envelope.object, "ignoring non-page callback");
        return StatusCode::OK;
    }

    // Ack now; replies are delivered in the background and their outcome only
    // shows up in logs and counters.
    tokio::spawn(process_envelope(state, envelope));
    StatusCode::OK
}

async fn healthz() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// Processes every messaging event of an accepted envelope, in array order.
/// A malformed event is skipped; the rest of the batch continues.
pub(crate) async fn process_envelope(state: AppState, envelope: WebhookEnvelope) {
    for entry in envelope.entry {
        for raw in entry.messaging {
            let event: MessagingEvent = match serde_json::from_value(raw) {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(page = %entry.id, error = %err, "skipping malformed messaging event");
                    continue;
                }
            };
            handle_event(&state, classify(event)).await;
        }
    }
}

async fn handle_event(state: &AppState, event: Event) {
    match event {
        Event::Optin { meta, optin } => {
            metrics::counter!("events_received", "kind" => "optin").increment(1);
            tracing::info!(
                sender = %meta.sender_id,
                recipient = %meta.recipient_id,
                data_ref = ?optin.data_ref,
                "authentication callback"
            );
            dispatch_all(
                state,
                &meta.sender_id,
                vec![builders::text_reply("Authentication successful")],
            )
            .await;
        }
        Event::Message { meta, message } => {
            metrics::counter!("events_received", "kind" => "message").increment(1);
            if state.config.greet_first_contact && !message.is_echo {
                match state.contacts.first_contact(&meta.sender_id).await {
                    Ok(true) => {
                        dispatch_all(state, &meta.sender_id, vec![builders::welcome_reply()])
                            .await;
                        return;
                    }
                    Ok(false) => {}
                    Err(err) => {
                        tracing::warn!(error = %err, "contact store lookup failed");
                    }
                }
            }
            let replies = respond::replies_for_message(
                &message,
                &state.config.server_url,
                state.lookup.as_ref(),
            )
            .await;
            dispatch_all(state, &meta.sender_id, replies).await;
        }
        Event::Delivery { meta, delivery } => {
            metrics::counter!("events_received", "kind" => "delivery").increment(1);
            for mid in &delivery.mids {
                tracing::info!(sender = %meta.sender_id, mid = %mid, "delivery confirmed");
            }
            tracing::info!(
                watermark = ?delivery.watermark,
                "messages before watermark delivered"
            );
        }
        Event::Postback { meta, postback } => {
            metrics::counter!("events_received", "kind" => "postback").increment(1);
            let replies = respond::replies_for_postback(&postback);
            dispatch_all(state, &meta.sender_id, replies).await;
        }
        Event::Read { meta, read } => {
            metrics::counter!("events_received", "kind" => "read").increment(1);
            tracing::info!(
                sender = %meta.sender_id,
                watermark = ?read.watermark,
                seq = ?read.seq,
                "messages read"
            );
        }
        Event::AccountLink { meta, link } => {
            metrics::counter!("events_received", "kind" => "account_linking").increment(1);
            tracing::info!(
                sender = %meta.sender_id,
                status = ?link.status,
                authorization_code = ?link.authorization_code,
                "account link event"
            );
        }
        Event::Unknown => {
            metrics::counter!("events_received", "kind" => "unknown").increment(1);
            tracing::warn!("dropping unknown messaging event");
        }
    }
}

async fn dispatch_all(state: &AppState, recipient_id: &str, replies: Vec<OutboundMessage>) {
    for reply in replies {
        send::dispatch(state.send.as_ref(), recipient_id, &reply).await;
    }
}

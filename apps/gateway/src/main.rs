//! EmployMe messenger gateway: verifies webhook callback signatures,
//! classifies messaging events, derives replies through keyword routing, and
//! dispatches them through the Send API.

mod authorize;
mod config;
mod glassdoor;
mod routes;
mod send;
mod signature;

use std::sync::Arc;

use anyhow::Result;
use emo_session::MemoryContactStore;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::glassdoor::GlassdoorClient;
use crate::routes::AppState;
use crate::send::GraphSendClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let http = reqwest::Client::new();

    let state = AppState {
        send: Arc::new(GraphSendClient::new(
            http.clone(),
            &config.graph_api_base,
            config.page_access_token.clone(),
        )),
        lookup: Arc::new(GlassdoorClient::new(
            http,
            &config.glassdoor_api_base,
            config.glassdoor_partner_id.clone(),
            config.glassdoor_partner_key.clone(),
        )),
        contacts: Arc::new(MemoryContactStore::new()),
        config: Arc::new(config),
    };

    let addr = state.config.bind;
    let app = routes::router(state);

    tracing::info!("gateway listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

//! HTTP server for LINE webhook delivery.
//!
//! `POST /callback` verifies the signature, runs each text message through
//! the conversation, and replies with the result. `GET /health` reports
//! uptime.

use crate::conversation::Conversation;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use yurei_channels::line::{self, SIGNATURE_HEADER};
use yurei_core::{
    config::ServerConfig,
    message::{IncomingMessage, OutgoingMessage, Sender},
    persona::{echo_line, UNKNOWN_SENDER_NOTICE},
    traits::Channel,
};

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub conversation: Arc<Conversation>,
    pub channel: Arc<dyn Channel>,
    pub channel_secret: Arc<str>,
    pub uptime: Instant,
}

type ApiError = (StatusCode, Json<Value>);

fn bad_request(msg: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({"error": msg.into()})))
}

/// `GET /health`: health check with uptime.
async fn health(State(state): State<ApiState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptime_secs": state.uptime.elapsed().as_secs(),
        "channel": state.channel.name(),
    }))
}

/// `POST /callback`: LINE webhook endpoint.
///
/// A bad signature is rejected before anything is parsed. Once verified,
/// per-event failures are logged and the platform still gets `OK`.
async fn callback(
    headers: HeaderMap,
    State(state): State<ApiState>,
    body: String,
) -> Result<&'static str, ApiError> {
    // 1. Signature.
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            warn!("webhook: missing {SIGNATURE_HEADER} header");
            bad_request("missing signature")
        })?;

    line::verify_signature(&state.channel_secret, body.as_bytes(), signature).map_err(|e| {
        warn!("webhook: {e}");
        bad_request("invalid signature")
    })?;

    debug!("webhook: request body: {body}");

    // 2. Parse.
    let messages = line::parse_webhook(&body).map_err(|e| {
        warn!("webhook: unparseable body: {e}");
        bad_request(format!("invalid webhook body: {e}"))
    })?;

    // 3. Handle in delivery order.
    for msg in messages {
        handle_message(&state, msg).await;
    }

    Ok("OK")
}

/// Produce and deliver the reply for one inbound text message.
async fn handle_message(state: &ApiState, msg: IncomingMessage) {
    let Some(reply_token) = msg.reply_token.clone() else {
        warn!("webhook: message {} has no reply token, skipping", msg.id);
        return;
    };

    let texts = match &msg.sender {
        Sender::User(user_id) => {
            info!("webhook: message {} from user {user_id}", msg.id);
            let name = match state.channel.display_name(user_id).await {
                Ok(name) => name,
                Err(e) => {
                    warn!("webhook: profile lookup for {user_id} failed: {e}");
                    user_id.clone()
                }
            };
            match state.conversation.dispatch(&name, &msg.text).await {
                Ok(reply) => vec![reply],
                Err(e) => {
                    error!("webhook: no reply for message {}: {e}", msg.id);
                    return;
                }
            }
        }
        Sender::Unknown => {
            info!("webhook: message {} from unresolvable source", msg.id);
            vec![UNKNOWN_SENDER_NOTICE.to_string(), echo_line(&msg.text)]
        }
    };

    if let Err(e) = state
        .channel
        .send(OutgoingMessage::reply(reply_token, texts))
        .await
    {
        error!("webhook: reply delivery failed for message {}: {e}", msg.id);
    }
}

/// Build the axum router with shared state.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/callback", post(callback))
        .route("/health", get(health))
        .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024)) // 1 MB max request body
        .with_state(state)
}

/// Serve until `shutdown` resolves.
pub async fn serve<F>(config: &ServerConfig, state: ApiState, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);
    let addr = format!("{}:{}", config.host, config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("webhook server failed to bind to {addr}: {e}"))?;

    info!("webhook server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

//! Webhook endpoint: secret-header validation and update intake.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tolyan_core::message::InboundMessage;
use tracing::{debug, warn};

use super::types::TgUpdate;

/// Header Telegram echoes the configured secret back in.
const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Shared state for webhook handlers.
#[derive(Clone)]
pub(crate) struct WebhookState {
    pub secret: String,
    pub tx: mpsc::Sender<InboundMessage>,
}

pub(crate) fn build_router(state: WebhookState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/webhook", post(receive_update))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Constant-time string comparison to prevent timing attacks on the secret.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

fn check_secret(headers: &HeaderMap, secret: &str) -> bool {
    headers
        .get(SECRET_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|token| constant_time_eq(token, secret))
        .unwrap_or(false)
}

/// Accept an update. Malformed or uninteresting payloads are dropped
/// silently; the transport always gets its acknowledgement.
async fn receive_update(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !check_secret(&headers, &state.secret) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"ok": false, "error": "forbidden"})),
        );
    }

    match serde_json::from_value::<TgUpdate>(payload) {
        Ok(update) => {
            if let Some(inbound) = update.into_inbound() {
                if state.tx.send(inbound).await.is_err() {
                    warn!("gateway receiver dropped, update discarded");
                }
            }
        }
        Err(e) => debug!("ignoring unparseable update: {e}"),
    }

    (StatusCode::OK, Json(json!({"ok": true})))
}

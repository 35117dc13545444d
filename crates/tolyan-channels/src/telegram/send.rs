//! Outbound Bot API calls: delivery, typing, identity, webhook registration.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tolyan_core::{error::BotError, trigger::BotIdentity};
use tracing::{error, info, warn};

use super::types::{TgResponse, TgUser};
use super::TelegramChannel;

/// Platform cap on message length.
pub(crate) const MESSAGE_CHAR_CAP: usize = 4096;

/// Bound on every outbound HTTP call.
const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(15);

impl TelegramChannel {
    /// POST a Bot API method and unwrap its `result`.
    async fn api_call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: Value,
    ) -> Result<T, BotError> {
        let url = format!("{}/{method}", self.base_url);
        let resp = self
            .client
            .post(&url)
            .timeout(OUTBOUND_TIMEOUT)
            .json(&payload)
            .send()
            .await
            .map_err(|e| BotError::Channel(format!("telegram {method} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BotError::Channel(format!(
                "telegram {method} returned {status}: {body}"
            )));
        }

        let body: TgResponse<T> = resp
            .json()
            .await
            .map_err(|e| BotError::Channel(format!("telegram {method} parse failed: {e}")))?;

        if !body.ok {
            return Err(BotError::Channel(format!(
                "telegram {method} not ok: {}",
                body.description.unwrap_or_default()
            )));
        }

        body.result
            .ok_or_else(|| BotError::Channel(format!("telegram {method} returned no result")))
    }

    /// Send a text message, clipped to the platform cap, optionally anchored
    /// to the message being answered.
    pub(crate) async fn send_message(
        &self,
        chat_id: i64,
        reply_to: Option<i64>,
        text: &str,
    ) -> Result<(), BotError> {
        let mut payload = json!({
            "chat_id": chat_id,
            "text": clip_chars(text, MESSAGE_CHAR_CAP),
        });
        if let Some(message_id) = reply_to {
            payload["reply_to_message_id"] = json!(message_id);
            payload["allow_sending_without_reply"] = json!(true);
        }

        self.api_call::<Value>("sendMessage", payload).await.map(|_| ())
    }

    /// Show a chat action (e.g. "typing").
    pub(crate) async fn chat_action(&self, chat_id: i64, action: &str) -> Result<(), BotError> {
        let payload = json!({ "chat_id": chat_id, "action": action });
        self.api_call::<bool>("sendChatAction", payload).await.map(|_| ())
    }

    /// Resolve the bot's own account via `getMe`.
    pub(crate) async fn fetch_identity(&self) -> Result<BotIdentity, BotError> {
        let me: TgUser = self.api_call("getMe", json!({})).await?;
        Ok(BotIdentity {
            id: me.id,
            username: me.username.unwrap_or_default(),
        })
    }

    /// Register the webhook with Telegram. Best-effort: failures are logged,
    /// not propagated, and the call is skipped when no public URL is set.
    pub(crate) async fn register_webhook(&self) {
        if self.config.webhook_base_url.is_empty() {
            info!("webhook_base_url not set, skipping setWebhook on startup");
            return;
        }
        let url = format!(
            "{}/webhook",
            self.config.webhook_base_url.trim_end_matches('/')
        );
        let payload = json!({
            "url": url,
            "secret_token": self.config.webhook_secret,
            "drop_pending_updates": true,
        });
        match self.api_call::<bool>("setWebhook", payload).await {
            Ok(_) => info!("webhook registered at {url}"),
            Err(e) => error!("failed to set webhook: {e}"),
        }
    }
}

/// First `cap` characters of `text`, respecting char boundaries.
pub(crate) fn clip_chars(text: &str, cap: usize) -> String {
    if text.chars().count() <= cap {
        text.to_string()
    } else {
        warn!("clipping outbound message to {cap} chars");
        text.chars().take(cap).collect()
    }
}

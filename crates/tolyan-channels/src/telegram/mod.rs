//! Telegram Bot API channel.
//!
//! Receives updates through a webhook endpoint and replies via
//! `sendMessage`. Docs: <https://core.telegram.org/bots/api>

pub(crate) mod send;
pub(crate) mod types;
mod webhook;

use async_trait::async_trait;
use tolyan_core::{
    config::TelegramConfig, error::BotError, message::InboundMessage, traits::Channel,
    trigger::BotIdentity,
};
use tokio::sync::mpsc;
use tracing::{error, info};

/// Telegram channel using the Bot API with a webhook transport.
pub struct TelegramChannel {
    config: TelegramConfig,
    client: reqwest::Client,
    base_url: String,
}

impl TelegramChannel {
    /// Create a new Telegram channel from config.
    pub fn new(config: TelegramConfig) -> Self {
        let base_url = format!("https://api.telegram.org/bot{}", config.bot_token);
        Self {
            config,
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn identity(&self) -> Result<BotIdentity, BotError> {
        self.fetch_identity().await
    }

    async fn start(&self) -> Result<mpsc::Receiver<InboundMessage>, BotError> {
        self.register_webhook().await;

        let (tx, rx) = mpsc::channel(64);
        let router = webhook::build_router(webhook::WebhookState {
            secret: self.config.webhook_secret.clone(),
            tx,
        });

        let addr = format!("{}:{}", self.config.listen_host, self.config.listen_port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| BotError::Channel(format!("webhook failed to bind {addr}: {e}")))?;

        info!("Telegram webhook server listening on {addr}");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                error!("webhook server error: {e}");
            }
        });

        Ok(rx)
    }

    async fn deliver(
        &self,
        chat_id: i64,
        reply_to: Option<i64>,
        text: &str,
    ) -> Result<(), BotError> {
        self.send_message(chat_id, reply_to, text).await
    }

    async fn send_typing(&self, chat_id: i64) -> Result<(), BotError> {
        self.chat_action(chat_id, "typing").await
    }

    async fn stop(&self) -> Result<(), BotError> {
        info!("Telegram channel stopped");
        Ok(())
    }
}

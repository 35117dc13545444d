use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChannelConfig {
    pub telegram: Option<TelegramConfig>,
}

/// Telegram bot config (webhook transport).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub bot_token: String,
    /// Secret echoed back by Telegram in the webhook header.
    #[serde(default = "default_webhook_secret")]
    pub webhook_secret: String,
    /// Public base URL for webhook self-registration. Empty = skip setWebhook.
    #[serde(default)]
    pub webhook_base_url: String,
    #[serde(default = "default_listen_host")]
    pub listen_host: String,
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bot_token: String::new(),
            webhook_secret: default_webhook_secret(),
            webhook_base_url: String::new(),
            listen_host: default_listen_host(),
            listen_port: default_listen_port(),
        }
    }
}

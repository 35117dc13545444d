//! Gateway — the event loop connecting the channel, the dialog store,
//! and the completion provider.

mod pipeline;

use std::sync::{Arc, OnceLock};
use tolyan_core::{
    config::{Config, ContentMode},
    mood::Mood,
    persona::PersonaCache,
    traits::{Channel, Provider},
    trigger::BotIdentity,
};
use tolyan_memory::DialogStore;
use tracing::{error, info, warn};

/// The central gateway routing messages between the channel and the provider.
pub struct Gateway {
    provider: Arc<dyn Provider>,
    channel: Arc<dyn Channel>,
    dialogs: DialogStore,
    persona: PersonaCache,
    /// Picked once at startup, immutable afterwards.
    mood: Mood,
    content_mode: ContentMode,
    /// Speaker label for the bot's own recorded turns.
    bot_name: String,
    /// Resolved once before the event loop; empty while the lookup is
    /// outstanding or failed.
    identity: OnceLock<BotIdentity>,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(
        provider: Arc<dyn Provider>,
        channel: Arc<dyn Channel>,
        persona: PersonaCache,
        mood: Mood,
        cfg: &Config,
    ) -> Self {
        Self {
            provider,
            channel,
            dialogs: DialogStore::new(),
            persona,
            mood,
            content_mode: cfg.bot.content_mode,
            bot_name: cfg.bot.name.clone(),
            identity: OnceLock::new(),
        }
    }

    /// Run the main event loop until the channel closes or ctrl-c.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        info!(
            "Today's mood: {} — {}",
            self.mood.display_name(),
            self.mood.directive()
        );

        match self.channel.identity().await {
            Ok(me) => {
                info!("Bot: id={} username=@{}", me.id, me.username);
                let _ = self.identity.set(me);
            }
            Err(e) => {
                error!("identity lookup failed, mention and reply triggers disabled: {e}");
            }
        }

        let mut rx = self
            .channel
            .start()
            .await
            .map_err(|e| anyhow::anyhow!("failed to start channel {}: {e}", self.channel.name()))?;

        info!(
            "Tolyan gateway running | provider: {} | channel: {} | mode: {}",
            self.provider.name(),
            self.channel.name(),
            self.content_mode.display_name(),
        );

        loop {
            tokio::select! {
                maybe = rx.recv() => match maybe {
                    Some(inbound) => {
                        let gw = self.clone();
                        tokio::spawn(async move {
                            gw.handle_update(inbound).await;
                        });
                    }
                    None => {
                        info!("channel closed, shutting down");
                        break;
                    }
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        if let Err(e) = self.channel.stop().await {
            warn!("failed to stop channel: {e}");
        }
        Ok(())
    }
}

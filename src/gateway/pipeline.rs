//! Message processing pipeline — the handle_update flow.

use super::Gateway;
use tolyan_core::{context::Context, message::InboundMessage, prompt, reply, trigger};
use tracing::{debug, error, info, warn};

impl Gateway {
    /// Process a single inbound message through the full pipeline.
    pub(super) async fn handle_update(&self, inbound: InboundMessage) {
        // --- 1. GATE ---
        if !trigger::should_respond(&inbound, self.identity.get()) {
            return;
        }

        let text = inbound.text.as_deref().unwrap_or("");
        let preview: String = text.chars().take(60).collect();
        info!(
            "[{}] {} says: {}",
            inbound.chat_title, inbound.author, preview
        );

        // --- 2. RECORD USER TURN ---
        self.dialogs.remember(inbound.chat_id, &inbound.author, text);

        // --- 3. HARD-BAN CHECK ---
        if self.content_mode.is_permissive() && reply::is_hard_banned(text) {
            warn!(
                "hard-banned topic from {} in chat {}",
                inbound.author, inbound.chat_id
            );
            self.deliver(&inbound, reply::HARD_BAN_REFUSAL).await;
            self.dialogs
                .remember(inbound.chat_id, &self.bot_name, reply::HARD_BAN_REFUSAL);
            return;
        }

        // --- 4. TYPING INDICATOR ---
        if let Err(e) = self.channel.send_typing(inbound.chat_id).await {
            debug!("typing indicator failed: {e}");
        }

        // --- 5. COMPOSE PROMPT ---
        let persona = self.persona.load();
        let context_block = self.dialogs.render(inbound.chat_id);
        let (system, user) = {
            let mut rng = rand::thread_rng();
            prompt::compose(
                &inbound,
                &persona,
                self.mood,
                self.content_mode,
                &context_block,
                &mut rng,
            )
        };

        // --- 6. COMPLETION ---
        let raw = match self.provider.complete(&Context::new(system, user)).await {
            Ok(text) => text,
            Err(e) => {
                error!("completion failed, staying silent: {e}");
                return;
            }
        };

        // --- 7. SANITIZE ---
        let final_text = reply::sanitize(&raw, self.content_mode);
        if final_text.is_empty() {
            warn!("reply empty after sanitation, nothing to send");
            return;
        }

        // --- 8. DELIVER + RECORD BOT TURN ---
        self.deliver(&inbound, &final_text).await;
        self.dialogs
            .remember(inbound.chat_id, &self.bot_name, &final_text);
    }

    /// Send a reply anchored to the triggering message. Failures are logged,
    /// never retried.
    async fn deliver(&self, inbound: &InboundMessage, text: &str) {
        if let Err(e) = self
            .channel
            .deliver(inbound.chat_id, Some(inbound.message_id), text)
            .await
        {
            error!("delivery failed for chat {}: {e}", inbound.chat_id);
        }
    }
}

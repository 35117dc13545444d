use crate::{context::Context, error::BotError, message::InboundMessage, trigger::BotIdentity};
use async_trait::async_trait;

/// Completion provider trait — the brain.
///
/// Every language-model backend implements this trait to provide
/// a uniform `(system, user) -> reply text` interface.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider requires an API key to function.
    fn requires_api_key(&self) -> bool;

    /// Request a completion for the composed prompt.
    async fn complete(&self, context: &Context) -> Result<String, BotError>;

    /// Check if the provider is reachable and ready.
    async fn is_available(&self) -> bool;
}

/// Messaging channel trait — the transport.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Resolve the bot's own account identity.
    async fn identity(&self) -> Result<BotIdentity, BotError>;

    /// Start receiving inbound messages.
    /// Returns a receiver that yields incoming messages.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<InboundMessage>, BotError>;

    /// Send a reply into a chat, optionally anchored to a message.
    async fn deliver(
        &self,
        chat_id: i64,
        reply_to: Option<i64>,
        text: &str,
    ) -> Result<(), BotError>;

    /// Show a typing indicator while a reply is being prepared.
    async fn send_typing(&self, _chat_id: i64) -> Result<(), BotError> {
        Ok(())
    }

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), BotError>;
}

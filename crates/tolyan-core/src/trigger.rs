//! Response gating: decide whether an inbound message warrants a reply.

use crate::message::InboundMessage;
use serde::{Deserialize, Serialize};

/// The bot's own account, resolved once at startup.
///
/// While unresolved, every identity-dependent check evaluates false;
/// word triggers keep working.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotIdentity {
    pub id: i64,
    /// Account handle without the leading `@`.
    pub username: String,
}

/// Name variants the bot answers to when a message starts with them.
const TRIGGER_WORDS: &[&str] = &["бот", "толян", "толяныч", "бесович"];

/// Whether the bot should answer this message.
///
/// Only group chats qualify. Within a group, any of: the bot's handle is
/// mentioned, the text starts with a name variant, or the message directly
/// replies to one of the bot's own messages.
pub fn should_respond(msg: &InboundMessage, identity: Option<&BotIdentity>) -> bool {
    if !msg.chat_kind.is_group() {
        return false;
    }
    let text = msg.text.as_deref();
    mentions_bot(text, identity) || starts_with_trigger(text) || is_reply_to_bot(msg, identity)
}

fn mentions_bot(text: Option<&str>, identity: Option<&BotIdentity>) -> bool {
    let (Some(text), Some(identity)) = (text, identity) else {
        return false;
    };
    if identity.username.is_empty() {
        return false;
    }
    let handle = format!("@{}", identity.username.to_lowercase());
    text.to_lowercase().contains(&handle)
}

fn starts_with_trigger(text: Option<&str>) -> bool {
    let Some(text) = text else {
        return false;
    };
    let t = text.trim().to_lowercase();
    TRIGGER_WORDS.iter().any(|w| t.starts_with(w))
}

fn is_reply_to_bot(msg: &InboundMessage, identity: Option<&BotIdentity>) -> bool {
    let (Some(reply), Some(identity)) = (msg.reply_to.as_ref(), identity) else {
        return false;
    };
    reply.sender_is_bot && reply.sender_id == identity.id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{ChatKind, ReplyRef};
    use chrono::Utc;

    fn group_msg(text: Option<&str>) -> InboundMessage {
        InboundMessage {
            chat_id: -100123,
            chat_kind: ChatKind::Supergroup,
            chat_title: "Двор".into(),
            message_id: 1,
            author: "Саня".into(),
            text: text.map(String::from),
            reply_to: None,
            timestamp: Utc::now(),
        }
    }

    fn identity() -> BotIdentity {
        BotIdentity {
            id: 777,
            username: "tolyan_bot".into(),
        }
    }

    #[test]
    fn test_private_chat_never_triggers() {
        let mut msg = group_msg(Some("Толян, привет"));
        msg.chat_kind = ChatKind::Private;
        assert!(!should_respond(&msg, Some(&identity())));
    }

    #[test]
    fn test_mention_triggers_case_insensitive() {
        let msg = group_msg(Some("эй @Tolyan_Bot глянь"));
        assert!(should_respond(&msg, Some(&identity())));
    }

    #[test]
    fn test_trigger_word_at_start() {
        let msg = group_msg(Some("Толян, привет, как дела?"));
        assert!(should_respond(&msg, Some(&identity())));
        // Word triggers do not need a resolved identity.
        assert!(should_respond(&msg, None));
    }

    #[test]
    fn test_trigger_word_mid_text_does_not_fire() {
        let msg = group_msg(Some("а где наш толян?"));
        assert!(!should_respond(&msg, Some(&identity())));
    }

    #[test]
    fn test_reply_to_bot_triggers() {
        let mut msg = group_msg(Some("согласен"));
        msg.reply_to = Some(ReplyRef {
            message_id: 41,
            sender_id: 777,
            sender_is_bot: true,
        });
        assert!(should_respond(&msg, Some(&identity())));
    }

    #[test]
    fn test_reply_to_other_bot_does_not_trigger() {
        let mut msg = group_msg(Some("согласен"));
        msg.reply_to = Some(ReplyRef {
            message_id: 41,
            sender_id: 888,
            sender_is_bot: true,
        });
        assert!(!should_respond(&msg, Some(&identity())));
    }

    #[test]
    fn test_reply_to_human_does_not_trigger() {
        let mut msg = group_msg(Some("согласен"));
        msg.reply_to = Some(ReplyRef {
            message_id: 41,
            sender_id: 777,
            sender_is_bot: false,
        });
        assert!(!should_respond(&msg, Some(&identity())));
    }

    #[test]
    fn test_absent_text_and_identity_is_quiet() {
        let msg = group_msg(None);
        assert!(!should_respond(&msg, None));
        assert!(!should_respond(&msg, Some(&identity())));
    }

    #[test]
    fn test_unresolved_identity_disables_mentions_only() {
        let msg = group_msg(Some("эй @tolyan_bot глянь"));
        assert!(!should_respond(&msg, None));
    }
}

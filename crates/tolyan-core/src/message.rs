use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of chat a message arrived from.
///
/// Only group-like chats (`Group`, `Supergroup`) are ever answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
    #[serde(other)]
    Unknown,
}

impl ChatKind {
    /// Map the platform's chat `type` string.
    pub fn from_api(s: &str) -> Self {
        match s {
            "private" => Self::Private,
            "group" => Self::Group,
            "supergroup" => Self::Supergroup,
            "channel" => Self::Channel,
            _ => Self::Unknown,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group | Self::Supergroup)
    }
}

/// The message an inbound message replies to, reduced to what trigger
/// evaluation needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyRef {
    pub message_id: i64,
    /// Sender of the replied-to message.
    pub sender_id: i64,
    pub sender_is_bot: bool,
}

/// An incoming message from the channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Stable chat identifier.
    pub chat_id: i64,
    pub chat_kind: ChatKind,
    /// Chat title, with a generic fallback when the platform supplies none.
    pub chat_title: String,
    pub message_id: i64,
    /// Human-readable author name.
    pub author: String,
    /// Message text; absent for stickers, photos, service messages.
    pub text: Option<String>,
    /// Present when this message is a direct reply.
    pub reply_to: Option<ReplyRef>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_kind_from_api() {
        assert_eq!(ChatKind::from_api("group"), ChatKind::Group);
        assert_eq!(ChatKind::from_api("supergroup"), ChatKind::Supergroup);
        assert_eq!(ChatKind::from_api("private"), ChatKind::Private);
        assert_eq!(ChatKind::from_api("channel"), ChatKind::Channel);
        assert_eq!(ChatKind::from_api(""), ChatKind::Unknown);
        assert_eq!(ChatKind::from_api("whatever"), ChatKind::Unknown);
    }

    #[test]
    fn test_only_group_like_kinds_are_group() {
        assert!(ChatKind::Group.is_group());
        assert!(ChatKind::Supergroup.is_group());
        assert!(!ChatKind::Private.is_group());
        assert!(!ChatKind::Channel.is_group());
        assert!(!ChatKind::Unknown.is_group());
    }
}

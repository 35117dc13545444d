//! Telegram Bot API wire types and their mapping onto the domain model.

use chrono::Utc;
use serde::Deserialize;
use tolyan_core::message::{ChatKind, InboundMessage, ReplyRef};

#[derive(Debug, Deserialize)]
pub(crate) struct TgResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgUpdate {
    #[allow(dead_code)]
    pub update_id: i64,
    pub message: Option<TgMessage>,
    pub edited_message: Option<TgMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgMessage {
    pub message_id: i64,
    pub from: Option<TgUser>,
    pub chat: TgChat,
    pub text: Option<String>,
    pub reply_to_message: Option<Box<TgMessage>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgUser {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgChat {
    pub id: i64,
    /// Chat type: "private", "group", "supergroup", or "channel".
    #[serde(default, rename = "type")]
    pub chat_type: String,
    pub title: Option<String>,
    pub username: Option<String>,
}

impl TgUpdate {
    /// Extract the carried message, edited or not, as a domain message.
    pub(crate) fn into_inbound(self) -> Option<InboundMessage> {
        self.message
            .or(self.edited_message)
            .map(TgMessage::into_inbound)
    }
}

impl TgMessage {
    fn into_inbound(self) -> InboundMessage {
        let author = self
            .from
            .as_ref()
            .map(display_name)
            .unwrap_or_else(|| "пользователь".to_string());
        let chat_title = self
            .chat
            .title
            .or(self.chat.username)
            .unwrap_or_else(|| "групповой чат".to_string());
        let reply_to = self.reply_to_message.as_deref().and_then(|replied| {
            replied.from.as_ref().map(|sender| ReplyRef {
                message_id: replied.message_id,
                sender_id: sender.id,
                sender_is_bot: sender.is_bot,
            })
        });

        InboundMessage {
            chat_id: self.chat.id,
            chat_kind: ChatKind::from_api(&self.chat.chat_type),
            chat_title,
            message_id: self.message_id,
            author,
            text: self.text,
            reply_to,
            timestamp: Utc::now(),
        }
    }
}

fn display_name(user: &TgUser) -> String {
    let full = match user.last_name.as_deref() {
        Some(last) => format!("{} {last}", user.first_name),
        None => user.first_name.clone(),
    };
    let full = full.trim().to_string();
    if !full.is_empty() {
        full
    } else {
        user.username
            .clone()
            .unwrap_or_else(|| "пользователь".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tg_chat_group_detection() {
        let group: TgChat = serde_json::from_str(r#"{"id": -100123, "type": "group"}"#).unwrap();
        assert_eq!(ChatKind::from_api(&group.chat_type), ChatKind::Group);

        let supergroup: TgChat =
            serde_json::from_str(r#"{"id": -100456, "type": "supergroup"}"#).unwrap();
        assert_eq!(ChatKind::from_api(&supergroup.chat_type), ChatKind::Supergroup);

        let private: TgChat = serde_json::from_str(r#"{"id": 789, "type": "private"}"#).unwrap();
        assert_eq!(ChatKind::from_api(&private.chat_type), ChatKind::Private);
    }

    #[test]
    fn test_tg_chat_type_defaults_when_missing() {
        let chat: TgChat = serde_json::from_str(r#"{"id": 123}"#).unwrap();
        assert_eq!(chat.chat_type, "");
        assert!(!ChatKind::from_api(&chat.chat_type).is_group());
    }

    #[test]
    fn test_update_with_message_maps_to_inbound() {
        let json = r#"{
            "update_id": 5,
            "message": {
                "message_id": 42,
                "from": {"id": 10, "is_bot": false, "first_name": "Саня", "last_name": "Пушкин"},
                "chat": {"id": -100123, "type": "supergroup", "title": "Двор"},
                "text": "Толян, привет"
            }
        }"#;
        let update: TgUpdate = serde_json::from_str(json).unwrap();
        let inbound = update.into_inbound().unwrap();
        assert_eq!(inbound.chat_id, -100123);
        assert_eq!(inbound.chat_kind, ChatKind::Supergroup);
        assert_eq!(inbound.chat_title, "Двор");
        assert_eq!(inbound.message_id, 42);
        assert_eq!(inbound.author, "Саня Пушкин");
        assert_eq!(inbound.text.as_deref(), Some("Толян, привет"));
        assert!(inbound.reply_to.is_none());
    }

    #[test]
    fn test_edited_message_is_used_when_no_message() {
        let json = r#"{
            "update_id": 6,
            "edited_message": {
                "message_id": 43,
                "from": {"id": 10, "first_name": "Саня"},
                "chat": {"id": -1, "type": "group"},
                "text": "поправил"
            }
        }"#;
        let update: TgUpdate = serde_json::from_str(json).unwrap();
        let inbound = update.into_inbound().unwrap();
        assert_eq!(inbound.text.as_deref(), Some("поправил"));
    }

    #[test]
    fn test_update_without_message_is_none() {
        let update: TgUpdate = serde_json::from_str(r#"{"update_id": 7}"#).unwrap();
        assert!(update.into_inbound().is_none());
    }

    #[test]
    fn test_reply_reference_is_extracted() {
        let json = r#"{
            "update_id": 8,
            "message": {
                "message_id": 50,
                "from": {"id": 10, "first_name": "Саня"},
                "chat": {"id": -1, "type": "group"},
                "text": "ну да",
                "reply_to_message": {
                    "message_id": 49,
                    "from": {"id": 777, "is_bot": true, "first_name": "Толян"},
                    "chat": {"id": -1, "type": "group"},
                    "text": "спорно"
                }
            }
        }"#;
        let update: TgUpdate = serde_json::from_str(json).unwrap();
        let inbound = update.into_inbound().unwrap();
        let reply = inbound.reply_to.unwrap();
        assert_eq!(reply.message_id, 49);
        assert_eq!(reply.sender_id, 777);
        assert!(reply.sender_is_bot);
    }

    #[test]
    fn test_author_falls_back_to_username() {
        let json = r#"{
            "update_id": 9,
            "message": {
                "message_id": 1,
                "from": {"id": 10, "first_name": " ", "username": "sanya"},
                "chat": {"id": -1, "type": "group"},
                "text": "эй"
            }
        }"#;
        let update: TgUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.into_inbound().unwrap().author, "sanya");
    }

    #[test]
    fn test_chat_title_falls_back_to_username_then_generic() {
        let json = r#"{
            "update_id": 10,
            "message": {
                "message_id": 1,
                "from": {"id": 10, "first_name": "Саня"},
                "chat": {"id": -1, "type": "group", "username": "dvor_chat"},
                "text": "эй"
            }
        }"#;
        let update: TgUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.into_inbound().unwrap().chat_title, "dvor_chat");

        let json = r#"{
            "update_id": 11,
            "message": {
                "message_id": 1,
                "from": {"id": 10, "first_name": "Саня"},
                "chat": {"id": -1, "type": "group"},
                "text": "эй"
            }
        }"#;
        let update: TgUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.into_inbound().unwrap().chat_title, "групповой чат");
    }

    #[test]
    fn test_message_without_text() {
        let json = r#"{
            "update_id": 12,
            "message": {
                "message_id": 1,
                "from": {"id": 10, "first_name": "Саня"},
                "chat": {"id": -1, "type": "group"}
            }
        }"#;
        let update: TgUpdate = serde_json::from_str(json).unwrap();
        assert!(update.into_inbound().unwrap().text.is_none());
    }
}

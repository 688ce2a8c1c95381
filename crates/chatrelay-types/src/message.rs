//! Message projection exposed by the message-history endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::telegram::MessageInfo;

/// Placeholder content for messages that carry media instead of text.
pub const MEDIA_PLACEHOLDER: &str = "Media";

/// Placeholder content for messages with neither text nor recognizable media.
pub const UNKNOWN_PLACEHOLDER: &str = "Unknown type";

/// Whether a message body is textual or media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Media,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageType::Text => write!(f, "text"),
            MessageType::Media => write!(f, "media"),
        }
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(MessageType::Text),
            "media" => Ok(MessageType::Media),
            other => Err(format!("invalid message type: '{other}'")),
        }
    }
}

/// Whether the authenticated account authored the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Sent,
    Received,
}

impl fmt::Display for SenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SenderType::Sent => write!(f, "sent"),
            SenderType::Received => write!(f, "received"),
        }
    }
}

/// The external shape of a single message in a chat history response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: i32,
    /// Unix timestamp in seconds, matching the provider's message date.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,
    pub content: String,
    pub message_type: MessageType,
    pub sender_type: SenderType,
}

impl From<MessageInfo> for MessageView {
    fn from(message: MessageInfo) -> Self {
        let (message_type, content) = match message.text {
            Some(text) if !text.is_empty() => (MessageType::Text, text),
            _ if message.has_media => (MessageType::Media, MEDIA_PLACEHOLDER.to_string()),
            _ => (MessageType::Media, UNKNOWN_PLACEHOLDER.to_string()),
        };

        Self {
            id: message.id,
            date: message.date,
            content,
            message_type,
            sender_type: if message.outgoing {
                SenderType::Sent
            } else {
                SenderType::Received
            },
        }
    }
}

/// Chat history response body: the resolved chat partner plus the projected
/// messages in ascending date order.
///
/// `chatmate_name` is `None` for group chats -- the partner heuristic is
/// only meaningful for one-to-one conversations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistory {
    pub chatmate_name: Option<String>,
    pub messages: Vec<MessageView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn info(text: Option<&str>, has_media: bool, outgoing: bool) -> MessageInfo {
        MessageInfo {
            id: 1,
            date: Utc.with_ymd_and_hms(2024, 11, 5, 12, 0, 0).unwrap(),
            text: text.map(str::to_string),
            has_media,
            outgoing,
        }
    }

    #[test]
    fn test_text_message_projection() {
        let view = MessageView::from(info(Some("hello"), false, true));
        assert_eq!(view.message_type, MessageType::Text);
        assert_eq!(view.content, "hello");
        assert_eq!(view.sender_type, SenderType::Sent);
    }

    #[test]
    fn test_media_message_projection() {
        let view = MessageView::from(info(None, true, false));
        assert_eq!(view.message_type, MessageType::Media);
        assert_eq!(view.content, MEDIA_PLACEHOLDER);
        assert_eq!(view.sender_type, SenderType::Received);
    }

    #[test]
    fn test_unknown_message_projection() {
        let view = MessageView::from(info(None, false, false));
        assert_eq!(view.message_type, MessageType::Media);
        assert_eq!(view.content, UNKNOWN_PLACEHOLDER);
    }

    #[test]
    fn test_empty_text_counts_as_non_text() {
        let view = MessageView::from(info(Some(""), true, false));
        assert_eq!(view.message_type, MessageType::Media);
        assert_eq!(view.content, MEDIA_PLACEHOLDER);
    }

    #[test]
    fn test_message_type_roundtrip() {
        for ty in [MessageType::Text, MessageType::Media] {
            let parsed: MessageType = ty.to_string().parse().unwrap();
            assert_eq!(parsed, ty);
        }
    }

    #[test]
    fn test_view_serializes_camel_case_with_unix_date() {
        let view = MessageView::from(info(Some("hi"), false, true));
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["messageType"], "text");
        assert_eq!(value["senderType"], "sent");
        assert!(value["date"].is_i64());
    }
}

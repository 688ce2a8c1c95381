//! Provider-facing data shapes returned by the Telegram gateway.
//!
//! These types carry what the protocol client reports before projection.
//! They intentionally include fields (pinned state, message previews) that
//! the public API must never expose -- projection into the external shapes
//! happens in `chatrelay-types::{conversation,message}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Correlation token for an in-flight login: issued on code request, echoed
/// back by the caller on code submission. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingLogin {
    pub phone_number: String,
    pub phone_code_hash: String,
}

/// A dialog (chat/group/channel) as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogInfo {
    pub id: i64,
    pub title: String,
    pub unread_count: i32,
    pub is_channel: bool,
    pub is_group: bool,
    pub is_user: bool,
    /// Provider extra; dropped by the conversation projection.
    pub pinned: bool,
    /// Provider extra; dropped by the conversation projection.
    pub last_message: Option<String>,
}

/// A chat participant as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    /// True when this participant is the authenticated account itself.
    pub is_self: bool,
}

impl ParticipantInfo {
    /// Display name for a chat partner: first name, else last name, else
    /// username, else a fixed fallback label.
    pub fn display_name(&self) -> String {
        self.first_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.last_name.as_deref().filter(|s| !s.is_empty()))
            .or(self.username.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("No name")
            .to_string()
    }
}

/// A message as reported by the provider, before projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageInfo {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub text: Option<String>,
    pub has_media: bool,
    /// True when the authenticated account authored the message.
    pub outgoing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant() -> ParticipantInfo {
        ParticipantInfo {
            id: 42,
            first_name: None,
            last_name: None,
            username: None,
            is_self: false,
        }
    }

    #[test]
    fn test_display_name_prefers_first_name() {
        let mut p = participant();
        p.first_name = Some("Ada".to_string());
        p.last_name = Some("Lovelace".to_string());
        p.username = Some("ada".to_string());
        assert_eq!(p.display_name(), "Ada");
    }

    #[test]
    fn test_display_name_falls_back_to_last_name_then_username() {
        let mut p = participant();
        p.last_name = Some("Lovelace".to_string());
        assert_eq!(p.display_name(), "Lovelace");

        let mut p = participant();
        p.username = Some("ada".to_string());
        assert_eq!(p.display_name(), "ada");
    }

    #[test]
    fn test_display_name_fallback_label() {
        assert_eq!(participant().display_name(), "No name");
    }

    #[test]
    fn test_display_name_skips_empty_strings() {
        let mut p = participant();
        p.first_name = Some(String::new());
        p.username = Some("ada".to_string());
        assert_eq!(p.display_name(), "ada");
    }
}

//! Conversation projection exposed by the chat-list endpoint.

use serde::{Deserialize, Serialize};

use crate::telegram::DialogInfo;

/// The external shape of a conversation (chat, group, or channel).
///
/// Deliberately a closed six-field projection: everything else the provider
/// attaches to a dialog (pinned state, draft, message preview, raw peer
/// objects) is dropped here so oversized or self-referential provider data
/// never reaches API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: i64,
    pub name: String,
    pub unread_count: i32,
    pub is_channel: bool,
    pub is_group: bool,
    pub is_user: bool,
}

impl From<DialogInfo> for Conversation {
    fn from(dialog: DialogInfo) -> Self {
        Self {
            id: dialog.id,
            name: dialog.title,
            unread_count: dialog.unread_count,
            is_channel: dialog.is_channel,
            is_group: dialog.is_group,
            is_user: dialog.is_user,
        }
    }
}

//! Conversation/message access layer.
//!
//! Read-only queries over a previously stored credential: list the account's
//! conversations, or fetch the recent history of one chat. Neither query
//! mutates the credential store.

use chrono::Utc;
use tracing::debug;

use chatrelay_types::conversation::Conversation;
use chatrelay_types::credential::SessionBlob;
use chatrelay_types::error::RelayError;
use chatrelay_types::message::{ChatHistory, MessageView};

use crate::repository::credential::CredentialRepository;
use crate::session::is_session_valid;
use crate::telegram::TelegramGateway;

/// Maximum messages returned per history request.
pub const HISTORY_LIMIT: usize = 50;

/// Answers the two read queries of the relay using a stored credential.
pub struct ChatService<R: CredentialRepository, G: TelegramGateway> {
    repo: R,
    gateway: G,
}

impl<R: CredentialRepository, G: TelegramGateway> ChatService<R, G> {
    pub fn new(repo: R, gateway: G) -> Self {
        Self { repo, gateway }
    }

    /// Load the stored credential for a phone number and check it against
    /// the validity policy. Not-found and staleness both fail here, before
    /// any provider call is made.
    async fn load_valid_session(&self, phone_number: &str) -> Result<SessionBlob, RelayError> {
        let record = self
            .repo
            .find_by_phone(phone_number)
            .await?
            .ok_or_else(|| RelayError::NotFound("user".to_string()))?;

        if !is_session_valid(&record, Utc::now()) {
            debug!(phone = %phone_number, "stored session is stale");
            return Err(RelayError::Auth(
                "session expired, log in again".to_string(),
            ));
        }

        Ok(record.session)
    }

    /// List all conversations of the account, in provider order.
    pub async fn list_conversations(
        &self,
        phone_number: &str,
    ) -> Result<Vec<Conversation>, RelayError> {
        if phone_number.trim().is_empty() {
            return Err(RelayError::Input("phone_number is required".to_string()));
        }

        let session = self.load_valid_session(phone_number).await?;
        let dialogs = self.gateway.list_dialogs(phone_number, &session).await?;

        Ok(dialogs.into_iter().map(Conversation::from).collect())
    }

    /// Fetch the recent history of one chat, ascending by date.
    ///
    /// The chat partner is reported only when the chat has exactly one
    /// participant besides the authenticated account -- the exclude-self
    /// heuristic is meaningless for group chats, so those get no
    /// `chatmate_name` rather than an arbitrary member's.
    pub async fn list_messages(
        &self,
        phone_number: &str,
        chat_id: i64,
    ) -> Result<ChatHistory, RelayError> {
        if phone_number.trim().is_empty() {
            return Err(RelayError::Input("phone_number is required".to_string()));
        }

        let session = self.load_valid_session(phone_number).await?;

        let participants = self
            .gateway
            .chat_participants(phone_number, &session, chat_id)
            .await?;
        let mut others = participants.iter().filter(|p| !p.is_self);
        let chatmate_name = match (others.next(), others.next()) {
            (Some(partner), None) => Some(partner.display_name()),
            _ => None,
        };

        let mut messages = self
            .gateway
            .recent_messages(phone_number, &session, chat_id, HISTORY_LIMIT)
            .await?;

        // Provider order is not guaranteed; history is served oldest first.
        messages.sort_by_key(|m| m.date);
        if messages.len() > HISTORY_LIMIT {
            let excess = messages.len() - HISTORY_LIMIT;
            messages.drain(..excess);
        }

        Ok(ChatHistory {
            chatmate_name,
            messages: messages.into_iter().map(MessageView::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SESSION_TTL_MS;
    use crate::testing::{GatewayScript, MockGateway, MockRepo};
    use chatrelay_types::credential::CredentialRecord;
    use chatrelay_types::error::GatewayError;
    use chatrelay_types::message::MessageType;
    use chatrelay_types::telegram::{DialogInfo, MessageInfo, ParticipantInfo};
    use chrono::{Duration, TimeZone, Utc};

    const PHONE: &str = "+15551234567";

    fn fresh_credential() -> CredentialRecord {
        CredentialRecord {
            phone_number: PHONE.to_string(),
            session: chatrelay_types::credential::SessionBlob::new("blob"),
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    fn service(script: GatewayScript) -> ChatService<MockRepo, MockGateway> {
        let repo = MockRepo::default();
        repo.insert_record(fresh_credential());
        ChatService::new(repo, MockGateway::new(script))
    }

    fn dialog(id: i64, title: &str) -> DialogInfo {
        DialogInfo {
            id,
            title: title.to_string(),
            unread_count: 0,
            is_channel: false,
            is_group: false,
            is_user: true,
            pinned: false,
            last_message: None,
        }
    }

    fn participant(id: i64, first_name: &str, is_self: bool) -> ParticipantInfo {
        ParticipantInfo {
            id,
            first_name: Some(first_name.to_string()),
            last_name: None,
            username: None,
            is_self,
        }
    }

    fn message(id: i32, minute: u32, text: Option<&str>) -> MessageInfo {
        MessageInfo {
            id,
            date: Utc.with_ymd_and_hms(2024, 11, 5, 12, minute, 0).unwrap(),
            text: text.map(str::to_string),
            has_media: text.is_none(),
            outgoing: false,
        }
    }

    #[tokio::test]
    async fn test_list_conversations_projects_dialogs() {
        let svc = service(GatewayScript {
            dialogs: Some(Ok(vec![dialog(1, "Alice"), dialog(2, "Bob")])),
            ..GatewayScript::default()
        });
        let conversations = svc.list_conversations(PHONE).await.unwrap();
        assert_eq!(conversations.len(), 2);
        assert_eq!(conversations[0].name, "Alice");
        // Provider ordering preserved, not re-sorted.
        assert_eq!(conversations[1].id, 2);
    }

    #[tokio::test]
    async fn test_list_conversations_unknown_phone_is_not_found() {
        let svc = ChatService::new(MockRepo::default(), MockGateway::new(GatewayScript::default()));
        let err = svc.list_conversations(PHONE).await.unwrap_err();
        assert!(matches!(err, RelayError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_stale_session_is_auth_error() {
        let repo = MockRepo::default();
        let mut record = fresh_credential();
        record.created_at = Some(Utc::now() - Duration::milliseconds(SESSION_TTL_MS + 1));
        repo.insert_record(record);
        let svc = ChatService::new(repo, MockGateway::new(GatewayScript::default()));

        let err = svc.list_conversations(PHONE).await.unwrap_err();
        assert!(matches!(err, RelayError::Auth(_)));
    }

    #[tokio::test]
    async fn test_upstream_dialog_failure_surfaces() {
        let svc = service(GatewayScript {
            dialogs: Some(Err(GatewayError::Rpc("AUTH_KEY_UNREGISTERED".to_string()))),
            ..GatewayScript::default()
        });
        let err = svc.list_conversations(PHONE).await.unwrap_err();
        assert!(matches!(err, RelayError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_messages_sorted_ascending_regardless_of_provider_order() {
        let svc = service(GatewayScript {
            participants: Some(Ok(vec![
                participant(1, "Me", true),
                participant(2, "Ada", false),
            ])),
            messages: Some(Ok(vec![
                message(3, 30, Some("newest")),
                message(1, 10, Some("oldest")),
                message(2, 20, Some("middle")),
            ])),
            ..GatewayScript::default()
        });
        let history = svc.list_messages(PHONE, 2).await.unwrap();

        let contents: Vec<&str> = history.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["oldest", "middle", "newest"]);
    }

    #[tokio::test]
    async fn test_chatmate_resolved_for_one_to_one_chat() {
        let svc = service(GatewayScript {
            participants: Some(Ok(vec![
                participant(1, "Me", true),
                participant(2, "Ada", false),
            ])),
            ..GatewayScript::default()
        });
        let history = svc.list_messages(PHONE, 2).await.unwrap();
        assert_eq!(history.chatmate_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_group_chat_has_no_chatmate() {
        let svc = service(GatewayScript {
            participants: Some(Ok(vec![
                participant(1, "Me", true),
                participant(2, "Ada", false),
                participant(3, "Grace", false),
            ])),
            ..GatewayScript::default()
        });
        let history = svc.list_messages(PHONE, 99).await.unwrap();
        assert!(history.chatmate_name.is_none());
    }

    #[tokio::test]
    async fn test_media_messages_get_placeholder() {
        let svc = service(GatewayScript {
            participants: Some(Ok(vec![
                participant(1, "Me", true),
                participant(2, "Ada", false),
            ])),
            messages: Some(Ok(vec![message(1, 0, None), message(2, 1, Some("hi"))])),
            ..GatewayScript::default()
        });
        let history = svc.list_messages(PHONE, 2).await.unwrap();

        assert_eq!(history.messages[0].message_type, MessageType::Media);
        assert_eq!(history.messages[0].content, "Media");
        assert_eq!(history.messages[1].message_type, MessageType::Text);
    }

    #[tokio::test]
    async fn test_history_capped_at_limit_keeping_newest() {
        let many: Vec<MessageInfo> = (0..60).map(|i| message(i, i as u32, Some("m"))).collect();
        let svc = service(GatewayScript {
            messages: Some(Ok(many)),
            ..GatewayScript::default()
        });
        let history = svc.list_messages(PHONE, 2).await.unwrap();

        assert_eq!(history.messages.len(), HISTORY_LIMIT);
        // The oldest overflow entries are the ones dropped.
        assert_eq!(history.messages.first().unwrap().id, 10);
        assert_eq!(history.messages.last().unwrap().id, 59);
    }
}

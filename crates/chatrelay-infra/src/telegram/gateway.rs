//! `TelegramGateway` implementation on top of grammers.
//!
//! Login state lives here, not in the client: the code hash handed to the
//! caller is a locally generated correlation token, and the grammers login
//! and password tokens it correlates with never leave the process.

use chatrelay_core::telegram::gateway::TelegramGateway;
use chatrelay_types::credential::SessionBlob;
use chatrelay_types::error::{GatewayError, SignInError};
use chatrelay_types::telegram::{DialogInfo, MessageInfo, ParticipantInfo, PendingLogin};
use grammers_client::types::{Chat, LoginToken, PasswordToken};
use grammers_client::{Client, SignInError as ClientSignInError};
use grammers_tl_types as tl;
use tracing::{debug, warn};
use uuid::Uuid;

use super::challenge::ChallengeLedger;
use super::pool::{ClientPool, encode_session_bytes};

/// grammers-backed gateway.
///
/// Holds one client per phone number plus the per-phone login state of
/// flows that have requested a code but not yet completed sign-in. Failed
/// attempts put the challenge back so the caller can retry with the same
/// `phone_code_hash` until the provider itself expires the code.
pub struct GrammersGateway {
    pool: ClientPool,
    challenges: ChallengeLedger<LoginToken, PasswordToken>,
}

impl GrammersGateway {
    pub fn new(api_id: i32, api_hash: String) -> Self {
        Self {
            pool: ClientPool::new(api_id, api_hash),
            challenges: ChallengeLedger::new(),
        }
    }

    fn export_session(&self, client: &Client) -> SessionBlob {
        encode_session_bytes(&client.session().save())
    }

    /// Resolve a chat by id from the account's dialog list.
    async fn find_chat(&self, client: &Client, chat_id: i64) -> Result<Chat, GatewayError> {
        let mut dialogs = client.iter_dialogs();
        while let Some(dialog) = dialogs
            .next()
            .await
            .map_err(|e| GatewayError::Rpc(e.to_string()))?
        {
            if dialog.chat().id() == chat_id {
                return Ok(dialog.chat().clone());
            }
        }
        Err(GatewayError::Rpc(format!(
            "chat {chat_id} is not in the account's dialogs"
        )))
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

impl TelegramGateway for GrammersGateway {
    async fn send_login_code(&self, phone_number: &str) -> Result<PendingLogin, GatewayError> {
        let client = self.pool.login_client(phone_number).await?;
        let token = client
            .request_login_code(phone_number)
            .await
            .map_err(|e| GatewayError::Rpc(e.to_string()))?;

        // Issuing a new code invalidates whatever challenge was in flight.
        let phone_code_hash = Uuid::now_v7().to_string();
        self.challenges
            .issue_code(phone_number, phone_code_hash.clone(), token);
        debug!(phone = %phone_number, "login code requested");

        Ok(PendingLogin {
            phone_number: phone_number.to_string(),
            phone_code_hash,
        })
    }

    async fn sign_in(
        &self,
        phone_number: &str,
        phone_code: &str,
        phone_code_hash: &str,
    ) -> Result<SessionBlob, SignInError> {
        let Some(pending) = self.challenges.take_code(phone_number, phone_code_hash) else {
            warn!(phone = %phone_number, "no matching code challenge, rejecting sign-in");
            return Err(SignInError::UnknownChallenge);
        };

        let client = match self.pool.login_client(phone_number).await {
            Ok(client) => client,
            Err(e) => {
                self.challenges.restore_code(phone_number, pending);
                return Err(SignInError::Gateway(e));
            }
        };

        match client.sign_in(&pending.token, phone_code).await {
            Ok(_user) => Ok(self.export_session(&client)),
            Err(ClientSignInError::PasswordRequired(token)) => {
                // The code is spent; the flow continues on the password path.
                self.challenges.store_password(phone_number, token);
                Err(SignInError::PasswordRequired)
            }
            Err(ClientSignInError::InvalidCode) => {
                // A mistyped code must not burn the challenge; the provider
                // decides when the code itself expires.
                self.challenges.restore_code(phone_number, pending);
                Err(SignInError::InvalidCode)
            }
            Err(other) => {
                self.challenges.restore_code(phone_number, pending);
                Err(SignInError::Gateway(GatewayError::Rpc(other.to_string())))
            }
        }
    }

    async fn check_password(
        &self,
        phone_number: &str,
        password: &str,
    ) -> Result<SessionBlob, SignInError> {
        let Some(token) = self.challenges.take_password(phone_number) else {
            return Err(SignInError::UnknownChallenge);
        };

        let client = match self.pool.login_client(phone_number).await {
            Ok(client) => client,
            Err(e) => {
                self.challenges.restore_password(phone_number, token);
                return Err(SignInError::Gateway(e));
            }
        };

        // grammers derives the SRP proof locally; the plaintext stays here.
        match client.check_password(token.clone(), password).await {
            Ok(_user) => Ok(self.export_session(&client)),
            Err(ClientSignInError::InvalidPassword) => {
                self.challenges.restore_password(phone_number, token);
                Err(SignInError::InvalidPassword)
            }
            Err(other) => {
                self.challenges.restore_password(phone_number, token);
                Err(SignInError::Gateway(GatewayError::Rpc(other.to_string())))
            }
        }
    }

    async fn list_dialogs(
        &self,
        phone_number: &str,
        session: &SessionBlob,
    ) -> Result<Vec<DialogInfo>, GatewayError> {
        let client = self.pool.session_client(phone_number, session).await?;

        let mut out = Vec::new();
        let mut dialogs = client.iter_dialogs();
        while let Some(dialog) = dialogs
            .next()
            .await
            .map_err(|e| GatewayError::Rpc(e.to_string()))?
        {
            let chat = dialog.chat();
            let (is_user, is_group, is_channel) = match chat {
                Chat::User(_) => (true, false, false),
                Chat::Group(_) => (false, true, false),
                Chat::Channel(_) => (false, false, true),
            };
            let (unread_count, pinned) = match &dialog.raw {
                tl::enums::Dialog::Dialog(d) => (d.unread_count, d.pinned),
                tl::enums::Dialog::Folder(f) => (f.unread_unmuted_messages_count, f.pinned),
            };

            out.push(DialogInfo {
                id: chat.id(),
                title: chat.name().to_string(),
                unread_count,
                is_channel,
                is_group,
                is_user,
                pinned,
                last_message: dialog
                    .last_message
                    .as_ref()
                    .and_then(|m| non_empty(m.text())),
            });
        }
        Ok(out)
    }

    async fn chat_participants(
        &self,
        phone_number: &str,
        session: &SessionBlob,
        chat_id: i64,
    ) -> Result<Vec<ParticipantInfo>, GatewayError> {
        let client = self.pool.session_client(phone_number, session).await?;
        let chat = self.find_chat(&client, chat_id).await?;

        let mut out = Vec::new();
        let mut participants = client.iter_participants(&chat);
        while let Some(participant) = participants
            .next()
            .await
            .map_err(|e| GatewayError::Rpc(e.to_string()))?
        {
            let user = &participant.user;
            out.push(ParticipantInfo {
                id: user.id(),
                first_name: non_empty(user.first_name()),
                last_name: user.last_name().and_then(non_empty),
                username: user.username().and_then(non_empty),
                is_self: user.is_self(),
            });
        }
        Ok(out)
    }

    async fn recent_messages(
        &self,
        phone_number: &str,
        session: &SessionBlob,
        chat_id: i64,
        limit: usize,
    ) -> Result<Vec<MessageInfo>, GatewayError> {
        let client = self.pool.session_client(phone_number, session).await?;
        let chat = self.find_chat(&client, chat_id).await?;

        let mut out = Vec::new();
        let mut messages = client.iter_messages(&chat).limit(limit);
        while let Some(message) = messages
            .next()
            .await
            .map_err(|e| GatewayError::Rpc(e.to_string()))?
        {
            out.push(MessageInfo {
                id: message.id(),
                date: message.date(),
                text: non_empty(message.text()),
                has_media: message.media().is_some(),
                outgoing: message.outgoing(),
            });
        }
        Ok(out)
    }
}

//! TelegramGateway trait definition.
//!
//! This is the capability surface consumed from the messaging-protocol
//! client. Uses native async fn in traits (RPITIT, Rust 2024 edition);
//! the concrete adapter in chatrelay-infra keys one connected client per
//! phone number, so nothing here races on shared session state.

use chatrelay_types::credential::SessionBlob;
use chatrelay_types::error::{GatewayError, SignInError};
use chatrelay_types::telegram::{DialogInfo, MessageInfo, ParticipantInfo, PendingLogin};

/// Trait for the messaging-protocol client backend.
///
/// Login operations are keyed by phone number because the adapter holds the
/// in-flight login state (code hash, password challenge) per phone. Read
/// operations additionally take the stored session blob, which the adapter
/// loads into the phone's client before delegating.
pub trait TelegramGateway: Send + Sync {
    /// Ask the provider to send a verification code to the phone.
    /// Returns the pending login challenge the caller must echo back.
    fn send_login_code(
        &self,
        phone_number: &str,
    ) -> impl std::future::Future<Output = Result<PendingLogin, GatewayError>> + Send;

    /// Attempt sign-in with the code the user received.
    ///
    /// Fails with [`SignInError::PasswordRequired`] when the account has
    /// two-factor auth enabled; the flow then completes via
    /// [`TelegramGateway::check_password`]. An unknown `phone_code_hash`
    /// fails closed with [`SignInError::UnknownChallenge`].
    fn sign_in(
        &self,
        phone_number: &str,
        phone_code: &str,
        phone_code_hash: &str,
    ) -> impl std::future::Future<Output = Result<SessionBlob, SignInError>> + Send;

    /// Complete a password-required sign-in.
    ///
    /// The adapter fetches the account's password parameters, derives the
    /// salted SRP proof from the plaintext locally, and submits only the
    /// proof. The plaintext never leaves the process.
    fn check_password(
        &self,
        phone_number: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<SessionBlob, SignInError>> + Send;

    /// Fetch the full dialog set for the account, in provider order.
    fn list_dialogs(
        &self,
        phone_number: &str,
        session: &SessionBlob,
    ) -> impl std::future::Future<Output = Result<Vec<DialogInfo>, GatewayError>> + Send;

    /// Fetch the participant list of a chat.
    fn chat_participants(
        &self,
        phone_number: &str,
        session: &SessionBlob,
        chat_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<ParticipantInfo>, GatewayError>> + Send;

    /// Fetch up to `limit` most-recent messages of a chat. Order is
    /// whatever the provider returns; callers must not rely on it.
    fn recent_messages(
        &self,
        phone_number: &str,
        session: &SessionBlob,
        chat_id: i64,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<MessageInfo>, GatewayError>> + Send;
}

// The auth flow and the access layer share one gateway (and with it the
// per-phone client pool), so the trait passes through Arc.
impl<G: TelegramGateway> TelegramGateway for std::sync::Arc<G> {
    async fn send_login_code(&self, phone_number: &str) -> Result<PendingLogin, GatewayError> {
        (**self).send_login_code(phone_number).await
    }

    async fn sign_in(
        &self,
        phone_number: &str,
        phone_code: &str,
        phone_code_hash: &str,
    ) -> Result<SessionBlob, SignInError> {
        (**self).sign_in(phone_number, phone_code, phone_code_hash).await
    }

    async fn check_password(
        &self,
        phone_number: &str,
        password: &str,
    ) -> Result<SessionBlob, SignInError> {
        (**self).check_password(phone_number, password).await
    }

    async fn list_dialogs(
        &self,
        phone_number: &str,
        session: &SessionBlob,
    ) -> Result<Vec<DialogInfo>, GatewayError> {
        (**self).list_dialogs(phone_number, session).await
    }

    async fn chat_participants(
        &self,
        phone_number: &str,
        session: &SessionBlob,
        chat_id: i64,
    ) -> Result<Vec<ParticipantInfo>, GatewayError> {
        (**self).chat_participants(phone_number, session, chat_id).await
    }

    async fn recent_messages(
        &self,
        phone_number: &str,
        session: &SessionBlob,
        chat_id: i64,
        limit: usize,
    ) -> Result<Vec<MessageInfo>, GatewayError> {
        (**self)
            .recent_messages(phone_number, session, chat_id, limit)
            .await
    }
}

//! Authentication flow: phone number to durable session credential.
//!
//! Drives code request, code verification (with the optional two-factor
//! password branch), and credential persistence. Nothing here is retried --
//! every failure surfaces to the caller as a typed [`RelayError`].

use tracing::{info, warn};

use chatrelay_types::credential::CredentialRecord;
use chatrelay_types::error::{RelayError, SignInError};
use chatrelay_types::telegram::PendingLogin;

use crate::repository::credential::CredentialRepository;
use crate::telegram::TelegramGateway;

/// Orchestrates the login state machine.
///
/// Generic over the credential repository and the protocol gateway so the
/// flow can be exercised with in-memory fakes (chatrelay-core never depends
/// on chatrelay-infra).
pub struct AuthService<R: CredentialRepository, G: TelegramGateway> {
    repo: R,
    gateway: G,
}

impl<R: CredentialRepository, G: TelegramGateway> AuthService<R, G> {
    pub fn new(repo: R, gateway: G) -> Self {
        Self { repo, gateway }
    }

    /// Ask the provider to send a verification code to the phone.
    ///
    /// Returns the pending login challenge; the caller must echo its
    /// `phone_code_hash` back on [`AuthService::verify`].
    pub async fn request_code(&self, phone_number: &str) -> Result<PendingLogin, RelayError> {
        if phone_number.trim().is_empty() {
            return Err(RelayError::Input("phone_number is required".to_string()));
        }

        let pending = self.gateway.send_login_code(phone_number).await?;
        info!(phone = %phone_number, "verification code sent");
        Ok(pending)
    }

    /// Verify the code (and two-factor password, when challenged) and
    /// persist the resulting session credential.
    ///
    /// The plaintext password is handed to the gateway only as local input
    /// to the proof computation; it is never persisted or logged here.
    pub async fn verify(
        &self,
        phone_number: &str,
        phone_code: &str,
        phone_code_hash: &str,
        password: Option<&str>,
    ) -> Result<CredentialRecord, RelayError> {
        if phone_number.trim().is_empty() {
            return Err(RelayError::Input("phone_number is required".to_string()));
        }
        if phone_code.trim().is_empty() || phone_code_hash.trim().is_empty() {
            return Err(RelayError::Input(
                "phone_code and phone_code_hash are required".to_string(),
            ));
        }

        let session = match self
            .gateway
            .sign_in(phone_number, phone_code, phone_code_hash)
            .await
        {
            Ok(session) => session,
            Err(SignInError::PasswordRequired) => {
                let Some(password) = password else {
                    warn!(phone = %phone_number, "sign-in requires two-factor password, none supplied");
                    return Err(RelayError::Auth(
                        "two-factor password required".to_string(),
                    ));
                };
                self.gateway
                    .check_password(phone_number, password)
                    .await
                    .map_err(sign_in_to_relay)?
            }
            // Any non-password failure propagates unchanged, no fallback.
            Err(other) => return Err(sign_in_to_relay(other)),
        };

        let record = self.repo.upsert(phone_number, &session).await?;
        info!(phone = %phone_number, "session credential persisted");
        Ok(record)
    }
}

fn sign_in_to_relay(err: SignInError) -> RelayError {
    match err {
        SignInError::Gateway(gateway) => gateway.into(),
        auth => RelayError::Auth(auth.to_string()),
    }
}

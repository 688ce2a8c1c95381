//! Login endpoints: code request and code/password verification.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use chatrelay_core::telegram::TelegramGateway;
use chatrelay_types::credential::CredentialRecord;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendCodeRequest {
    pub phone_number: String,
}

#[derive(Debug, Serialize)]
pub struct SendCodeResponse {
    pub success: bool,
    pub message: String,
    pub phone_code_hash: String,
}

/// POST /api/send-code - Ask the provider to text a login code.
pub async fn send_code<G: TelegramGateway + 'static>(
    State(state): State<AppState<G>>,
    Json(body): Json<SendCodeRequest>,
) -> Result<Json<SendCodeResponse>, AppError> {
    let pending = state.auth_service.request_code(&body.phone_number).await?;

    Ok(Json(SendCodeResponse {
        success: true,
        message: "Code sent! Check your phone.".to_string(),
        phone_code_hash: pending.phone_code_hash,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub phone_number: String,
    pub phone_code: String,
    pub phone_code_hash: String,
    /// Two-factor password, required only for accounts that have one.
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub success: bool,
    pub user: CredentialRecord,
}

/// POST /api/sign-in - Verify the code (and password, when challenged) and
/// persist the session credential.
pub async fn sign_in<G: TelegramGateway + 'static>(
    State(state): State<AppState<G>>,
    Json(body): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, AppError> {
    let user = state
        .auth_service
        .verify(
            &body.phone_number,
            &body.phone_code,
            &body.phone_code_hash,
            body.password.as_deref(),
        )
        .await?;

    Ok(Json(SignInResponse {
        success: true,
        user,
    }))
}

//! Message history endpoint.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use chatrelay_core::telegram::TelegramGateway;
use chatrelay_types::message::ChatHistory;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MessagesRequest {
    pub phone_number: String,
    pub chat_id: i64,
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub success: bool,
    pub data: ChatHistory,
}

/// POST /api/messages - Recent history of one chat, oldest first, with the
/// resolved chat partner for one-to-one conversations.
pub async fn chat_history<G: TelegramGateway + 'static>(
    State(state): State<AppState<G>>,
    Json(body): Json<MessagesRequest>,
) -> Result<Json<MessagesResponse>, AppError> {
    let data = state
        .chat_service
        .list_messages(&body.phone_number, body.chat_id)
        .await?;

    Ok(Json(MessagesResponse {
        success: true,
        data,
    }))
}

//! Conversation listing endpoint.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use chatrelay_core::telegram::TelegramGateway;
use chatrelay_types::conversation::Conversation;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ChatsResponse {
    pub success: bool,
    pub data: Vec<Conversation>,
}

/// GET /api/chats/{phone_number} - All conversations of the account, in
/// provider order.
pub async fn list_chats<G: TelegramGateway + 'static>(
    State(state): State<AppState<G>>,
    Path(phone_number): Path<String>,
) -> Result<Json<ChatsResponse>, AppError> {
    let data = state.chat_service.list_conversations(&phone_number).await?;

    Ok(Json(ChatsResponse {
        success: true,
        data,
    }))
}

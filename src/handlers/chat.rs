use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::require_board_access;
use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::models::{MessageResponse, SendMessage};
use crate::state::AppState;

pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
    Json(input): Json<SendMessage>,
) -> Result<Json<MessageResponse>> {
    if input.body.trim().is_empty() {
        return Err(AppError::Validation("Message cannot be empty".to_string()));
    }

    require_board_access(&state, board_id, auth.user.id).await?;

    let chat = state.chats.get_by_board(board_id).await?;
    let message = state
        .chats
        .create_message(chat.id, auth.user.id, &input.body)
        .await?;

    tracing::debug!(chat_id = %chat.id, message_id = %message.id, "message posted");

    Ok(Json(MessageResponse {
        message,
        user: auth.user.into(),
    }))
}

pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<Vec<MessageResponse>>> {
    require_board_access(&state, board_id, auth.user.id).await?;

    let chat = state.chats.get_by_board(board_id).await?;
    let messages = state.chats.list_messages(chat.id).await?;

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

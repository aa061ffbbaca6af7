use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::require_board_access;
use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::models::{CommentResponse, CommentTarget, CreateComment};
use crate::state::AppState;

async fn create(
    state: &AppState,
    auth: AuthUser,
    board_id: Uuid,
    target: CommentTarget,
    input: CreateComment,
) -> Result<Json<CommentResponse>> {
    if input.body.trim().is_empty() {
        return Err(AppError::Validation("Comment cannot be empty".to_string()));
    }

    require_board_access(state, board_id, auth.user.id).await?;

    let comment = state
        .comments
        .create(target, auth.user.id, &input.body)
        .await?;

    Ok(Json(CommentResponse {
        comment,
        user: auth.user.into(),
    }))
}

pub async fn comment_on_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<Uuid>,
    Json(input): Json<CreateComment>,
) -> Result<Json<CommentResponse>> {
    let board_id = state.cards.get_board_id_for_card(card_id).await?;
    create(&state, auth, board_id, CommentTarget::Card(card_id), input).await
}

pub async fn comment_on_subtask(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(subtask_id): Path<Uuid>,
    Json(input): Json<CreateComment>,
) -> Result<Json<CommentResponse>> {
    let board_id = state.subtasks.get_board_id_for_subtask(subtask_id).await?;
    create(
        &state,
        auth,
        board_id,
        CommentTarget::Subtask(subtask_id),
        input,
    )
    .await
}

pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<Uuid>,
) -> Result<StatusCode> {
    let comment = state.comments.get_by_id(comment_id).await?;

    if comment.user_id != auth.user.id {
        return Err(AppError::forbidden("Only the author can delete a comment"));
    }

    state.comments.delete(comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

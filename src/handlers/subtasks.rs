use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::require_board_access;
use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::models::{AddUserByEmail, CreateSubtask, Subtask, UpdateSubtask, UserResponse};
use crate::state::AppState;

pub async fn create_subtask(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<Uuid>,
    Json(input): Json<CreateSubtask>,
) -> Result<Json<Subtask>> {
    if input.name.is_empty() {
        return Err(AppError::Validation("Subtask name is required".to_string()));
    }

    let board_id = state.cards.get_board_id_for_card(card_id).await?;
    require_board_access(&state, board_id, auth.user.id).await?;

    let subtask = state
        .subtasks
        .create(card_id, auth.user.id, &input.name)
        .await?;

    Ok(Json(subtask))
}

pub async fn list_subtasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<Uuid>,
) -> Result<Json<Vec<Subtask>>> {
    let board_id = state.cards.get_board_id_for_card(card_id).await?;
    require_board_access(&state, board_id, auth.user.id).await?;

    let subtasks = state.subtasks.list_by_card(card_id).await?;
    Ok(Json(subtasks))
}

pub async fn update_subtask(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(subtask_id): Path<Uuid>,
    Json(input): Json<UpdateSubtask>,
) -> Result<Json<Subtask>> {
    let board_id = state.subtasks.get_board_id_for_subtask(subtask_id).await?;
    require_board_access(&state, board_id, auth.user.id).await?;

    let subtask = state
        .subtasks
        .update(subtask_id, input.name.as_deref(), input.is_completed)
        .await?;

    Ok(Json(subtask))
}

pub async fn delete_subtask(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(subtask_id): Path<Uuid>,
) -> Result<StatusCode> {
    let board_id = state.subtasks.get_board_id_for_subtask(subtask_id).await?;
    require_board_access(&state, board_id, auth.user.id).await?;

    state.subtasks.delete(subtask_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(subtask_id): Path<Uuid>,
    Json(input): Json<AddUserByEmail>,
) -> Result<Json<Vec<UserResponse>>> {
    let board_id = state.subtasks.get_board_id_for_subtask(subtask_id).await?;
    require_board_access(&state, board_id, auth.user.id).await?;

    let user = state.users.get_by_email(&input.email).await?;
    if !state.boards.can_access(board_id, user.id).await? {
        return Err(AppError::Conflict(
            "User must be a board member to take a subtask".to_string(),
        ));
    }

    state.subtasks.add_member(subtask_id, user.id).await?;
    let users = state.subtasks.list_members(subtask_id).await?;

    Ok(Json(users))
}

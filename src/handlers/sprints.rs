use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::require_board_access;
use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::models::{CreateSprint, Sprint, UpdateSprint};
use crate::state::AppState;

pub async fn create_sprint(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
    Json(input): Json<CreateSprint>,
) -> Result<Json<Sprint>> {
    if input.name.is_empty() {
        return Err(AppError::Validation("Sprint name is required".to_string()));
    }

    require_board_access(&state, board_id, auth.user.id).await?;

    let sprint = state.sprints.create(board_id, &input.name).await?;
    Ok(Json(sprint))
}

pub async fn list_sprints(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<Vec<Sprint>>> {
    require_board_access(&state, board_id, auth.user.id).await?;

    let sprints = state.sprints.list_by_board(board_id).await?;
    Ok(Json(sprints))
}

pub async fn update_sprint(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(sprint_id): Path<Uuid>,
    Json(input): Json<UpdateSprint>,
) -> Result<Json<Sprint>> {
    let sprint = state.sprints.get_by_id(sprint_id).await?;
    require_board_access(&state, sprint.board_id, auth.user.id).await?;

    let sprint = state
        .sprints
        .update(sprint_id, input.name.as_deref())
        .await?;

    Ok(Json(sprint))
}

pub async fn delete_sprint(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(sprint_id): Path<Uuid>,
) -> Result<StatusCode> {
    let sprint = state.sprints.get_by_id(sprint_id).await?;
    require_board_access(&state, sprint.board_id, auth.user.id).await?;

    state.sprints.delete(sprint_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

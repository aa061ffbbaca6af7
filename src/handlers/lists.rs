use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::require_board_access;
use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::models::{CreateList, List, UpdateList};
use crate::state::AppState;

pub async fn create_list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(sprint_id): Path<Uuid>,
    Json(input): Json<CreateList>,
) -> Result<Json<List>> {
    if input.name.is_empty() {
        return Err(AppError::Validation("List name is required".to_string()));
    }

    let sprint = state.sprints.get_by_id(sprint_id).await?;
    require_board_access(&state, sprint.board_id, auth.user.id).await?;

    let list = state.lists.create(sprint_id, &input.name).await?;
    Ok(Json(list))
}

pub async fn list_lists(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(sprint_id): Path<Uuid>,
) -> Result<Json<Vec<List>>> {
    let sprint = state.sprints.get_by_id(sprint_id).await?;
    require_board_access(&state, sprint.board_id, auth.user.id).await?;

    let lists = state.lists.list_by_sprint(sprint_id).await?;
    Ok(Json(lists))
}

pub async fn update_list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(list_id): Path<Uuid>,
    Json(input): Json<UpdateList>,
) -> Result<Json<List>> {
    let board_id = state.lists.get_board_id_for_list(list_id).await?;
    require_board_access(&state, board_id, auth.user.id).await?;

    let list = state.lists.update(list_id, input.name.as_deref()).await?;
    Ok(Json(list))
}

pub async fn delete_list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(list_id): Path<Uuid>,
) -> Result<StatusCode> {
    let board_id = state.lists.get_board_id_for_list(list_id).await?;
    require_board_access(&state, board_id, auth.user.id).await?;

    state.lists.delete(list_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

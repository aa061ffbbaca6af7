use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::require_board_access;
use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::models::{
    AddUserByEmail, AssignRole, Board, BoardDetails, BoardMemberAdded, BoardSummary, CreateBoard,
    CreatedBoard, Mutation, RoleDetails, UpdateBoard,
};
use crate::state::AppState;

pub async fn create_board(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateBoard>,
) -> Result<Json<CreatedBoard>> {
    if input.name.is_empty() {
        return Err(AppError::Validation("Board name is required".to_string()));
    }

    let created = state.board_service.create(&input, auth.user.id).await?;
    Ok(Json(created))
}

pub async fn list_boards(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<BoardSummary>>> {
    let boards = state.board_service.get_all(auth.user.id).await?;
    Ok(Json(boards))
}

pub async fn get_board(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<BoardDetails>> {
    require_board_access(&state, board_id, auth.user.id).await?;

    let board = state
        .board_service
        .find_by_id(board_id)
        .await?
        .ok_or(AppError::NotFound("board"))?;

    Ok(Json(board))
}

pub async fn update_board(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
    Json(input): Json<UpdateBoard>,
) -> Result<Json<Mutation<Board>>> {
    if input.name.as_deref() == Some("") {
        return Err(AppError::Validation("Board name cannot be empty".to_string()));
    }

    let result = state
        .board_service
        .update(&input, board_id, auth.user.id)
        .await?;

    Ok(Json(result))
}

pub async fn delete_board(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<Mutation<Board>>> {
    let result = state.board_service.delete(board_id, auth.user.id).await?;
    Ok(Json(result))
}

pub async fn add_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
    Json(input): Json<AddUserByEmail>,
) -> Result<Json<BoardMemberAdded>> {
    require_board_access(&state, board_id, auth.user.id).await?;

    let added = state
        .board_service
        .add_user_to_board(&input.email, board_id)
        .await?;

    Ok(Json(added))
}

pub async fn assign_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
    Json(input): Json<AssignRole>,
) -> Result<Json<RoleDetails>> {
    let role = state
        .board_service
        .assign_role(board_id, input.role, &input.email, auth.user.id)
        .await?;

    Ok(Json(role))
}

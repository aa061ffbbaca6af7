use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::require_board_access;
use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::models::{
    AddUserByEmail, Card, CardOrderUpdate, CardWithUsers, CopyCard, CreateCard, UpdateCard,
};
use crate::state::AppState;

pub async fn create_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(list_id): Path<Uuid>,
    Json(input): Json<CreateCard>,
) -> Result<Json<CardWithUsers>> {
    if input.name.is_empty() {
        return Err(AppError::Validation("Card name is required".to_string()));
    }

    let board_id = state.lists.get_board_id_for_list(list_id).await?;
    require_board_access(&state, board_id, auth.user.id).await?;

    let card = state
        .card_service
        .create(&input, auth.user.id, list_id)
        .await?;

    Ok(Json(card))
}

pub async fn list_cards(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(list_id): Path<Uuid>,
) -> Result<Json<Vec<Card>>> {
    let board_id = state.lists.get_board_id_for_list(list_id).await?;
    require_board_access(&state, board_id, auth.user.id).await?;

    let cards = state.card_service.find_by_list_id(list_id).await?;
    Ok(Json(cards))
}

pub async fn my_cards(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<CardWithUsers>>> {
    let cards = state.card_service.get_all(auth.user.id).await?;
    Ok(Json(cards))
}

pub async fn get_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<Uuid>,
) -> Result<Json<CardWithUsers>> {
    let card = state
        .card_service
        .get_by_id(card_id)
        .await?
        .ok_or(AppError::NotFound("card"))?;

    let board_id = state.lists.get_board_id_for_list(card.card.list_id).await?;
    require_board_access(&state, board_id, auth.user.id).await?;

    Ok(Json(card))
}

pub async fn update_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<Uuid>,
    Json(input): Json<UpdateCard>,
) -> Result<Json<Card>> {
    if input.name.as_deref() == Some("") {
        return Err(AppError::Validation("Card name cannot be empty".to_string()));
    }

    let board_id = state.cards.get_board_id_for_card(card_id).await?;
    require_board_access(&state, board_id, auth.user.id).await?;

    let card = state.card_service.update(&input, card_id).await?;
    Ok(Json(card))
}

pub async fn delete_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<Uuid>,
) -> Result<Json<Card>> {
    let card = state.card_service.delete(card_id, auth.user.id).await?;
    Ok(Json(card))
}

pub async fn copy_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<Uuid>,
    Json(input): Json<CopyCard>,
) -> Result<Json<CardWithUsers>> {
    let source_board = state.cards.get_board_id_for_card(card_id).await?;
    require_board_access(&state, source_board, auth.user.id).await?;

    let target_board = state.lists.get_board_id_for_list(input.list_id).await?;
    if target_board != source_board {
        return Err(AppError::BadRequest(
            "Cards can only be copied within their board".to_string(),
        ));
    }

    let copy = state.card_service.copy_card(card_id, input.list_id).await?;
    Ok(Json(copy))
}

pub async fn update_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(entries): Json<Vec<CardOrderUpdate>>,
) -> Result<Json<Vec<Card>>> {
    for entry in &entries {
        let board_id = state.cards.get_board_id_for_card(entry.id).await?;
        require_board_access(&state, board_id, auth.user.id).await?;

        if state.lists.get_board_id_for_list(entry.list_id).await? != board_id {
            return Err(AppError::BadRequest(
                "Cards can only move within their board".to_string(),
            ));
        }
    }

    let cards = state.card_service.update_order(&entries).await?;
    Ok(Json(cards))
}

pub async fn add_user_to_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, card_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<AddUserByEmail>,
) -> Result<Json<CardWithUsers>> {
    require_board_access(&state, board_id, auth.user.id).await?;

    let card = state
        .card_service
        .add_user_to_card(&input.email, board_id, card_id)
        .await?;

    Ok(Json(card))
}

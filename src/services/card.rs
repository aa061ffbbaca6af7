//! Card lifecycle inside a list: creation at the end of the list, copying
//! with an order shift, batch reordering and assignment.

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Card, CardOrderUpdate, CardWithUsers, CreateCard, UpdateCard};
use crate::repo::{card::CardRepository, list::ListRepository, user::UserRepository};

use super::board::users_by_owner;

#[derive(Clone)]
pub struct CardService {
    cards: CardRepository,
    lists: ListRepository,
    users: UserRepository,
}

impl CardService {
    pub fn new(cards: CardRepository, lists: ListRepository, users: UserRepository) -> Self {
        Self {
            cards,
            lists,
            users,
        }
    }

    /// Cards of a list, ascending by `order`.
    pub async fn find_by_list_id(&self, list_id: Uuid) -> Result<Vec<Card>> {
        self.cards.list_by_list(list_id).await
    }

    /// Assign the user with `email` to a card, adding them to the board if
    /// they are not a member yet.
    pub async fn add_user_to_card(
        &self,
        email: &str,
        board_id: Uuid,
        card_id: Uuid,
    ) -> Result<CardWithUsers> {
        let user = self.users.get_by_email(email).await?;

        if self.cards.get_board_id_for_card(card_id).await? != board_id {
            return Err(AppError::BadRequest(
                "Card does not belong to this board".to_string(),
            ));
        }

        if self.cards.has_member(card_id, user.id).await? {
            return Err(AppError::AlreadyExists(
                "User already has this card".to_string(),
            ));
        }

        self.cards.add_member(board_id, card_id, user.id).await?;
        tracing::info!(%card_id, user_id = %user.id, "user assigned to card");

        self.get_by_id(card_id)
            .await?
            .ok_or(AppError::NotFound("card"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<CardWithUsers>> {
        let Some(card) = self.cards.find_by_id(id).await? else {
            return Ok(None);
        };
        let users = self.cards.list_members(id).await?;

        Ok(Some(CardWithUsers { card, users }))
    }

    /// Cards created by the user, with their assignees.
    pub async fn get_all(&self, user_id: Uuid) -> Result<Vec<CardWithUsers>> {
        let mut users = users_by_owner(self.cards.members_by_creator(user_id).await?);
        let cards = self.cards.list_by_creator(user_id).await?;

        Ok(cards
            .into_iter()
            .map(|card| CardWithUsers {
                users: users.remove(&card.id).unwrap_or_default(),
                card,
            })
            .collect())
    }

    pub async fn create(
        &self,
        input: &CreateCard,
        user_id: Uuid,
        list_id: Uuid,
    ) -> Result<CardWithUsers> {
        self.lists.get_by_id(list_id).await?;

        let card = self
            .cards
            .create(
                list_id,
                user_id,
                &input.name,
                input.description.as_deref(),
                input.due_date,
            )
            .await?;

        tracing::debug!(card_id = %card.id, %list_id, order = card.order, "card created");

        Ok(CardWithUsers {
            card,
            users: Vec::new(),
        })
    }

    /// Insert a copy of the card right after it in `list_id`, shifting the
    /// cards behind it down by one.
    pub async fn copy_card(&self, card_id: Uuid, list_id: Uuid) -> Result<CardWithUsers> {
        self.lists.get_by_id(list_id).await?;

        let card = self
            .cards
            .copy(card_id, list_id)
            .await?
            .ok_or(AppError::NotFound("card"))?;
        let users = self.cards.list_members(card.id).await?;

        tracing::info!(source = %card_id, copy = %card.id, order = card.order, "card copied");

        Ok(CardWithUsers { card, users })
    }

    /// Partial update. Authorization is left to the caller.
    pub async fn update(&self, input: &UpdateCard, card_id: Uuid) -> Result<Card> {
        self.cards
            .update(
                card_id,
                input.name.as_deref(),
                input.description.as_deref(),
                input.due_date,
            )
            .await
    }

    pub async fn update_order(&self, entries: &[CardOrderUpdate]) -> Result<Vec<Card>> {
        let cards = self.cards.update_order(entries).await?;
        tracing::debug!(count = cards.len(), "cards reordered");
        Ok(cards)
    }

    /// Delete a card on a board created by `user_id`.
    ///
    /// A card that does not exist is `NotFound`; a card on someone else's
    /// board is `Forbidden`.
    pub async fn delete(&self, card_id: Uuid, user_id: Uuid) -> Result<Card> {
        if let Some(card) = self.cards.delete_if_board_creator(card_id, user_id).await? {
            tracing::info!(%card_id, %user_id, "card deleted");
            return Ok(card);
        }

        match self.cards.find_by_id(card_id).await? {
            Some(_) => Err(AppError::forbidden(
                "Only the board creator can delete cards",
            )),
            None => Err(AppError::NotFound("card")),
        }
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::comment::CommentResponse;
use super::subtask::SubtaskDetails;
use super::user::UserResponse;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Card {
    pub id: Uuid,
    pub list_id: Uuid,
    /// The creator.
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    /// Position within the list, ascending from 1. Gaps are possible after deletes.
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCard {
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCard {
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct CopyCard {
    pub list_id: Uuid,
}

/// One entry of a batch reorder: the card's new position and (possibly new) list.
#[derive(Debug, Clone, Deserialize)]
pub struct CardOrderUpdate {
    pub id: Uuid,
    pub order: i32,
    pub list_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CardWithUsers {
    #[serde(flatten)]
    pub card: Card,
    pub users: Vec<UserResponse>,
}

/// Card row joined with its creator's public fields.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CardWithCreator {
    #[sqlx(flatten)]
    pub card: Card,
    pub creator_email: String,
    pub creator_name: String,
}

impl CardWithCreator {
    pub fn creator(&self) -> UserResponse {
        UserResponse {
            id: self.card.user_id,
            email: self.creator_email.clone(),
            name: self.creator_name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CardDetails {
    #[serde(flatten)]
    pub card: Card,
    pub users: Vec<UserResponse>,
    pub creator: UserResponse,
    pub subtasks: Vec<SubtaskDetails>,
    pub comments: Vec<CommentResponse>,
}

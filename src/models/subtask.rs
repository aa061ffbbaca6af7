use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::comment::CommentResponse;
use super::user::UserResponse;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subtask {
    pub id: Uuid,
    pub card_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSubtask {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSubtask {
    pub name: Option<String>,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubtaskWithCreator {
    #[sqlx(flatten)]
    pub subtask: Subtask,
    pub creator_email: String,
    pub creator_name: String,
}

impl SubtaskWithCreator {
    pub fn creator(&self) -> UserResponse {
        UserResponse {
            id: self.subtask.user_id,
            email: self.creator_email.clone(),
            name: self.creator_name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubtaskDetails {
    #[serde(flatten)]
    pub subtask: Subtask,
    pub users: Vec<UserResponse>,
    pub creator: UserResponse,
    pub comments: Vec<CommentResponse>,
}

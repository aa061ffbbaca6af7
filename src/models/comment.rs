use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserResponse;

/// A comment belongs to exactly one card or one subtask.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub card_id: Option<Uuid>,
    pub subtask_id: Option<Uuid>,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentTarget {
    Card(Uuid),
    Subtask(Uuid),
}

#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub body: String,
}

/// Comment with author info joined from users table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentWithAuthor {
    #[sqlx(flatten)]
    pub comment: Comment,
    pub author_email: String,
    pub author_name: String,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: UserResponse,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(c: CommentWithAuthor) -> Self {
        let user = UserResponse {
            id: c.comment.user_id,
            email: c.author_email,
            name: c.author_name,
        };
        Self {
            comment: c.comment,
            user,
        }
    }
}

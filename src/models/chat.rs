use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserResponse;

/// Name given to the chat created alongside every board.
pub const BOARD_CHAT_NAME: &str = "board";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Chat {
    pub id: Uuid,
    pub board_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Message joined with its author's public fields.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageWithAuthor {
    #[sqlx(flatten)]
    pub message: Message,
    pub author_email: String,
    pub author_name: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    #[serde(flatten)]
    pub message: Message,
    pub user: UserResponse,
}

impl From<MessageWithAuthor> for MessageResponse {
    fn from(m: MessageWithAuthor) -> Self {
        let user = UserResponse {
            id: m.message.user_id,
            email: m.author_email,
            name: m.author_name,
        };
        Self {
            message: m.message,
            user,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatDetails {
    #[serde(flatten)]
    pub chat: Chat,
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessage {
    pub body: String,
}

use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Chat, Message, MessageWithAuthor};

#[derive(Clone)]
pub struct ChatRepository {
    pool: Arc<SqlitePool>,
}

impl ChatRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn find_by_board(&self, board_id: Uuid) -> Result<Option<Chat>> {
        let chat = sqlx::query_as::<_, Chat>("SELECT * FROM chats WHERE board_id = $1")
            .bind(board_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(chat)
    }

    pub async fn get_by_board(&self, board_id: Uuid) -> Result<Chat> {
        self.find_by_board(board_id)
            .await?
            .ok_or(AppError::NotFound("chat"))
    }

    pub async fn create_message(&self, chat_id: Uuid, user_id: Uuid, body: &str) -> Result<Message> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (id, chat_id, user_id, body, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(chat_id)
        .bind(user_id)
        .bind(body)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(message)
    }

    /// Messages of a chat, oldest first, with their authors.
    pub async fn list_messages(&self, chat_id: Uuid) -> Result<Vec<MessageWithAuthor>> {
        let messages = sqlx::query_as::<_, MessageWithAuthor>(
            r#"
            SELECT m.*, u.email AS author_email, u.name AS author_name
            FROM messages m
            INNER JOIN users u ON u.id = m.user_id
            WHERE m.chat_id = $1
            ORDER BY m.created_at ASC
            "#,
        )
        .bind(chat_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(messages)
    }
}

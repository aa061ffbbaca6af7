use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Comment, CommentTarget, CommentWithAuthor};

#[derive(Clone)]
pub struct CommentRepository {
    pool: Arc<SqlitePool>,
}

impl CommentRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Create a new comment on a card or a subtask
    pub async fn create(&self, target: CommentTarget, user_id: Uuid, body: &str) -> Result<Comment> {
        let (card_id, subtask_id) = match target {
            CommentTarget::Card(id) => (Some(id), None),
            CommentTarget::Subtask(id) => (None, Some(id)),
        };

        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (id, card_id, subtask_id, user_id, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(card_id)
        .bind(subtask_id)
        .bind(user_id)
        .bind(body)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(comment)
    }

    /// Get a comment by ID or return NotFound error
    pub async fn get_by_id(&self, id: Uuid) -> Result<Comment> {
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(AppError::NotFound("comment"))
    }

    /// All comments on a board's cards and subtasks, oldest first
    pub async fn list_by_board(&self, board_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT cm.*, u.email AS author_email, u.name AS author_name
            FROM comments cm
            INNER JOIN users u ON u.id = cm.user_id
            LEFT JOIN subtasks st ON st.id = cm.subtask_id
            INNER JOIN cards c ON c.id = COALESCE(cm.card_id, st.card_id)
            INNER JOIN lists l ON l.id = c.list_id
            INNER JOIN sprints s ON s.id = l.sprint_id
            WHERE s.board_id = $1
            ORDER BY cm.created_at ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(comments)
    }

    /// Delete a comment
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("comment"));
        }

        Ok(())
    }
}

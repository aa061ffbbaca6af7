use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Subtask, SubtaskWithCreator, UserLink, UserResponse};

#[derive(Clone)]
pub struct SubtaskRepository {
    pool: Arc<SqlitePool>,
}

impl SubtaskRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, card_id: Uuid, user_id: Uuid, name: &str) -> Result<Subtask> {
        let subtask = sqlx::query_as::<_, Subtask>(
            r#"
            INSERT INTO subtasks (id, card_id, user_id, name, is_completed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, FALSE, $5, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(card_id)
        .bind(user_id)
        .bind(name)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(subtask)
    }

    pub async fn list_by_card(&self, card_id: Uuid) -> Result<Vec<Subtask>> {
        let subtasks = sqlx::query_as::<_, Subtask>(
            "SELECT * FROM subtasks WHERE card_id = $1 ORDER BY created_at ASC",
        )
        .bind(card_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(subtasks)
    }

    pub async fn list_by_board(&self, board_id: Uuid) -> Result<Vec<SubtaskWithCreator>> {
        let subtasks = sqlx::query_as::<_, SubtaskWithCreator>(
            r#"
            SELECT st.*, u.email AS creator_email, u.name AS creator_name
            FROM subtasks st
            INNER JOIN users u ON u.id = st.user_id
            INNER JOIN cards c ON c.id = st.card_id
            INNER JOIN lists l ON l.id = c.list_id
            INNER JOIN sprints s ON s.id = l.sprint_id
            WHERE s.board_id = $1
            ORDER BY st.created_at ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(subtasks)
    }

    /// Users assigned to subtasks on the board, keyed by subtask id.
    pub async fn members_by_board(&self, board_id: Uuid) -> Result<Vec<UserLink>> {
        let links = sqlx::query_as::<_, UserLink>(
            r#"
            SELECT sm.subtask_id AS owner_id, u.id, u.email, u.name
            FROM subtask_members sm
            INNER JOIN users u ON u.id = sm.user_id
            INNER JOIN subtasks st ON st.id = sm.subtask_id
            INNER JOIN cards c ON c.id = st.card_id
            INNER JOIN lists l ON l.id = c.list_id
            INNER JOIN sprints s ON s.id = l.sprint_id
            WHERE s.board_id = $1
            ORDER BY u.name ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    pub async fn list_members(&self, subtask_id: Uuid) -> Result<Vec<UserResponse>> {
        let users = sqlx::query_as::<_, UserResponse>(
            r#"
            SELECT u.id, u.email, u.name
            FROM subtask_members sm
            INNER JOIN users u ON u.id = sm.user_id
            WHERE sm.subtask_id = $1
            ORDER BY u.name ASC
            "#,
        )
        .bind(subtask_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(users)
    }

    pub async fn add_member(&self, subtask_id: Uuid, user_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO subtask_members (subtask_id, user_id) VALUES ($1, $2)",
        )
        .bind(subtask_id)
        .bind(user_id)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::AlreadyExists(
                "User already has this subtask".to_string(),
            ));
        }

        Ok(())
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        is_completed: Option<bool>,
    ) -> Result<Subtask> {
        sqlx::query_as::<_, Subtask>(
            r#"
            UPDATE subtasks
            SET name = COALESCE($2, name),
                is_completed = COALESCE($3, is_completed),
                updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(is_completed)
        .bind(Utc::now())
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound("subtask"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM subtasks WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("subtask"));
        }

        Ok(())
    }

    pub async fn get_board_id_for_subtask(&self, subtask_id: Uuid) -> Result<Uuid> {
        let board_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT s.board_id FROM subtasks st
            INNER JOIN cards c ON c.id = st.card_id
            INNER JOIN lists l ON l.id = c.list_id
            INNER JOIN sprints s ON s.id = l.sprint_id
            WHERE st.id = $1
            "#,
        )
        .bind(subtask_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound("subtask"))?;

        Ok(board_id)
    }
}

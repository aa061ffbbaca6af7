use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::Sprint;

#[derive(Clone)]
pub struct SprintRepository {
    pool: Arc<SqlitePool>,
}

impl SprintRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, board_id: Uuid, name: &str) -> Result<Sprint> {
        let sprint = sqlx::query_as::<_, Sprint>(
            r#"
            INSERT INTO sprints (id, board_id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(board_id)
        .bind(name)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(sprint)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Sprint> {
        sqlx::query_as::<_, Sprint>("SELECT * FROM sprints WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(AppError::NotFound("sprint"))
    }

    pub async fn list_by_board(&self, board_id: Uuid) -> Result<Vec<Sprint>> {
        let sprints = sqlx::query_as::<_, Sprint>(
            "SELECT * FROM sprints WHERE board_id = $1 ORDER BY created_at ASC",
        )
        .bind(board_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(sprints)
    }

    pub async fn update(&self, id: Uuid, name: Option<&str>) -> Result<Sprint> {
        sqlx::query_as::<_, Sprint>(
            r#"
            UPDATE sprints
            SET name = COALESCE($2, name),
                updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(Utc::now())
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound("sprint"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM sprints WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("sprint"));
        }

        Ok(())
    }
}

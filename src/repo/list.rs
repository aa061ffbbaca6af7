use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::List;

#[derive(Clone)]
pub struct ListRepository {
    pool: Arc<SqlitePool>,
}

impl ListRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Append a list to a sprint; its order is the sprint's list count plus one.
    pub async fn create(&self, sprint_id: Uuid, name: &str) -> Result<List> {
        let list = sqlx::query_as::<_, List>(
            r#"
            INSERT INTO lists (id, sprint_id, name, "order", created_at, updated_at)
            VALUES ($1, $2, $3, (SELECT COUNT(*) + 1 FROM lists WHERE sprint_id = $2), $4, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(sprint_id)
        .bind(name)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(list)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<List>> {
        let list = sqlx::query_as::<_, List>("SELECT * FROM lists WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(list)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<List> {
        self.find_by_id(id).await?.ok_or(AppError::NotFound("list"))
    }

    pub async fn list_by_sprint(&self, sprint_id: Uuid) -> Result<Vec<List>> {
        let lists = sqlx::query_as::<_, List>(
            r#"SELECT * FROM lists WHERE sprint_id = $1 ORDER BY "order" ASC"#,
        )
        .bind(sprint_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(lists)
    }

    pub async fn list_by_board(&self, board_id: Uuid) -> Result<Vec<List>> {
        let lists = sqlx::query_as::<_, List>(
            r#"
            SELECT l.* FROM lists l
            INNER JOIN sprints s ON s.id = l.sprint_id
            WHERE s.board_id = $1
            ORDER BY l."order" ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(lists)
    }

    pub async fn update(&self, id: Uuid, name: Option<&str>) -> Result<List> {
        sqlx::query_as::<_, List>(
            r#"
            UPDATE lists
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
        .ok_or(AppError::NotFound("list"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("list"));
        }

        Ok(())
    }

    pub async fn get_board_id_for_list(&self, list_id: Uuid) -> Result<Uuid> {
        let board_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT s.board_id FROM lists l
            INNER JOIN sprints s ON s.id = l.sprint_id
            WHERE l.id = $1
            "#,
        )
        .bind(list_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound("list"))?;

        Ok(board_id)
    }
}

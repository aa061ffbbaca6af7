use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Session;

const SESSION_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct SessionRepository {
    pool: Arc<SqlitePool>,
}

impl SessionRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: Uuid, token: &str) -> Result<Session> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let expires_at = now + Duration::days(SESSION_TTL_DAYS);

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (id, user_id, token, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .bind(now)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(session)
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE token = $1 AND expires_at > $2",
        )
        .bind(token)
        .bind(Utc::now())
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(session)
    }

    pub async fn delete_by_token(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    pub async fn delete_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(Utc::now())
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}

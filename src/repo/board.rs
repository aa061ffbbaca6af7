use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{
    Board, BoardWithChatRow, Chat, Role, RoleName, UserLink, UserResponse, BOARD_CHAT_NAME,
};

#[derive(Clone)]
pub struct BoardRepository {
    pool: Arc<SqlitePool>,
}

impl BoardRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Create a board together with its creator membership, its chat and the
    /// three canonical roles. Either everything is written or nothing is.
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        user_id: Uuid,
    ) -> Result<(Board, Chat, Vec<Role>)> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let board = sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (id, name, description, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(user_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO board_members (board_id, user_id) VALUES ($1, $2)")
            .bind(board.id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let chat = sqlx::query_as::<_, Chat>(
            r#"
            INSERT INTO chats (id, board_id, name, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(board.id)
        .bind(BOARD_CHAT_NAME)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let mut roles = Vec::with_capacity(RoleName::ALL.len());
        for role_name in RoleName::ALL {
            let role = sqlx::query_as::<_, Role>(
                r#"
                INSERT INTO roles (id, board_id, name, created_at)
                VALUES ($1, $2, $3, $4)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(board.id)
            .bind(role_name)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;
            roles.push(role);
        }

        tx.commit().await?;

        Ok((board, chat, roles))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Board>> {
        let board = sqlx::query_as::<_, Board>("SELECT * FROM boards WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(board)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Board> {
        self.find_by_id(id).await?.ok_or(AppError::NotFound("board"))
    }

    /// Boards the user created or is a member of, each joined with its chat.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<BoardWithChatRow>> {
        let rows = sqlx::query_as::<_, BoardWithChatRow>(
            r#"
            SELECT b.*, c.id AS chat_id, c.name AS chat_name, c.created_at AS chat_created_at
            FROM boards b
            LEFT JOIN chats c ON c.board_id = b.id
            WHERE b.user_id = $1
               OR EXISTS (
                   SELECT 1 FROM board_members bm
                   WHERE bm.board_id = b.id AND bm.user_id = $1
               )
            ORDER BY b.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Board> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            UPDATE boards
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(Utc::now())
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound("board"))?;

        Ok(board)
    }

    /// Delete a board; sprints, lists, cards, roles and chat go with it.
    pub async fn delete(&self, id: Uuid) -> Result<Board> {
        let board = sqlx::query_as::<_, Board>("DELETE FROM boards WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(AppError::NotFound("board"))?;

        Ok(board)
    }

    /// True if the user holds a membership row on the board.
    pub async fn has_member(&self, board_id: Uuid, user_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM board_members WHERE board_id = $1 AND user_id = $2)",
        )
        .bind(board_id)
        .bind(user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    /// True if the user created the board or is a member of it.
    pub async fn can_access(&self, board_id: Uuid, user_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM boards WHERE id = $1 AND user_id = $2)
                OR EXISTS(SELECT 1 FROM board_members WHERE board_id = $1 AND user_id = $2)
            "#,
        )
        .bind(board_id)
        .bind(user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    /// Add a membership row. An existing membership is `AlreadyExists`,
    /// including one written by a concurrent request.
    pub async fn add_member(&self, board_id: Uuid, user_id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let inserted =
            sqlx::query("INSERT OR IGNORE INTO board_members (board_id, user_id) VALUES ($1, $2)")
                .bind(board_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;

        if inserted.rows_affected() == 0 {
            return Err(AppError::AlreadyExists("User already on board".to_string()));
        }

        sqlx::query("UPDATE boards SET updated_at = $2 WHERE id = $1")
            .bind(board_id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn list_members(&self, board_id: Uuid) -> Result<Vec<UserResponse>> {
        let members = sqlx::query_as::<_, UserLink>(
            r#"
            SELECT bm.board_id AS owner_id, u.id, u.email, u.name
            FROM board_members bm
            INNER JOIN users u ON u.id = bm.user_id
            WHERE bm.board_id = $1
            ORDER BY u.name ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(members.into_iter().map(|m| m.user).collect())
    }
}

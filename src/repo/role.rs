use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Role, RoleLink, RoleName, UserLink};

#[derive(Clone)]
pub struct RoleRepository {
    pool: Arc<SqlitePool>,
}

impl RoleRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn list_by_board(&self, board_id: Uuid) -> Result<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>(
            "SELECT * FROM roles WHERE board_id = $1 ORDER BY created_at ASC, name ASC",
        )
        .bind(board_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(roles)
    }

    pub async fn get_by_name(&self, board_id: Uuid, name: RoleName) -> Result<Role> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE board_id = $1 AND name = $2")
            .bind(board_id)
            .bind(name)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(AppError::NotFound("role"))
    }

    /// Users holding each role of the board, keyed by role id.
    pub async fn users_by_board(&self, board_id: Uuid) -> Result<Vec<UserLink>> {
        let links = sqlx::query_as::<_, UserLink>(
            r#"
            SELECT rm.role_id AS owner_id, u.id, u.email, u.name
            FROM role_members rm
            INNER JOIN roles r ON r.id = rm.role_id
            INNER JOIN users u ON u.id = rm.user_id
            WHERE r.board_id = $1
            ORDER BY u.name ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    /// Roles held on this board, keyed by user id.
    pub async fn roles_by_user(&self, board_id: Uuid) -> Result<Vec<RoleLink>> {
        let links = sqlx::query_as::<_, RoleLink>(
            r#"
            SELECT rm.user_id AS owner_id, r.*
            FROM role_members rm
            INNER JOIN roles r ON r.id = rm.role_id
            WHERE r.board_id = $1
            ORDER BY r.created_at ASC, r.name ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    pub async fn has_user(&self, role_id: Uuid, user_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM role_members WHERE role_id = $1 AND user_id = $2)",
        )
        .bind(role_id)
        .bind(user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    pub async fn add_user(&self, role_id: Uuid, user_id: Uuid) -> Result<()> {
        let result =
            sqlx::query("INSERT OR IGNORE INTO role_members (role_id, user_id) VALUES ($1, $2)")
                .bind(role_id)
                .bind(user_id)
                .execute(self.pool.as_ref())
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::AlreadyExists(
                "User already has this role".to_string(),
            ));
        }

        Ok(())
    }
}

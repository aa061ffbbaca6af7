use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Board, Card, CardOrderUpdate, CardWithCreator, UserLink, UserResponse};

#[derive(Clone)]
pub struct CardRepository {
    pool: Arc<SqlitePool>,
}

impl CardRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Append a card to a list. The order is the list's card count plus one,
    /// computed by the insert statement itself.
    pub async fn create(
        &self,
        list_id: Uuid,
        user_id: Uuid,
        name: &str,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
    ) -> Result<Card> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            INSERT INTO cards (id, list_id, user_id, name, description, due_date, "order", created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, (SELECT COUNT(*) + 1 FROM cards WHERE list_id = $2), $7, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(list_id)
        .bind(user_id)
        .bind(name)
        .bind(description)
        .bind(due_date)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(card)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Card>> {
        let card = sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(card)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Card> {
        self.find_by_id(id).await?.ok_or(AppError::NotFound("card"))
    }

    pub async fn list_by_list(&self, list_id: Uuid) -> Result<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>(
            r#"SELECT * FROM cards WHERE list_id = $1 ORDER BY "order" ASC"#,
        )
        .bind(list_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(cards)
    }

    pub async fn list_by_creator(&self, user_id: Uuid) -> Result<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>(
            "SELECT * FROM cards WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(cards)
    }

    /// Every card of a board with its creator, ordered by position.
    pub async fn list_by_board(&self, board_id: Uuid) -> Result<Vec<CardWithCreator>> {
        let cards = sqlx::query_as::<_, CardWithCreator>(
            r#"
            SELECT c.*, u.email AS creator_email, u.name AS creator_name
            FROM cards c
            INNER JOIN users u ON u.id = c.user_id
            INNER JOIN lists l ON l.id = c.list_id
            INNER JOIN sprints s ON s.id = l.sprint_id
            WHERE s.board_id = $1
            ORDER BY c."order" ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(cards)
    }

    pub async fn list_members(&self, card_id: Uuid) -> Result<Vec<UserResponse>> {
        let links = self.member_links("WHERE cm.card_id = $1", card_id).await?;
        Ok(links.into_iter().map(|l| l.user).collect())
    }

    /// Assignees of every card on the board, keyed by card id.
    pub async fn members_by_board(&self, board_id: Uuid) -> Result<Vec<UserLink>> {
        self.member_links(
            r#"
            INNER JOIN cards c ON c.id = cm.card_id
            INNER JOIN lists l ON l.id = c.list_id
            INNER JOIN sprints s ON s.id = l.sprint_id
            WHERE s.board_id = $1
            "#,
            board_id,
        )
        .await
    }

    /// Assignees of every card the user created, keyed by card id.
    pub async fn members_by_creator(&self, user_id: Uuid) -> Result<Vec<UserLink>> {
        self.member_links(
            "INNER JOIN cards c ON c.id = cm.card_id WHERE c.user_id = $1",
            user_id,
        )
        .await
    }

    async fn member_links(&self, filter: &str, key: Uuid) -> Result<Vec<UserLink>> {
        let query = format!(
            r#"
            SELECT cm.card_id AS owner_id, u.id, u.email, u.name
            FROM card_members cm
            INNER JOIN users u ON u.id = cm.user_id
            {filter}
            ORDER BY u.name ASC
            "#
        );

        let links = sqlx::query_as::<_, UserLink>(&query)
            .bind(key)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(links)
    }

    pub async fn has_member(&self, card_id: Uuid, user_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM card_members WHERE card_id = $1 AND user_id = $2)",
        )
        .bind(card_id)
        .bind(user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    /// Assign a user to a card, making them a member of the board as well.
    /// Both edges are written in one transaction.
    pub async fn add_member(&self, board_id: Uuid, card_id: Uuid, user_id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT OR IGNORE INTO board_members (board_id, user_id) VALUES ($1, $2)")
            .bind(board_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let inserted =
            sqlx::query("INSERT OR IGNORE INTO card_members (card_id, user_id) VALUES ($1, $2)")
                .bind(card_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;

        if inserted.rows_affected() == 0 {
            return Err(AppError::AlreadyExists(
                "User already has this card".to_string(),
            ));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Duplicate a card into `list_id` directly after the source position.
    ///
    /// The shift of the following cards is the first statement of the
    /// transaction and reads the source order through a subquery, so the
    /// write lock is held before anything is read and two concurrent copies
    /// cannot interleave. Returns `None` (with nothing written) if the source
    /// card does not exist.
    pub async fn copy(&self, card_id: Uuid, list_id: Uuid) -> Result<Option<Card>> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE cards
            SET "order" = "order" + 1
            WHERE list_id = $1
              AND "order" > (SELECT "order" FROM cards WHERE id = $2)
            "#,
        )
        .bind(list_id)
        .bind(card_id)
        .execute(&mut *tx)
        .await?;

        let Some(source) = sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE id = $1")
            .bind(card_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let copy = sqlx::query_as::<_, Card>(
            r#"
            INSERT INTO cards (id, list_id, user_id, name, description, due_date, "order", created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(list_id)
        .bind(source.user_id)
        .bind(format!("{} - copy", source.name))
        .bind(source.description.as_deref())
        .bind(source.due_date)
        .bind(source.order + 1)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO card_members (card_id, user_id)
            SELECT $1, user_id FROM card_members WHERE card_id = $2
            "#,
        )
        .bind(copy.id)
        .bind(source.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(copy))
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
    ) -> Result<Card> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            UPDATE cards
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                due_date = COALESCE($4, due_date),
                updated_at = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(due_date)
        .bind(Utc::now())
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound("card"))?;

        Ok(card)
    }

    /// Apply a batch of (order, list) assignments as one unit. An unknown
    /// card id aborts the whole batch.
    pub async fn update_order(&self, entries: &[CardOrderUpdate]) -> Result<Vec<Card>> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let mut cards = Vec::with_capacity(entries.len());

        for entry in entries {
            let card = sqlx::query_as::<_, Card>(
                r#"
                UPDATE cards
                SET "order" = $2, list_id = $3, updated_at = $4
                WHERE id = $1
                RETURNING *
                "#,
            )
            .bind(entry.id)
            .bind(entry.order)
            .bind(entry.list_id)
            .bind(now)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::NotFound("card"))?;

            cards.push(card);
        }

        tx.commit().await?;
        Ok(cards)
    }

    /// Delete a card only if its board was created by `creator_id`.
    /// `None` means nothing matched the filter.
    pub async fn delete_if_board_creator(
        &self,
        card_id: Uuid,
        creator_id: Uuid,
    ) -> Result<Option<Card>> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            DELETE FROM cards
            WHERE id = $1
              AND list_id IN (
                  SELECT l.id FROM lists l
                  INNER JOIN sprints s ON s.id = l.sprint_id
                  INNER JOIN boards b ON b.id = s.board_id
                  WHERE b.user_id = $2
              )
            RETURNING *
            "#,
        )
        .bind(card_id)
        .bind(creator_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(card)
    }

    pub async fn find_board_for_card(&self, card_id: Uuid) -> Result<Option<Board>> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            SELECT b.* FROM boards b
            INNER JOIN sprints s ON s.board_id = b.id
            INNER JOIN lists l ON l.sprint_id = s.id
            INNER JOIN cards c ON c.list_id = l.id
            WHERE c.id = $1
            "#,
        )
        .bind(card_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(board)
    }

    pub async fn get_board_id_for_card(&self, card_id: Uuid) -> Result<Uuid> {
        self.find_board_for_card(card_id)
            .await?
            .map(|b| b.id)
            .ok_or(AppError::NotFound("card"))
    }
}

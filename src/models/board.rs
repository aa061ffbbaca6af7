use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::chat::{Chat, ChatDetails};
use super::role::{Role, RoleDetails};
use super::sprint::SprintDetails;
use super::user::UserResponse;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Board {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// The creator. Only this user may update or delete the board.
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    pub fn is_creator(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateBoard {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBoard {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Result of board creation: the board, its chat and its three canonical roles.
#[derive(Debug, Serialize)]
pub struct CreatedBoard {
    pub board: Board,
    pub chat: Chat,
    pub roles: Vec<RoleDetails>,
}

/// Board row joined with its chat, as returned by the board listing.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BoardWithChatRow {
    #[sqlx(flatten)]
    pub board: Board,
    pub chat_id: Option<Uuid>,
    pub chat_name: Option<String>,
    pub chat_created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct BoardSummary {
    #[serde(flatten)]
    pub board: Board,
    pub chat: Option<Chat>,
}

impl From<BoardWithChatRow> for BoardSummary {
    fn from(row: BoardWithChatRow) -> Self {
        let chat = match (row.chat_id, row.chat_name, row.chat_created_at) {
            (Some(id), Some(name), Some(created_at)) => Some(Chat {
                id,
                board_id: row.board.id,
                name,
                created_at,
            }),
            _ => None,
        };

        Self {
            board: row.board,
            chat,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BoardMemberAdded {
    pub board: Board,
    pub user: UserResponse,
}

/// A board member together with the roles they hold on this board.
#[derive(Debug, Serialize)]
pub struct MemberDetails {
    #[serde(flatten)]
    pub user: UserResponse,
    pub roles: Vec<Role>,
}

/// The full board aggregate.
#[derive(Debug, Serialize)]
pub struct BoardDetails {
    #[serde(flatten)]
    pub board: Board,
    pub creator: UserResponse,
    pub sprints: Vec<SprintDetails>,
    pub users: Vec<MemberDetails>,
    pub roles: Vec<RoleDetails>,
    pub chat: Option<ChatDetails>,
}

/// Success envelope for creator-only mutations.
#[derive(Debug, Serialize)]
pub struct Mutation<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> Mutation<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

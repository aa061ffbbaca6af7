pub mod auth;
pub mod boards;
pub mod cards;
pub mod chat;
pub mod comments;
pub mod lists;
pub mod sprints;
pub mod subtasks;

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Fail unless the board exists and the user created it or belongs to it.
pub(crate) async fn require_board_access(
    state: &AppState,
    board_id: Uuid,
    user_id: Uuid,
) -> Result<()> {
    state.boards.get_by_id(board_id).await?;

    if !state.boards.can_access(board_id, user_id).await? {
        return Err(AppError::forbidden("Not a member of this board"));
    }

    Ok(())
}

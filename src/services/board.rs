//! Board lifecycle, membership, role assignment and the full board aggregate.
//!
//! Only the creator of a board (`boards.user_id`) may update it, delete it or
//! hand out roles. Membership alone grants read access, enforced by the
//! handlers.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{
    Board, BoardDetails, BoardMemberAdded, BoardSummary, CardDetails, ChatDetails,
    CommentResponse, CreateBoard, CreatedBoard, ListDetails, MemberDetails, Mutation, Role,
    RoleDetails, RoleName, SprintDetails, SubtaskDetails, UpdateBoard, UserLink, UserResponse,
};
use crate::repo::{
    board::BoardRepository, card::CardRepository, chat::ChatRepository, list::ListRepository,
    role::RoleRepository, sprint::SprintRepository, subtask::SubtaskRepository,
    user::UserRepository, CommentRepository,
};

#[derive(Clone)]
pub struct BoardService {
    boards: BoardRepository,
    users: UserRepository,
    roles: RoleRepository,
    chats: ChatRepository,
    sprints: SprintRepository,
    lists: ListRepository,
    cards: CardRepository,
    subtasks: SubtaskRepository,
    comments: CommentRepository,
}

impl BoardService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        boards: BoardRepository,
        users: UserRepository,
        roles: RoleRepository,
        chats: ChatRepository,
        sprints: SprintRepository,
        lists: ListRepository,
        cards: CardRepository,
        subtasks: SubtaskRepository,
        comments: CommentRepository,
    ) -> Self {
        Self {
            boards,
            users,
            roles,
            chats,
            sprints,
            lists,
            cards,
            subtasks,
            comments,
        }
    }

    /// Load the whole board tree. Unknown ids yield `None`.
    ///
    /// Sprints come back by creation time, lists and cards by `order`,
    /// subtasks, comments and chat messages by creation time.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BoardDetails>> {
        let Some(board) = self.boards.find_by_id(id).await? else {
            return Ok(None);
        };

        let creator: UserResponse = self.users.get_by_id(board.user_id).await?.into();

        let mut card_users = users_by_owner(self.cards.members_by_board(id).await?);
        let mut subtask_users = users_by_owner(self.subtasks.members_by_board(id).await?);

        let mut card_comments = HashMap::<Uuid, Vec<CommentResponse>>::new();
        let mut subtask_comments = HashMap::<Uuid, Vec<CommentResponse>>::new();
        for comment in self.comments.list_by_board(id).await? {
            match (comment.comment.card_id, comment.comment.subtask_id) {
                (Some(card_id), _) => card_comments.entry(card_id).or_default().push(comment.into()),
                (None, Some(subtask_id)) => subtask_comments
                    .entry(subtask_id)
                    .or_default()
                    .push(comment.into()),
                (None, None) => {}
            }
        }

        let mut subtasks_by_card = HashMap::<Uuid, Vec<SubtaskDetails>>::new();
        for row in self.subtasks.list_by_board(id).await? {
            let creator = row.creator();
            let subtask = row.subtask;
            subtasks_by_card
                .entry(subtask.card_id)
                .or_default()
                .push(SubtaskDetails {
                    users: subtask_users.remove(&subtask.id).unwrap_or_default(),
                    comments: subtask_comments.remove(&subtask.id).unwrap_or_default(),
                    creator,
                    subtask,
                });
        }

        let mut cards_by_list = HashMap::<Uuid, Vec<CardDetails>>::new();
        for row in self.cards.list_by_board(id).await? {
            let creator = row.creator();
            let card = row.card;
            cards_by_list.entry(card.list_id).or_default().push(CardDetails {
                users: card_users.remove(&card.id).unwrap_or_default(),
                subtasks: subtasks_by_card.remove(&card.id).unwrap_or_default(),
                comments: card_comments.remove(&card.id).unwrap_or_default(),
                creator,
                card,
            });
        }

        let mut lists_by_sprint = HashMap::<Uuid, Vec<ListDetails>>::new();
        for list in self.lists.list_by_board(id).await? {
            lists_by_sprint
                .entry(list.sprint_id)
                .or_default()
                .push(ListDetails {
                    cards: cards_by_list.remove(&list.id).unwrap_or_default(),
                    list,
                });
        }

        let sprints = self
            .sprints
            .list_by_board(id)
            .await?
            .into_iter()
            .map(|sprint| SprintDetails {
                lists: lists_by_sprint.remove(&sprint.id).unwrap_or_default(),
                sprint,
            })
            .collect();

        let mut roles_by_user = HashMap::<Uuid, Vec<Role>>::new();
        for link in self.roles.roles_by_user(id).await? {
            roles_by_user.entry(link.owner_id).or_default().push(link.role);
        }
        let users = self
            .boards
            .list_members(id)
            .await?
            .into_iter()
            .map(|user| MemberDetails {
                roles: roles_by_user.remove(&user.id).unwrap_or_default(),
                user,
            })
            .collect();

        let roles = self.role_details(id).await?;

        let chat = match self.chats.find_by_board(id).await? {
            Some(chat) => {
                let messages = self.chats.list_messages(chat.id).await?;
                Some(ChatDetails {
                    chat,
                    messages: messages.into_iter().map(Into::into).collect(),
                })
            }
            None => None,
        };

        Ok(Some(BoardDetails {
            board,
            creator,
            sprints,
            users,
            roles,
            chat,
        }))
    }

    /// Make the user with `email` a member of the board.
    pub async fn add_user_to_board(&self, email: &str, board_id: Uuid) -> Result<BoardMemberAdded> {
        let user = self.users.get_by_email(email).await?;
        let board = self.boards.get_by_id(board_id).await?;

        if self.boards.has_member(board_id, user.id).await? {
            return Err(AppError::AlreadyExists("User already on board".to_string()));
        }

        self.boards.add_member(board_id, user.id).await?;
        tracing::info!(%board_id, user_id = %user.id, "user added to board");

        Ok(BoardMemberAdded {
            board,
            user: user.into(),
        })
    }

    /// Boards the user created or belongs to, each with its chat.
    pub async fn get_all(&self, user_id: Uuid) -> Result<Vec<BoardSummary>> {
        let rows = self.boards.list_for_user(user_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create(&self, input: &CreateBoard, user_id: Uuid) -> Result<CreatedBoard> {
        let (board, chat, roles) = self
            .boards
            .create(&input.name, input.description.as_deref(), user_id)
            .await?;

        tracing::info!(board_id = %board.id, %user_id, "board created");

        Ok(CreatedBoard {
            board,
            chat,
            roles: roles
                .into_iter()
                .map(|role| RoleDetails {
                    role,
                    users: Vec::new(),
                })
                .collect(),
        })
    }

    pub async fn update(
        &self,
        input: &UpdateBoard,
        board_id: Uuid,
        user_id: Uuid,
    ) -> Result<Mutation<Board>> {
        let board = self.boards.get_by_id(board_id).await?;
        if !board.is_creator(user_id) {
            return Err(AppError::forbidden("Only creator can update board"));
        }

        let updated = self
            .boards
            .update(board_id, input.name.as_deref(), input.description.as_deref())
            .await?;

        Ok(Mutation::ok("Board updated successfully", updated))
    }

    pub async fn delete(&self, board_id: Uuid, user_id: Uuid) -> Result<Mutation<Board>> {
        let board = self.boards.get_by_id(board_id).await?;
        if !board.is_creator(user_id) {
            return Err(AppError::forbidden("Only creator can delete board"));
        }

        let deleted = self.boards.delete(board_id).await?;
        tracing::info!(%board_id, %user_id, "board deleted");

        Ok(Mutation::ok("Board deleted successfully", deleted))
    }

    /// Give a board member one of the board's roles. Creator only.
    pub async fn assign_role(
        &self,
        board_id: Uuid,
        role_name: RoleName,
        email: &str,
        user_id: Uuid,
    ) -> Result<RoleDetails> {
        let board = self.boards.get_by_id(board_id).await?;
        if !board.is_creator(user_id) {
            return Err(AppError::forbidden("Only creator can assign roles"));
        }

        let target = self.users.get_by_email(email).await?;
        if !self.boards.can_access(board_id, target.id).await? {
            return Err(AppError::Conflict(
                "User must be a board member to hold a role".to_string(),
            ));
        }

        let role = self.roles.get_by_name(board_id, role_name).await?;
        if self.roles.has_user(role.id, target.id).await? {
            return Err(AppError::AlreadyExists(format!(
                "User already has role {}",
                role_name
            )));
        }

        self.roles.add_user(role.id, target.id).await?;

        let mut users = users_by_owner(self.roles.users_by_board(board_id).await?);
        Ok(RoleDetails {
            users: users.remove(&role.id).unwrap_or_default(),
            role,
        })
    }

    async fn role_details(&self, board_id: Uuid) -> Result<Vec<RoleDetails>> {
        let mut users = users_by_owner(self.roles.users_by_board(board_id).await?);
        let roles = self.roles.list_by_board(board_id).await?;

        Ok(roles
            .into_iter()
            .map(|role| RoleDetails {
                users: users.remove(&role.id).unwrap_or_default(),
                role,
            })
            .collect())
    }
}

/// Group membership rows by the record they hang off, keeping row order.
pub(crate) fn users_by_owner(links: Vec<UserLink>) -> HashMap<Uuid, Vec<UserResponse>> {
    let mut grouped = HashMap::<Uuid, Vec<UserResponse>>::new();
    for link in links {
        grouped.entry(link.owner_id).or_default().push(link.user);
    }
    grouped
}

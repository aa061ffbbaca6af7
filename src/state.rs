use sqlx::SqlitePool;
use std::sync::Arc;

use crate::repo::{
    board::BoardRepository, card::CardRepository, chat::ChatRepository, list::ListRepository,
    role::RoleRepository, session::SessionRepository, sprint::SprintRepository,
    subtask::SubtaskRepository, user::UserRepository, CommentRepository,
};
use crate::services::{BoardService, CardService};

#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub sessions: SessionRepository,
    pub boards: BoardRepository,
    pub roles: RoleRepository,
    pub chats: ChatRepository,
    pub sprints: SprintRepository,
    pub lists: ListRepository,
    pub cards: CardRepository,
    pub subtasks: SubtaskRepository,
    pub comments: CommentRepository,
    pub board_service: BoardService,
    pub card_service: CardService,
    pub pool: Arc<SqlitePool>,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let pool = Arc::new(pool);

        let users = UserRepository::new(pool.clone());
        let boards = BoardRepository::new(pool.clone());
        let roles = RoleRepository::new(pool.clone());
        let chats = ChatRepository::new(pool.clone());
        let sprints = SprintRepository::new(pool.clone());
        let lists = ListRepository::new(pool.clone());
        let cards = CardRepository::new(pool.clone());
        let subtasks = SubtaskRepository::new(pool.clone());
        let comments = CommentRepository::new(pool.clone());

        let board_service = BoardService::new(
            boards.clone(),
            users.clone(),
            roles.clone(),
            chats.clone(),
            sprints.clone(),
            lists.clone(),
            cards.clone(),
            subtasks.clone(),
            comments.clone(),
        );
        let card_service = CardService::new(cards.clone(), lists.clone(), users.clone());

        Self {
            sessions: SessionRepository::new(pool.clone()),
            users,
            boards,
            roles,
            chats,
            sprints,
            lists,
            cards,
            subtasks,
            comments,
            board_service,
            card_service,
            pool,
        }
    }
}

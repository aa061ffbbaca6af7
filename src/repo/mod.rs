pub mod board;
pub mod card;
pub mod chat;
pub mod comment;
pub mod list;
pub mod role;
pub mod session;
pub mod sprint;
pub mod subtask;
pub mod user;

pub use comment::CommentRepository;

pub mod board;
pub mod card;
pub mod chat;
pub mod comment;
pub mod list;
pub mod role;
pub mod sprint;
pub mod subtask;
pub mod user;

pub use board::*;
pub use card::*;
pub use chat::*;
pub use comment::*;
pub use list::*;
pub use role::*;
pub use sprint::*;
pub use subtask::*;
pub use user::*;

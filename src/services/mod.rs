pub mod board;
pub mod card;

pub use board::BoardService;
pub use card::CardService;

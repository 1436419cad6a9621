mod bitboard;
mod board;
mod color;
mod file;
mod game;
mod moves;
mod piece;
mod rank;
mod role;
mod square;

pub use bitboard::*;
pub use board::*;
pub use color::*;
pub use file::*;
pub use game::*;
pub use piece::*;
pub use rank::*;
pub use role::*;
pub use square::*;

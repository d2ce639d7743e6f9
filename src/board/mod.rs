#[allow(clippy::module_inception)]
mod board;
mod chessmove;
mod piece;
mod square;

pub use board::{Board, CastlingRights, EnPassantFiles, UndoInfo};
pub use chessmove::Move;
pub use piece::Piece;
pub use square::{Color, PieceKind, Square};

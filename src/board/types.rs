//! Core board types: bitboards, squares, pieces, castling rights and moves.

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use moves::{Move, MoveList, MoveListIntoIter, ScoredMove, ScoredMoveList, MAX_MOVES};
pub use piece::{Color, Piece, PieceKind};
pub use square::Square;

/// Deepest ply the search will ever reach.
pub const MAX_PLY: usize = 64;

/// The "no move" value.
pub const EMPTY_MOVE: Move = Move::null();

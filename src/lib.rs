//! Bitboard chess engine speaking the UCI protocol.
//!
//! - [`board`]: position, move generation, evaluation, perft and search
//! - [`tt`]: transposition table
//! - [`zobrist`]: hash keys
//! - [`engine`]: background search controller and time budgets
//! - [`uci`]: protocol parsing and output

pub mod board;
pub mod engine;
pub mod tt;
pub mod uci;
pub mod zobrist;

pub use board::{Board, Color, Move, Piece, Square};
pub use tt::TranspositionTable;

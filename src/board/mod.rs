//! Chess board representation and game logic.
//!
//! Uses bitboards with magic attack tables for move generation. Positions
//! are mutated in place by `make_move` and restored from a by-value
//! `Snapshot`. Supports full chess rules including castling, en passant,
//! and promotions.
//!
//! # Example
//! ```
//! use magic_chess::board::Board;
//!
//! let mut board = Board::new();
//! let moves = board.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

pub mod attack_tables;
mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
mod perft;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use error::{FenError, MoveParseError, SquareError};
pub use eval::{ClassicEval, Evaluator, MaterialEval, MATERIAL};
pub use fen::START_FEN;
pub use make_unmake::MoveFilter;
pub use state::{Board, Snapshot};
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Move, MoveList, MoveListIntoIter, Piece,
    PieceKind, ScoredMove, ScoredMoveList, Square, EMPTY_MOVE, MAX_MOVES, MAX_PLY,
};

// Public API - search functions and configuration
pub use search::{
    find_best_move, mate_in, search, search_with, HistoryTable, KillerTable, SearchConfig,
    SearchInfoCallback, SearchIterationInfo, SearchParams, SearchResult, SearchState,
    DEFAULT_DEPTH, DRAW_SCORE, INFINITY, MATE_SCORE, MATE_VALUE,
};

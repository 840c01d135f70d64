//! Universal Chess Interface (UCI) protocol implementation.
//!
//! Handles communication with chess GUIs following the UCI specification.

use thiserror::Error;

use crate::board::{Board, FenError, Move, MoveFilter, MoveParseError};

pub mod command;
mod handler;
pub mod options;
pub mod report;

pub use handler::{run_uci_loop, UciHandler};

/// Error type for UCI position command parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UciError {
    #[error("Invalid FEN: {0}")]
    InvalidFen(#[from] FenError),
    /// A move in the `moves` list is malformed or illegal
    #[error("Invalid move '{move_str}': {error}")]
    InvalidMove {
        move_str: String,
        #[source]
        error: MoveParseError,
    },
    #[error("Missing required parts in position command")]
    MissingParts,
}

/// Parse a move in UCI format (e.g., "e2e4", "e7e8q").
///
/// Delegates to `Board::parse_move`. Returns `None` if the move is invalid.
#[must_use]
pub fn parse_uci_move(board: &mut Board, uci_string: &str) -> Option<Move> {
    board.parse_move(uci_string).ok()
}

/// Apply the arguments of a `position` command (`startpos` or `fen <fields>`,
/// optionally followed by `moves <m1> <m2> ...`).
///
/// Returns the hash of every position reached, the starting one first and
/// the final one last. On a bad move the board is left at the last position
/// that was reached and the error is returned; `history` is filled up to
/// that point.
pub fn try_parse_position_command(
    board: &mut Board,
    history: &mut Vec<u64>,
    args: &[&str],
) -> Result<(), UciError> {
    let moves_at = args.iter().position(|&t| t == "moves").unwrap_or(args.len());
    let (setup, moves) = args.split_at(moves_at);

    *board = match setup {
        ["startpos", ..] => Board::new(),
        ["fen", fields @ ..] if !fields.is_empty() => Board::try_from_fen(&fields.join(" "))?,
        _ => return Err(UciError::MissingParts),
    };
    history.clear();
    history.push(board.hash());

    for &move_str in moves.iter().skip(1) {
        let mv = board.parse_move(move_str).map_err(|error| UciError::InvalidMove {
            move_str: move_str.to_string(),
            error,
        })?;
        if board.make_move(mv, MoveFilter::All).is_none() {
            return Err(UciError::InvalidMove {
                move_str: move_str.to_string(),
                error: MoveParseError::IllegalMove {
                    notation: move_str.to_string(),
                },
            });
        }
        history.push(board.hash());
    }

    Ok(())
}

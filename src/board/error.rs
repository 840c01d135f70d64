//! Error types for chess board operations.

use thiserror::Error;

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    /// FEN string has too few parts (needs at least 4)
    #[error("FEN must have at least 4 parts, found {found}")]
    TooFewParts { found: usize },
    #[error("Invalid piece character '{char}' in FEN")]
    InvalidPiece { char: char },
    #[error("Invalid castling character '{char}' in FEN")]
    InvalidCastling { char: char },
    #[error("Invalid side to move '{found}', expected 'w' or 'b'")]
    InvalidSideToMove { found: String },
    #[error("Invalid en passant square '{found}'")]
    InvalidEnPassant { found: String },
    /// More or fewer than eight ranks in the placement field
    #[error("Expected 8 ranks in FEN, found {found}")]
    InvalidRankCount { found: usize },
    #[error("Too many files ({files}) in rank {rank}")]
    TooManyFiles { rank: usize, files: usize },
    #[error("Invalid move counter '{found}'")]
    InvalidCounter { found: String },
    #[error("Missing {color} king")]
    MissingKing { color: &'static str },
}

/// Error type for move parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    #[error("Move must be 4-5 characters, found {len}")]
    InvalidLength { len: usize },
    #[error("Invalid square notation in '{notation}'")]
    InvalidSquare { notation: String },
    #[error("Invalid promotion piece '{char}'")]
    InvalidPromotion { char: char },
    /// Move is not legal in the current position
    #[error("Illegal move '{notation}'")]
    IllegalMove { notation: String },
}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareError {
    #[error("Rank '{rank}' out of bounds (must be 1-8)")]
    RankOutOfBounds { rank: char },
    #[error("File '{file}' out of bounds (must be a-h)")]
    FileOutOfBounds { file: char },
    #[error("Invalid square notation '{notation}'")]
    InvalidNotation { notation: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_error_too_few_parts() {
        let err = FenError::TooFewParts { found: 2 };
        assert!(err.to_string().contains('2'));
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let err = FenError::InvalidPiece { char: 'z' };
        assert!(err.to_string().contains("'z'"));
    }

    #[test]
    fn test_fen_error_missing_king() {
        let err = FenError::MissingKing { color: "white" };
        assert_eq!(err.to_string(), "Missing white king");
    }

    #[test]
    fn test_move_error_illegal_move() {
        let err = MoveParseError::IllegalMove {
            notation: "e2e5".to_string(),
        };
        assert!(err.to_string().contains("e2e5"));
    }

    #[test]
    fn test_square_error_bounds() {
        assert!(SquareError::RankOutOfBounds { rank: '9' }
            .to_string()
            .contains("'9'"));
        assert!(SquareError::FileOutOfBounds { file: 'k' }
            .to_string()
            .contains("'k'"));
    }

    #[test]
    fn test_errors_are_std_errors() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&FenError::InvalidRankCount { found: 7 });
        takes_error(&MoveParseError::InvalidLength { len: 3 });
    }
}

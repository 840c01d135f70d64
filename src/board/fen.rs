use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::make_unmake::MoveFilter;
use super::{Board, CastlingRights, Color, Move, Piece, PieceKind, Square};

/// FEN of the standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// The halfmove clock and fullmove number are optional and default to 0
    /// and 1.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        // Piece placement, rank 8 first
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRankCount { found: ranks.len() });
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    if file >= 8 {
                        return Err(FenError::TooManyFiles {
                            rank: rank_idx,
                            files: file + 1,
                        });
                    }
                    board.set_piece(Square::new(rank, file as u8), piece);
                    file += 1;
                }
            }
            if file > 8 {
                return Err(FenError::TooManyFiles { rank: rank_idx, files: file });
            }
        }

        board.refresh_occupancy();

        board.side = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut castling = CastlingRights::none();
        for c in parts[2].chars() {
            match c {
                'K' => castling.set(Color::White, true),
                'Q' => castling.set(Color::White, false),
                'k' => castling.set(Color::Black, true),
                'q' => castling.set(Color::Black, false),
                '-' => {}
                _ => return Err(FenError::InvalidCastling { char: c }),
            }
        }
        board.castling = castling;

        board.en_passant = if parts[3] == "-" {
            None
        } else {
            let invalid = || FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            };
            let sq = parts[3].parse::<Square>().map_err(|_| invalid())?;
            if !board.en_passant_plausible(sq) {
                return Err(invalid());
            }
            Some(sq)
        };

        if let Some(clock) = parts.get(4) {
            board.halfmove_clock = clock.parse().map_err(|_| FenError::InvalidCounter {
                found: (*clock).to_string(),
            })?;
        }
        if let Some(number) = parts.get(5) {
            board.fullmove_number = number.parse().map_err(|_| FenError::InvalidCounter {
                found: (*number).to_string(),
            })?;
        }

        for (color, name) in [(Color::White, "white"), (Color::Black, "black")] {
            if board.pieces(Piece::new(color, PieceKind::King)).is_empty() {
                return Err(FenError::MissingKing { color: name });
            }
        }

        board.hash = board.compute_hash();
        Ok(board)
    }

    /// An en passant target must sit behind a pawn that just made a double
    /// push: on the third rank from the mover's opponent, empty, with the
    /// square it came from also empty.
    fn en_passant_plausible(&self, target: Square) -> bool {
        let them = self.side.opposite();
        let (rank, pawn_rank, origin_rank) = match self.side {
            Color::White => (5, 4, 6),
            Color::Black => (2, 3, 1),
        };
        if target.rank() != rank {
            return false;
        }
        let file = target.file();
        let pawn = Square::new(pawn_rank, file);
        let origin = Square::new(origin_rank, file);
        self.pieces(Piece::new(them, PieceKind::Pawn)).contains(pawn)
            && self.piece_at(target).is_none()
            && self.piece_at(origin).is_none()
    }

    /// Parse a FEN, falling back to the starting position (with a warning)
    /// when it is malformed.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        match Self::try_from_fen(fen) {
            Ok(board) => board,
            Err(err) => {
                log::warn!("bad FEN '{fen}': {err}; using the starting position");
                Board::new()
            }
        }
    }

    /// Convert the board position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some(piece) = self.piece_at(Square::new(rank, file)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_char());
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            self.castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parse a move in UCI long algebraic notation (e.g., "e2e4", "e7e8q").
    ///
    /// Returns the matching legal move if found, or an error describing why parsing failed.
    ///
    /// # Example
    /// ```
    /// use magic_chess::board::Board;
    ///
    /// let mut board = Board::new();
    /// let mv = board.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        if !uci.is_ascii() || uci.len() < 4 || uci.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: uci.len() });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: uci.to_string(),
        };
        let from: Square = uci[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = uci[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match uci[4..].chars().next() {
            Some(c) => match PieceKind::from_char(c) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
            None => None,
        };

        self.legal_moves()
            .into_iter()
            .find(|mv| {
                mv.from() == from
                    && mv.to() == to
                    && mv.promotion_piece().map(Piece::kind) == promotion
            })
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: uci.to_string(),
            })
    }

    /// Parse a UCI move and make it on the board in one call.
    ///
    /// # Example
    /// ```
    /// use magic_chess::board::Board;
    ///
    /// let mut board = Board::new();
    /// board.make_move_uci("e2e4").unwrap();
    /// board.make_move_uci("e7e5").unwrap();
    /// ```
    pub fn make_move_uci(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(uci)?;
        match self.make_move(mv, MoveFilter::All) {
            Some(_) => Ok(mv),
            None => Err(MoveParseError::IllegalMove {
                notation: uci.to_string(),
            }),
        }
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}

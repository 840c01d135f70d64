use std::fmt;

use crate::zobrist::ZOBRIST;

use super::{Bitboard, CastlingRights, Color, Piece, PieceKind, Square};

/// Index of the combined occupancy in `Board::occupancy`
pub(crate) const BOTH: usize = 2;

/// A chess position.
///
/// Piece placement is kept as one bitboard per colored piece; the three
/// occupancy boards (white, black, both) are derived from them and rebuilt
/// after every move. `hash` is updated incrementally and always equals
/// [`Board::compute_hash`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    pub(crate) pieces: [Bitboard; 12],
    pub(crate) occupancy: [Bitboard; 3],
    pub(crate) side: Color,
    pub(crate) en_passant: Option<Square>,
    pub(crate) castling: CastlingRights,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
}

/// Saved copy of a position taken before a move; hand it back to
/// [`Board::take_back`] to restore the position exactly.
#[derive(Clone, Copy, Debug)]
#[must_use = "a snapshot must be passed to take_back to undo the move"]
pub struct Snapshot(pub(crate) Board);

impl Board {
    /// The standard starting position
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, kind) in back_rank.iter().enumerate() {
            let file = file as u8;
            board.set_piece(Square::new(0, file), Piece::new(Color::White, *kind));
            board.set_piece(Square::new(7, file), Piece::new(Color::Black, *kind));
            board.set_piece(Square::new(1, file), Piece::WhitePawn);
            board.set_piece(Square::new(6, file), Piece::BlackPawn);
        }

        board.castling = CastlingRights::all();
        board.refresh_occupancy();
        board.hash = board.compute_hash();
        board
    }

    /// A board with no pieces, white to move and no rights
    pub(crate) fn empty() -> Self {
        Board {
            pieces: [Bitboard::EMPTY; 12],
            occupancy: [Bitboard::EMPTY; 3],
            side: Color::White,
            en_passant: None,
            castling: CastlingRights::none(),
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        }
    }

    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side
    }

    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Bitboard of one colored piece
    #[inline]
    #[must_use]
    pub fn pieces(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    /// All pieces of one color
    #[inline]
    #[must_use]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy[color.index()]
    }

    /// All pieces of both colors
    #[inline]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.occupancy[BOTH]
    }

    /// The piece standing on `sq`, if any
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        if !self.occupancy[BOTH].contains(sq) {
            return None;
        }
        let color = if self.occupancy[Color::White.index()].contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        PieceKind::ALL
            .iter()
            .map(|&kind| Piece::new(color, kind))
            .find(|piece| self.pieces[piece.index()].contains(sq))
    }

    /// Square of `color`'s king, `None` only on hand-built boards without one
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces[Piece::new(color, PieceKind::King).index()].lsb()
    }

    /// Place a piece without touching occupancy or hash
    pub(crate) fn set_piece(&mut self, sq: Square, piece: Piece) {
        self.pieces[piece.index()].set(sq);
    }

    /// Rebuild the three occupancy boards from the piece boards
    pub(crate) fn refresh_occupancy(&mut self) {
        let mut white = Bitboard::EMPTY;
        let mut black = Bitboard::EMPTY;
        for kind in PieceKind::ALL {
            white |= self.pieces[Piece::new(Color::White, kind).index()];
            black |= self.pieces[Piece::new(Color::Black, kind).index()];
        }
        self.occupancy = [white, black, white | black];
    }

    /// Hash recomputed from scratch over every field that takes part in it
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let keys = &*ZOBRIST;
        let mut hash = 0u64;

        for piece in Piece::ALL {
            for sq in self.pieces[piece.index()] {
                hash ^= keys.piece(piece, sq);
            }
        }

        if let Some(ep) = self.en_passant {
            hash ^= keys.en_passant(ep);
        }

        hash ^= keys.castling(self.castling);

        if self.side == Color::Black {
            hash ^= keys.side_key;
        }

        hash
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    /// Board diagram, rank 8 at the top, followed by the state fields
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0..8u8 {
                let c = self.piece_at(Square::new(rank, file)).map_or('.', Piece::to_char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "\n    a b c d e f g h\n")?;
        let side = match self.side {
            Color::White => "white",
            Color::Black => "black",
        };
        writeln!(f, "Side:      {side}")?;
        match self.en_passant {
            Some(sq) => writeln!(f, "Enpassant: {sq}")?,
            None => writeln!(f, "Enpassant: no")?,
        }
        writeln!(f, "Castling:  {}", self.castling)?;
        write!(f, "Hash key:  {:016x}", self.hash)
    }
}

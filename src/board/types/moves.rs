//! Bit-packed move type and move lists.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceKind};
use super::square::Square;

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const PROMOTION_SHIFT: u32 = 16;
const CAPTURED_SHIFT: u32 = 20;

const SQUARE_MASK: u32 = 0x3F;
const PIECE_MASK: u32 = 0xF;

const CAPTURE_FLAG: u32 = 1 << 24;
const DOUBLE_PUSH_FLAG: u32 = 1 << 25;
const EN_PASSANT_FLAG: u32 = 1 << 26;
const CASTLING_FLAG: u32 = 1 << 27;

/// Piece field value meaning "no piece".
const NO_PIECE: u32 = 12;

/// Compact 32-bit move representation.
///
/// Encoding:
/// - bits 0-5:   from square
/// - bits 6-11:  to square
/// - bits 12-15: moving piece (0-11)
/// - bits 16-19: promotion piece, 12 = none
/// - bits 20-23: captured piece, 12 = none
/// - bit 24:     capture
/// - bit 25:     double pawn push
/// - bit 26:     en passant
/// - bit 27:     castling
///
/// Every real move has a promotion field of at least 1 (a piece index or 12),
/// so the all-zero value is free to mean "no move".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u32);

impl Move {
    /// The empty move
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Move(0)
    }

    /// Pack every field. Prefer the named constructors below.
    #[inline]
    #[must_use]
    #[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
    pub const fn encode(
        from: Square,
        to: Square,
        piece: Piece,
        promotion: Option<Piece>,
        captured: Option<Piece>,
        capture: bool,
        double_push: bool,
        en_passant: bool,
        castling: bool,
    ) -> Self {
        let promotion = match promotion {
            Some(p) => p as u32,
            None => NO_PIECE,
        };
        let captured = match captured {
            Some(p) => p as u32,
            None => NO_PIECE,
        };
        let mut bits = ((from.index() as u32) << FROM_SHIFT)
            | ((to.index() as u32) << TO_SHIFT)
            | ((piece as u32) << PIECE_SHIFT)
            | (promotion << PROMOTION_SHIFT)
            | (captured << CAPTURED_SHIFT);
        if capture {
            bits |= CAPTURE_FLAG;
        }
        if double_push {
            bits |= DOUBLE_PUSH_FLAG;
        }
        if en_passant {
            bits |= EN_PASSANT_FLAG;
        }
        if castling {
            bits |= CASTLING_FLAG;
        }
        Move(bits)
    }

    /// Non-capturing move with no special flags
    #[inline]
    #[must_use]
    pub const fn quiet(from: Square, to: Square, piece: Piece) -> Self {
        Move::encode(from, to, piece, None, None, false, false, false, false)
    }

    #[inline]
    #[must_use]
    pub const fn capture(from: Square, to: Square, piece: Piece, victim: Piece) -> Self {
        Move::encode(from, to, piece, None, Some(victim), true, false, false, false)
    }

    #[inline]
    #[must_use]
    pub const fn double_pawn_push(from: Square, to: Square, piece: Piece) -> Self {
        Move::encode(from, to, piece, None, None, false, true, false, false)
    }

    /// En passant capture; the victim is the enemy pawn behind `to`
    #[inline]
    #[must_use]
    pub const fn en_passant(from: Square, to: Square, piece: Piece, victim: Piece) -> Self {
        Move::encode(from, to, piece, None, Some(victim), true, false, true, false)
    }

    /// King move of a castling; `to` is the king's destination
    #[inline]
    #[must_use]
    pub const fn castle(from: Square, to: Square, king: Piece) -> Self {
        Move::encode(from, to, king, None, None, false, false, false, true)
    }

    /// Promotion, optionally capturing `victim`
    #[inline]
    #[must_use]
    pub const fn promotion(
        from: Square,
        to: Square,
        pawn: Piece,
        promoted: Piece,
        victim: Option<Piece>,
    ) -> Self {
        let capture = victim.is_some();
        Move::encode(from, to, pawn, Some(promoted), victim, capture, false, false, false)
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index(((self.0 >> FROM_SHIFT) & SQUARE_MASK) as u8)
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index(((self.0 >> TO_SHIFT) & SQUARE_MASK) as u8)
    }

    /// The piece being moved
    #[inline]
    #[must_use]
    pub const fn piece(self) -> Piece {
        match Piece::from_index(((self.0 >> PIECE_SHIFT) & PIECE_MASK) as usize) {
            Some(piece) => piece,
            None => Piece::WhitePawn,
        }
    }

    #[inline]
    #[must_use]
    pub const fn promotion_piece(self) -> Option<Piece> {
        Piece::from_index(((self.0 >> PROMOTION_SHIFT) & PIECE_MASK) as usize)
    }

    #[inline]
    #[must_use]
    pub const fn captured(self) -> Option<Piece> {
        Piece::from_index(((self.0 >> CAPTURED_SHIFT) & PIECE_MASK) as usize)
    }

    /// Capture flag (en passant included)
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.0 & CAPTURE_FLAG != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_double_pawn_push(self) -> bool {
        self.0 & DOUBLE_PUSH_FLAG != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.0 & EN_PASSANT_FLAG != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        self.0 & CASTLING_FLAG != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }

    #[inline]
    #[must_use]
    pub const fn is_tactical(self) -> bool {
        self.is_capture() || self.is_promotion()
    }

    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Move(value)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "Move(null)");
        }
        write!(f, "Move({} {}{}", self.piece(), self.from(), self.to())?;
        if let Some(promo) = self.promotion_piece() {
            write!(f, "={}", promo.to_char().to_ascii_uppercase())?;
        }
        if let Some(victim) = self.captured() {
            write!(f, " x{victim}")?;
        }
        if self.is_castling() {
            write!(f, " castle")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        if self.is_double_pawn_push() {
            write!(f, " double")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    /// Long algebraic notation as used by UCI, `0000` for the null move
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion_piece() {
            write!(f, "{}", promo.kind().to_char())?;
        }
        Ok(())
    }
}

/// Upper bound on moves in one list. The largest known legal move count in a
/// reachable position is 218; pseudo-legal lists stay below this too.
pub const MAX_MOVES: usize = 256;

/// List of moves with a fixed-size backing array and explicit length.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [Move::null(); MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        debug_assert!(!mv.is_null(), "null move pushed to move list");
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        if self.len < MAX_MOVES {
            self.moves[self.len] = mv;
            self.len += 1;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Move> {
        self.as_slice().get(idx).copied()
    }

    #[must_use]
    pub fn first(&self) -> Option<Move> {
        self.get(0)
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

/// Owning iterator over moves in a `MoveList`
pub struct MoveListIntoIter {
    list: MoveList,
    idx: usize,
}

impl Iterator for MoveListIntoIter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        let mv = self.list.get(self.idx)?;
        self.idx += 1;
        Some(mv)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveListIntoIter {}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveListIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        MoveListIntoIter { list: self, idx: 0 }
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.as_slice()[idx]
    }
}

/// A move with its ordering priority.
#[derive(Clone, Copy, Debug)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Fixed-size list of scored moves.
#[derive(Clone, Debug)]
pub struct ScoredMoveList {
    moves: [ScoredMove; MAX_MOVES],
    len: usize,
}

impl ScoredMoveList {
    #[must_use]
    pub fn new() -> Self {
        ScoredMoveList {
            moves: [ScoredMove {
                mv: Move::null(),
                score: 0,
            }; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move, score: i32) {
        if self.len < MAX_MOVES {
            self.moves[self.len] = ScoredMove { mv, score };
            self.len += 1;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ScoredMove] {
        &self.moves[..self.len]
    }

    /// Stable sort, highest score first. Equal scores keep generation order.
    pub fn sort_by_score_desc(&mut self) {
        self.moves[..self.len].sort_by(|a, b| b.score.cmp(&a.score));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredMove> {
        self.as_slice().iter()
    }
}

impl Default for ScoredMoveList {
    fn default() -> Self {
        ScoredMoveList::new()
    }
}

//! Castling rights type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

pub(crate) const CASTLE_WHITE_K: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 3;

const ALL_CASTLING_RIGHTS: u8 = CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Rights that survive a move touching each square. Moving the king off e1/e8
/// clears both of that side's rights; a move from or to a rook corner clears
/// that corner's right.
#[rustfmt::skip]
const RIGHTS_KEPT: [u8; 64] = {
    let mut kept = [ALL_CASTLING_RIGHTS; 64];
    kept[0] = ALL_CASTLING_RIGHTS & !CASTLE_WHITE_Q;
    kept[4] = ALL_CASTLING_RIGHTS & !(CASTLE_WHITE_K | CASTLE_WHITE_Q);
    kept[7] = ALL_CASTLING_RIGHTS & !CASTLE_WHITE_K;
    kept[56] = ALL_CASTLING_RIGHTS & !CASTLE_BLACK_Q;
    kept[60] = ALL_CASTLING_RIGHTS & !(CASTLE_BLACK_K | CASTLE_BLACK_Q);
    kept[63] = ALL_CASTLING_RIGHTS & !CASTLE_BLACK_K;
    kept
};

/// Castling rights represented as a 4-bit mask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        CastlingRights(bits & ALL_CASTLING_RIGHTS)
    }

    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::bit_for(color, kingside) != 0
    }

    #[inline]
    pub fn set(&mut self, color: Color, kingside: bool) {
        self.0 |= Self::bit_for(color, kingside);
    }

    /// Drop every right lost by a move between `from` and `to`
    #[inline]
    pub fn update_for_move(&mut self, from: usize, to: usize) {
        self.0 &= RIGHTS_KEPT[from] & RIGHTS_KEPT[to];
    }

    /// Raw mask 0-15, also the Zobrist castling key index
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    const fn bit_for(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => CASTLE_WHITE_K,
            (Color::White, false) => CASTLE_WHITE_Q,
            (Color::Black, true) => CASTLE_BLACK_K,
            (Color::Black, false) => CASTLE_BLACK_Q,
        }
    }
}

impl fmt::Display for CastlingRights {
    /// FEN castling field, `-` when empty
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (bit, c) in [
            (CASTLE_WHITE_K, 'K'),
            (CASTLE_WHITE_Q, 'Q'),
            (CASTLE_BLACK_K, 'k'),
            (CASTLE_BLACK_Q, 'q'),
        ] {
            if self.0 & bit != 0 {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

//! Attack tables for move generation.
//!
//! Leapers (pawns, knights, kings) use plain per-square tables. Sliders use
//! magic bitboards; queens combine both slider lookups. All tables are built
//! lazily on first use and are read-only afterwards.

#![allow(clippy::inline_always)] // Hot path of move generation

mod finder;
mod magic;
mod tables;

pub use finder::find_magic;
pub use magic::Slider;

use magic::{BISHOP_TABLE, ROOK_TABLE};
use tables::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};

use crate::board::{Bitboard, Color, PieceKind, Square};

/// Force construction of every table. Optional: lookups initialise on demand.
pub fn init() {
    once_cell::sync::Lazy::force(&KNIGHT_ATTACKS);
    once_cell::sync::Lazy::force(&KING_ATTACKS);
    once_cell::sync::Lazy::force(&PAWN_ATTACKS);
    once_cell::sync::Lazy::force(&BISHOP_TABLE);
    once_cell::sync::Lazy::force(&ROOK_TABLE);
}

/// Squares attacked by a pawn of `color` standing on `sq`
#[inline(always)]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    Bitboard(PAWN_ATTACKS[color.index()][sq.as_usize()])
}

#[inline(always)]
pub fn knight_attacks(sq: Square) -> Bitboard {
    Bitboard(KNIGHT_ATTACKS[sq.as_usize()])
}

#[inline(always)]
pub fn king_attacks(sq: Square) -> Bitboard {
    Bitboard(KING_ATTACKS[sq.as_usize()])
}

/// Diagonal attacks from `sq`, stopping at (and including) the first blocker
#[inline(always)]
pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    Bitboard(BISHOP_TABLE.attack(sq.as_usize(), occupancy.0))
}

/// Orthogonal attacks from `sq`, stopping at (and including) the first blocker
#[inline(always)]
pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    Bitboard(ROOK_TABLE.attack(sq.as_usize(), occupancy.0))
}

#[inline(always)]
pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}

/// Attack set of any piece kind. `color` only matters for pawns and
/// `occupancy` only for sliders.
#[inline]
pub fn piece_attacks(kind: PieceKind, color: Color, sq: Square, occupancy: Bitboard) -> Bitboard {
    match kind {
        PieceKind::Pawn => pawn_attacks(color, sq),
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::Bishop => bishop_attacks(sq, occupancy),
        PieceKind::Rook => rook_attacks(sq, occupancy),
        PieceKind::Queen => queen_attacks(sq, occupancy),
        PieceKind::King => king_attacks(sq),
    }
}

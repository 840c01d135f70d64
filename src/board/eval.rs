//! Static evaluation.
//!
//! The search only depends on the [`Evaluator`] trait. [`ClassicEval`] is the
//! engine's default: material, piece-square tables, pawn structure, file
//! control, king shelter and a little mobility. [`MaterialEval`] counts
//! material only.

use once_cell::sync::Lazy;

use super::attack_tables::{bishop_attacks, king_attacks, knight_attacks, rook_attacks};
use super::{Bitboard, Board, Color, Piece, PieceKind, Square};

/// Maps a position to a score in centipawns from the side to move's point of
/// view. Must be deterministic.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, board: &Board) -> i32;
}

/// Piece values indexed by `PieceKind`
pub const MATERIAL: [i32; 6] = [100, 300, 350, 500, 1000, 10000];

// Piece-square tables are written rank 8 first, from white's point of view:
// white reads entry `sq ^ 56`, black reads entry `sq`.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
    90,  90,  90,  90,  90,  90,  90,  90,
    30,  30,  30,  40,  40,  30,  30,  30,
    20,  20,  20,  30,  30,  30,  20,  20,
    10,  10,  10,  20,  20,  10,  10,  10,
     5,   5,  10,  20,  20,   5,   5,   5,
     0,   0,   0,   5,   5,   0,   0,   0,
     0,   0,   0, -10, -10,   0,   0,   0,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,  10,  10,   0,   0,  -5,
    -5,   5,  20,  20,  20,  20,   5,  -5,
    -5,  10,  20,  30,  30,  20,  10,  -5,
    -5,  10,  20,  30,  30,  20,  10,  -5,
    -5,   5,  20,  10,  10,  20,   5,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5, -10,   0,   0,   0,   0, -10,  -5,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     0,   0,   0,   0,   0,   0,   0,   0,
     0,   0,   0,  10,  10,   0,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,  10,   0,   0,   0,   0,  10,   0,
     0,  30,   0,   0,   0,   0,  30,   0,
     0,   0, -10,   0,   0, -10,   0,   0,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
    50,  50,  50,  50,  50,  50,  50,  50,
    50,  50,  50,  50,  50,  50,  50,  50,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,   0,  20,  20,   0,   0,   0,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     0,   0,   5,   5,   5,   5,   0,   0,
     0,   5,   5,  10,  10,   5,   5,   0,
     0,   5,  10,  20,  20,  10,   5,   0,
     0,   5,  10,  20,  20,  10,   5,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   5,   5,  -5,  -5,   0,   5,   0,
     0,   0,   5,   0, -15,   0,  10,   0,
];

/// Bonus for a passed pawn by how many ranks it has advanced
const PASSED_PAWN_BONUS: [i32; 8] = [0, 5, 10, 20, 35, 60, 100, 200];

const DOUBLED_PAWN_PENALTY: i32 = 10;
const ISOLATED_PAWN_PENALTY: i32 = 10;
const SEMI_OPEN_FILE_SCORE: i32 = 10;
const OPEN_FILE_SCORE: i32 = 15;
const KING_SHIELD_BONUS: i32 = 10;

/// Per-square file, neighbour-file and passed-pawn masks
struct PawnMasks {
    file: [u64; 64],
    isolated: [u64; 64],
    // passed[color][sq]: squares in front of `sq` (from `color`'s side) on
    // the same and adjacent files
    passed: [[u64; 64]; 2],
}

static PAWN_MASKS: Lazy<PawnMasks> = Lazy::new(|| {
    let mut masks = PawnMasks {
        file: [0; 64],
        isolated: [0; 64],
        passed: [[0; 64]; 2],
    };
    for sq in 0..64usize {
        let file = sq % 8;
        let rank = sq / 8;
        let file_bb = |f: usize| Bitboard::FILE_A.0 << f;
        masks.file[sq] = file_bb(file);
        let mut neighbours = 0;
        if file > 0 {
            neighbours |= file_bb(file - 1);
        }
        if file < 7 {
            neighbours |= file_bb(file + 1);
        }
        masks.isolated[sq] = neighbours;

        let span = neighbours | file_bb(file);
        let above = if rank == 7 { 0 } else { !0u64 << ((rank + 1) * 8) };
        let below = if rank == 0 { 0 } else { !0u64 >> ((8 - rank) * 8) };
        masks.passed[0][sq] = span & above;
        masks.passed[1][sq] = span & below;
    }
    masks
});

#[inline]
fn table_index(color: Color, sq: Square) -> usize {
    match color {
        Color::White => sq.as_usize() ^ 56,
        Color::Black => sq.as_usize(),
    }
}

/// Material, tables and positional terms.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassicEval;

impl ClassicEval {
    /// Score for `color`'s pieces alone, positive is good for `color`
    fn side_score(board: &Board, color: Color) -> i32 {
        let masks = &*PAWN_MASKS;
        let them = color.opposite();
        let own = board.occupancy(color);
        let occupied = board.occupied();
        let own_pawns = board.pieces(Piece::new(color, PieceKind::Pawn));
        let enemy_pawns = board.pieces(Piece::new(them, PieceKind::Pawn));
        let all_pawns = own_pawns | enemy_pawns;
        let mut score = 0;

        for kind in PieceKind::ALL {
            for sq in board.pieces(Piece::new(color, kind)) {
                let s = sq.as_usize();
                let t = table_index(color, sq);
                score += MATERIAL[kind.index()];
                match kind {
                    PieceKind::Pawn => {
                        score += PAWN_TABLE[t];
                        let on_file = (own_pawns & Bitboard(masks.file[s])).count() as i32;
                        if on_file > 1 {
                            score -= on_file * DOUBLED_PAWN_PENALTY;
                        }
                        if (own_pawns & Bitboard(masks.isolated[s])).is_empty() {
                            score -= ISOLATED_PAWN_PENALTY;
                        }
                        if (enemy_pawns & Bitboard(masks.passed[color.index()][s])).is_empty() {
                            let advanced = match color {
                                Color::White => sq.rank(),
                                Color::Black => 7 - sq.rank(),
                            };
                            score += PASSED_PAWN_BONUS[advanced as usize];
                        }
                    }
                    PieceKind::Knight => {
                        score += KNIGHT_TABLE[t];
                        let n = (knight_attacks(sq) & !own).count() as i32;
                        score += (n - 4) * 4;
                    }
                    PieceKind::Bishop => {
                        score += BISHOP_TABLE[t];
                        let n = (bishop_attacks(sq, occupied) & !own).count() as i32;
                        score += (n - 5) * 5;
                    }
                    PieceKind::Rook => {
                        score += ROOK_TABLE[t];
                        let n = (rook_attacks(sq, occupied) & !own).count() as i32;
                        score += (n - 6) * 2;
                        let file = Bitboard(masks.file[s]);
                        if (all_pawns & file).is_empty() {
                            score += OPEN_FILE_SCORE;
                        } else if (own_pawns & file).is_empty() {
                            score += SEMI_OPEN_FILE_SCORE;
                        }
                    }
                    PieceKind::Queen => {}
                    PieceKind::King => {
                        score += KING_TABLE[t];
                        let file = Bitboard(masks.file[s]);
                        if (all_pawns & file).is_empty() {
                            score -= OPEN_FILE_SCORE;
                        } else if (own_pawns & file).is_empty() {
                            score -= SEMI_OPEN_FILE_SCORE;
                        }
                        // Shelter only counts once the king has left the centre files
                        let central = Bitboard::FILE_D | Bitboard::FILE_E;
                        if !central.contains(sq) {
                            let shield = (king_attacks(sq) & own_pawns).count() as i32;
                            score += shield * KING_SHIELD_BONUS;
                        }
                    }
                }
            }
        }
        score
    }
}

impl Evaluator for ClassicEval {
    fn evaluate(&self, board: &Board) -> i32 {
        let white = Self::side_score(board, Color::White) - Self::side_score(board, Color::Black);
        match board.side_to_move() {
            Color::White => white,
            Color::Black => -white,
        }
    }
}

/// Material balance only.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialEval;

impl Evaluator for MaterialEval {
    fn evaluate(&self, board: &Board) -> i32 {
        let mut white = 0;
        for kind in PieceKind::ALL {
            let value = MATERIAL[kind.index()];
            white += value * board.pieces(Piece::new(Color::White, kind)).count() as i32;
            white -= value * board.pieces(Piece::new(Color::Black, kind)).count() as i32;
        }
        match board.side_to_move() {
            Color::White => white,
            Color::Black => -white,
        }
    }
}

impl Board {
    /// Static evaluation with [`ClassicEval`], side to move's perspective
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        ClassicEval.evaluate(self)
    }
}

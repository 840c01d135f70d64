//! Precomputed attack tables for leaper pieces (knights, kings, pawns).
//!
//! Each table is built by shifting the single-square bitboard in every
//! direction the piece moves, masking off the files a shift would wrap into.

use once_cell::sync::Lazy;

const NOT_FILE_A: u64 = !0x0101_0101_0101_0101;
const NOT_FILE_H: u64 = !0x8080_8080_8080_8080;
const NOT_FILE_AB: u64 = !0x0303_0303_0303_0303;
const NOT_FILE_GH: u64 = !0xC0C0_C0C0_C0C0_C0C0;

fn knight_mask(b: u64) -> u64 {
    ((b << 17) & NOT_FILE_A)
        | ((b << 15) & NOT_FILE_H)
        | ((b << 10) & NOT_FILE_AB)
        | ((b << 6) & NOT_FILE_GH)
        | ((b >> 17) & NOT_FILE_H)
        | ((b >> 15) & NOT_FILE_A)
        | ((b >> 10) & NOT_FILE_GH)
        | ((b >> 6) & NOT_FILE_AB)
}

fn king_mask(b: u64) -> u64 {
    (b << 8)
        | (b >> 8)
        | ((b << 1) & NOT_FILE_A)
        | ((b >> 1) & NOT_FILE_H)
        | ((b << 9) & NOT_FILE_A)
        | ((b << 7) & NOT_FILE_H)
        | ((b >> 7) & NOT_FILE_A)
        | ((b >> 9) & NOT_FILE_H)
}

fn white_pawn_mask(b: u64) -> u64 {
    ((b << 7) & NOT_FILE_H) | ((b << 9) & NOT_FILE_A)
}

fn black_pawn_mask(b: u64) -> u64 {
    ((b >> 7) & NOT_FILE_A) | ((b >> 9) & NOT_FILE_H)
}

pub(crate) static KNIGHT_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| {
    let mut attacks = [0u64; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        *slot = knight_mask(1u64 << sq);
    }
    attacks
});

pub(crate) static KING_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| {
    let mut attacks = [0u64; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        *slot = king_mask(1u64 << sq);
    }
    attacks
});

// PAWN_ATTACKS[color][square]: squares a pawn of `color` on `square` attacks
pub(crate) static PAWN_ATTACKS: Lazy<[[u64; 64]; 2]> = Lazy::new(|| {
    let mut attacks = [[0u64; 64]; 2];
    for sq in 0..64 {
        let b = 1u64 << sq;
        attacks[0][sq] = white_pawn_mask(b);
        attacks[1][sq] = black_pawn_mask(b);
    }
    attacks
});

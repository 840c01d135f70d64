//! Zobrist hashing keys.
//!
//! One random 64-bit key per (piece, square), per en passant square, per
//! castling-rights configuration, plus a side-to-move key. A position hash is
//! the XOR of the keys for everything present in it, so each make-move can
//! update it incrementally.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, Piece, Square};

pub(crate) struct ZobristKeys {
    // piece_keys[piece_index][square_index], piece index as in `Piece`
    pub(crate) piece_keys: [[u64; 64]; 12],
    pub(crate) en_passant_keys: [u64; 64],
    // One key per 4-bit rights mask, so the empty mask also has a key
    pub(crate) castling_keys: [u64; 16],
    pub(crate) side_key: u64,
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64); // Fixed seed: hashes are reproducible across runs
        let mut piece_keys = [[0; 64]; 12];
        let mut en_passant_keys = [0; 64];
        let mut castling_keys = [0; 16];

        for piece in &mut piece_keys {
            for key in piece.iter_mut() {
                *key = rng.gen();
            }
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        for key in &mut castling_keys {
            *key = rng.gen();
        }

        let side_key = rng.gen();

        ZobristKeys {
            piece_keys,
            en_passant_keys,
            castling_keys,
            side_key,
        }
    }

    #[inline]
    pub(crate) fn piece(&self, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[piece.index()][sq.as_usize()]
    }

    #[inline]
    pub(crate) fn en_passant(&self, sq: Square) -> u64 {
        self.en_passant_keys[sq.as_usize()]
    }

    #[inline]
    pub(crate) fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling_keys[rights.bits() as usize]
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_distinct() {
        let keys = &*ZOBRIST;
        let mut seen = HashSet::new();
        for piece in &keys.piece_keys {
            for key in piece {
                assert!(seen.insert(*key));
            }
        }
        for key in keys.en_passant_keys.iter().chain(&keys.castling_keys) {
            assert!(seen.insert(*key));
        }
        assert!(seen.insert(keys.side_key));
    }

    #[test]
    fn test_keys_are_reproducible() {
        let fresh = ZobristKeys::new();
        assert_eq!(fresh.side_key, ZOBRIST.side_key);
        assert_eq!(fresh.piece_keys[11][63], ZOBRIST.piece_keys[11][63]);
    }
}

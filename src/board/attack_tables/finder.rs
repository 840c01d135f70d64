//! Brute-force search for magic multipliers.
//!
//! Only used offline by the `find_magics` binary and by tests; the engine
//! itself runs on the constants shipped in `magic.rs`.

use rand::Rng;

use super::magic::{attacks_on_the_fly, occupancy_subset, relevant_mask, Slider};
use crate::board::Square;

/// Random candidate with few set bits. Sparse multipliers succeed far more
/// often than uniform ones.
fn sparse_candidate<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>()
}

/// Search for a magic multiplier for a `slider` on `square`.
///
/// Tries at most `attempts` candidates. A candidate is accepted when every
/// blocker subset of the square's relevant mask maps to a table slot that is
/// either unused or already holds the same attack set. Returns `None` when no
/// candidate passed.
pub fn find_magic<R: Rng + ?Sized>(
    square: Square,
    slider: Slider,
    rng: &mut R,
    attempts: usize,
) -> Option<u64> {
    let sq = square.as_usize();
    let mask = relevant_mask(sq, slider);
    let bits = mask.count_ones();
    let size = 1usize << bits;

    let occupancies: Vec<u64> = (0..size).map(|i| occupancy_subset(i, mask)).collect();
    let attacks: Vec<u64> = occupancies
        .iter()
        .map(|&occ| attacks_on_the_fly(sq, occ, slider))
        .collect();

    let mut used: Vec<Option<u64>> = vec![None; size];
    for _ in 0..attempts {
        let magic = sparse_candidate(rng);
        // Too few high bits in the product means poor index spread
        if (mask.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < 6 {
            continue;
        }

        used.iter_mut().for_each(|slot| *slot = None);
        let mut ok = true;
        for (occ, attack) in occupancies.iter().zip(&attacks) {
            let index = (occ.wrapping_mul(magic) >> (64 - bits)) as usize;
            match used[index] {
                None => used[index] = Some(*attack),
                Some(existing) if existing == *attack => {}
                Some(_) => {
                    ok = false;
                    break;
                }
            }
        }
        if ok {
            return Some(magic);
        }
    }
    None
}

//! Transposition table for caching search results.
//!
//! A flat array of entries indexed by `hash % len`. There is no bucketing or
//! replacement policy: the last write to a slot wins. Each entry keeps the
//! full hash so a probe only hits when the position really matches.

use std::mem;

use crate::board::{MATE_SCORE, MAX_PLY};

/// Default table size in megabytes
pub const DEFAULT_TT_MB: usize = 64;
/// Smallest size the allocator falls back to
pub const MIN_TT_MB: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

/// One table slot. `key == 0` marks an empty slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub depth: i32,
    pub bound_type: BoundType,
    pub score: i32,
}

impl TTEntry {
    const EMPTY: TTEntry = TTEntry {
        key: 0,
        depth: 0,
        bound_type: BoundType::Exact,
        score: 0,
    };

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }
}

/// Mate scores are stored relative to the node that stores them, so a
/// mate-in-N keeps its distance when the entry is read at another ply.
#[inline]
fn score_to_tt(score: i32, ply: usize) -> i32 {
    let ply = ply.min(MAX_PLY) as i32;
    if score > MATE_SCORE {
        score + ply
    } else if score < -MATE_SCORE {
        score - ply
    } else {
        score
    }
}

#[inline]
fn score_from_tt(score: i32, ply: usize) -> i32 {
    let ply = ply.min(MAX_PLY) as i32;
    if score > MATE_SCORE {
        score - ply
    } else if score < -MATE_SCORE {
        score + ply
    } else {
        score
    }
}

fn entries_for(size_mb: usize) -> usize {
    (size_mb * 1024 * 1024 / mem::size_of::<TTEntry>()).max(1)
}

/// Allocate `size_mb` worth of entries, halving the request on failure.
fn allocate(size_mb: usize) -> (Vec<TTEntry>, usize) {
    let mut mb = size_mb.max(MIN_TT_MB);
    loop {
        let count = entries_for(mb);
        let mut entries = Vec::new();
        match entries.try_reserve_exact(count) {
            Ok(()) => {
                entries.resize(count, TTEntry::EMPTY);
                log::debug!("transposition table: {mb} MB, {count} entries");
                return (entries, mb);
            }
            Err(err) if mb > MIN_TT_MB => {
                log::warn!("could not allocate {mb} MB transposition table ({err}), retrying with {} MB", mb / 2);
                mb /= 2;
            }
            Err(err) => {
                log::warn!("could not allocate {mb} MB transposition table ({err}), using a minimal table");
                return (vec![TTEntry::EMPTY; 1024], 0);
            }
        }
    }
}

/// Always-replace transposition table.
pub struct TranspositionTable {
    entries: Vec<TTEntry>,
    size_mb: usize,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let (entries, size_mb) = allocate(size_mb);
        TranspositionTable { entries, size_mb }
    }

    /// Reallocate to `size_mb`, dropping every entry
    pub fn resize(&mut self, size_mb: usize) {
        // Release the old table before asking for the new one
        self.entries = Vec::new();
        let (entries, size_mb) = allocate(size_mb);
        self.entries = entries;
        self.size_mb = size_mb;
    }

    /// Size actually allocated, in megabytes
    #[must_use]
    pub fn size_mb(&self) -> usize {
        self.size_mb
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash % self.entries.len() as u64) as usize
    }

    /// Entry for `hash`, with mate scores translated to distance from the
    /// root as seen from `ply`.
    #[inline]
    pub fn probe(&self, hash: u64, ply: usize) -> Option<TTEntry> {
        let entry = self.entries[self.index(hash)];
        if entry.key != hash || entry.key == 0 {
            return None;
        }
        Some(TTEntry {
            score: score_from_tt(entry.score, ply),
            ..entry
        })
    }

    /// Overwrite the slot for `hash`
    #[inline]
    pub fn store(&mut self, hash: u64, depth: i32, score: i32, bound_type: BoundType, ply: usize) {
        let index = self.index(hash);
        self.entries[index] = TTEntry {
            key: hash,
            depth,
            bound_type,
            score: score_to_tt(score, ply),
        };
    }

    /// Returns hash table fullness in per mille (0-1000).
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        // Sample the first 1000 slots
        let sample = &self.entries[..self.entries.len().min(1000)];
        let occupied = sample.iter().filter(|e| e.key != 0).count();
        ((occupied * 1000) / sample.len().max(1)) as u32
    }

    /// Clear all entries from the table.
    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::EMPTY);
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        TranspositionTable::new(DEFAULT_TT_MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::MATE_VALUE;

    #[test]
    fn test_store_and_probe() {
        let mut tt = TranspositionTable::new(1);
        let hash = 0x1234_5678_9ABC_DEF0;

        tt.store(hash, 10, 500, BoundType::Exact, 3);

        let entry = tt.probe(hash, 7).expect("should find entry");
        assert_eq!(entry.depth(), 10);
        assert_eq!(entry.score(), 500);
        assert_eq!(entry.bound_type(), BoundType::Exact);
    }

    #[test]
    fn test_no_false_positives() {
        let mut tt = TranspositionTable::new(1);
        tt.store(0x1234_5678_9ABC_DEF0, 10, 500, BoundType::Exact, 0);
        assert!(tt.probe(0xFEDC_BA98_7654_3210, 0).is_none());
    }

    #[test]
    fn test_last_writer_wins() {
        let mut tt = TranspositionTable::new(1);
        let len = tt.len() as u64;
        let a = 12345;
        let b = a + len;
        tt.store(a, 8, 10, BoundType::Exact, 0);
        tt.store(b, 1, 20, BoundType::UpperBound, 0);
        assert!(tt.probe(a, 0).is_none());
        assert_eq!(tt.probe(b, 0).map(|e| e.score), Some(20));
    }

    #[test]
    fn test_mate_scores_adjust_by_ply() {
        let mut tt = TranspositionTable::new(1);
        // Mate found 5 plies below a node at ply 2: the root sees MATE_VALUE - 7
        tt.store(42, 4, MATE_VALUE - 7, BoundType::Exact, 2);
        // Read back at ply 6, the same mate is 5 plies away from there
        assert_eq!(tt.probe(42, 6).map(|e| e.score), Some(MATE_VALUE - 11));
        tt.store(43, 4, -(MATE_VALUE - 7), BoundType::Exact, 2);
        assert_eq!(tt.probe(43, 2).map(|e| e.score), Some(-(MATE_VALUE - 7)));
        assert_eq!(tt.probe(43, 0).map(|e| e.score), Some(-(MATE_VALUE - 5)));
    }

    #[test]
    fn test_clear_and_resize() {
        let mut tt = TranspositionTable::new(1);
        tt.store(99, 1, 1, BoundType::LowerBound, 0);
        assert!(tt.hashfull_per_mille() > 0 || tt.len() > 1000);
        tt.clear();
        assert!(tt.probe(99, 0).is_none());
        assert_eq!(tt.hashfull_per_mille(), 0);

        tt.resize(2);
        assert_eq!(tt.size_mb(), 2);
        assert_eq!(tt.len(), entries_for(2));
    }
}

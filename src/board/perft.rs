//! Perft: count leaf nodes of the legal move tree to verify move generation.

use std::sync::atomic::{AtomicBool, Ordering};

use super::make_unmake::MoveFilter;
use super::{Board, Move};

impl Board {
    /// Number of legal move sequences of length `depth` from this position
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let mut nodes = 0;
        for mv in self.generate_moves() {
            let Some(snapshot) = self.make_move(mv, MoveFilter::All) else {
                continue;
            };
            nodes += if depth == 1 { 1 } else { self.perft(depth - 1) };
            self.take_back(snapshot);
        }
        nodes
    }

    /// Perft split by root move, in generation order
    pub fn perft_divide(&mut self, depth: u32) -> Vec<(Move, u64)> {
        self.perft_divide_until(depth, &AtomicBool::new(false))
            .unwrap_or_default()
    }

    /// `perft_divide` that gives up once `stop` is raised. Returns `None` when
    /// interrupted; the board is restored either way.
    pub fn perft_divide_until(&mut self, depth: u32, stop: &AtomicBool) -> Option<Vec<(Move, u64)>> {
        let mut counts = Vec::new();
        if depth == 0 {
            return Some(counts);
        }
        for mv in self.generate_moves() {
            let Some(snapshot) = self.make_move(mv, MoveFilter::All) else {
                continue;
            };
            let nodes = self.perft_until(depth - 1, stop);
            self.take_back(snapshot);
            counts.push((mv, nodes?));
        }
        Some(counts)
    }

    /// Stop is checked at every interior node; leaves and their parents run
    /// through the plain counter.
    fn perft_until(&mut self, depth: u32, stop: &AtomicBool) -> Option<u64> {
        if depth <= 1 {
            return Some(self.perft(depth));
        }
        if stop.load(Ordering::Relaxed) {
            return None;
        }

        let mut nodes = 0;
        for mv in self.generate_moves() {
            let Some(snapshot) = self.make_move(mv, MoveFilter::All) else {
                continue;
            };
            let sub = self.perft_until(depth - 1, stop);
            self.take_back(snapshot);
            nodes += sub?;
        }
        Some(nodes)
    }
}

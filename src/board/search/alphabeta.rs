//! Core search implementation.
//!
//! This module implements:
//! - Iterative deepening with aspiration windows
//! - Principal variation search with a fail-hard alpha-beta window
//! - Null move pruning
//! - Late move reductions (LMR)
//! - Check extension
//! - Repetition detection against the game history and the search path
//! - Quiescence search over captures
//! - Move ordering (PV move, MVV-LVA, killers, history)

mod iterative;
mod pruning;
mod quiescence;

pub(super) use iterative::run;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::tt::BoundType;

use super::constants::{DRAW_SCORE, MATE_VALUE, NODE_POLL_MASK};
use super::move_order::OrderingContext;
use super::{SearchInfoCallback, SearchState};
use crate::board::eval::Evaluator;
use crate::board::{Board, MoveFilter, MoveList, ScoredMoveList, MAX_PLY};

/// Search context for a single search
pub(super) struct SearchContext<'a, E: Evaluator + ?Sized> {
    pub board: &'a mut Board,
    pub state: &'a mut SearchState,
    pub evaluator: &'a E,
    pub stop: &'a AtomicBool,
    pub start_time: Instant,
    pub deadline: Option<Instant>,
    pub node_limit: u64,
    pub nodes: u64,
    pub ply: usize,
    /// Set once the stop flag, deadline or node limit trips
    pub stopped: bool,
    /// Hashes of every position before the current one: game history, then
    /// the search path
    pub path: Vec<u64>,
    /// Still walking the previous iteration's principal variation
    pub follow_pv: bool,
    pub info_callback: Option<SearchInfoCallback>,
}

impl<E: Evaluator + ?Sized> SearchContext<'_, E> {
    /// Check the stop flag, node limit and clock
    fn poll(&mut self) {
        if self.stop.load(Ordering::Relaxed)
            || (self.node_limit > 0 && self.nodes >= self.node_limit)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
        {
            self.stopped = true;
        }
    }

    #[inline]
    fn poll_if_due(&mut self) {
        if self.nodes & NODE_POLL_MASK == 0 {
            self.poll();
        }
    }

    /// Evaluate position from side-to-move's perspective
    #[inline]
    fn evaluate(&self) -> i32 {
        self.evaluator.evaluate(self.board)
    }

    /// True if the current position occurred earlier in the game or on the
    /// current search path
    #[inline]
    fn is_repetition(&self) -> bool {
        let hash = self.board.hash();
        self.path.iter().rev().any(|&h| h == hash)
    }

    /// Order moves, giving the root line's move priority while the node is
    /// still on the principal variation
    fn order_moves(&mut self, moves: &MoveList) -> ScoredMoveList {
        let mut pv_move = None;
        if self.follow_pv {
            let candidate = self.state.pv.root_move(self.ply);
            self.follow_pv = !candidate.is_null() && moves.contains(candidate);
            if self.follow_pv {
                pv_move = Some(candidate);
            }
        }
        OrderingContext {
            killers: &self.state.killers,
            history: &self.state.history,
            ply: self.ply,
            pv_move,
        }
        .order(moves)
    }

    /// Probe the transposition table. Returns a score when the entry settles
    /// the node, otherwise narrows the window in place.
    ///
    /// An exact score inside a wide window is not returned, so the node is
    /// still searched and its principal variation rebuilt.
    fn probe_tt(&self, depth: i32, alpha: &mut i32, beta: &mut i32) -> Option<i32> {
        let entry = self.state.tt.probe(self.board.hash(), self.ply)?;
        if entry.depth < depth {
            return None;
        }
        let null_window = *beta - *alpha <= 1;
        match entry.bound_type {
            BoundType::Exact if null_window => return Some(entry.score),
            BoundType::Exact => {
                if entry.score >= *beta {
                    return Some(*beta);
                }
                if entry.score <= *alpha {
                    return Some(*alpha);
                }
            }
            BoundType::LowerBound => {
                if entry.score >= *beta {
                    return Some(*beta);
                }
                *alpha = (*alpha).max(entry.score);
            }
            BoundType::UpperBound => {
                if entry.score <= *alpha {
                    return Some(*alpha);
                }
                *beta = (*beta).min(entry.score);
            }
        }
        None
    }

    /// Principal variation search. Fail-hard: the result is clamped to
    /// `[alpha, beta]`.
    pub(super) fn pvs(&mut self, mut depth: i32, mut alpha: i32, mut beta: i32) -> i32 {
        self.poll_if_due();
        if self.stopped {
            return 0;
        }

        let ply = self.ply;
        self.state.pv.start(ply);

        if ply > 0 {
            if self.is_repetition() {
                return DRAW_SCORE;
            }
            if let Some(score) = self.probe_tt(depth, &mut alpha, &mut beta) {
                return score;
            }
        }

        if depth <= 0 {
            return self.quiescence(alpha, beta);
        }

        if ply >= MAX_PLY {
            return self.evaluate();
        }

        self.nodes += 1;

        let in_check = self.board.in_check();
        if in_check {
            depth += 1;
        }

        if let Some(score) = self.null_move_cutoff(depth, beta, in_check) {
            return score;
        }

        let moves = self.board.generate_moves();
        let ordered = self.order_moves(&moves);
        let pv_move = self.state.pv.root_move(ply);

        let mut bound = BoundType::UpperBound;
        let mut legal_moves = 0;

        for scored in ordered.iter() {
            let mv = scored.mv;
            let hash = self.board.hash();
            let Some(snapshot) = self.board.make_move(mv, MoveFilter::All) else {
                continue;
            };
            self.path.push(hash);
            self.ply += 1;
            legal_moves += 1;

            let score = if legal_moves == 1 {
                -self.pvs(depth - 1, -beta, -alpha)
            } else {
                let gives_check = self.board.in_check();
                let reduce =
                    self.lmr_allowed(mv, pv_move, legal_moves - 1, depth, in_check, gives_check);
                let mut score = if reduce {
                    let reduced = depth - 1 - self.state.params().lmr_reduction;
                    -self.pvs(reduced, -alpha - 1, -alpha)
                } else {
                    // Force the full depth probe below
                    alpha + 1
                };
                if score > alpha {
                    score = -self.pvs(depth - 1, -alpha - 1, -alpha);
                    if score > alpha && score < beta {
                        score = -self.pvs(depth - 1, -beta, -alpha);
                    }
                }
                score
            };

            self.ply -= 1;
            self.path.pop();
            self.board.take_back(snapshot);

            if self.stopped {
                return 0;
            }

            if score > alpha {
                bound = BoundType::Exact;
                alpha = score;
                self.state.pv.update(ply, mv);

                if score >= beta {
                    self.state.tt.store(self.board.hash(), depth, beta, BoundType::LowerBound, ply);
                    if !mv.is_capture() {
                        self.state.killers.update(ply, mv);
                        self.state.history.update(mv.piece(), mv.to(), depth);
                    }
                    return beta;
                }
            }
        }

        if legal_moves == 0 {
            return if in_check { -MATE_VALUE + ply as i32 } else { DRAW_SCORE };
        }

        self.state.tt.store(self.board.hash(), depth, alpha, bound, ply);
        alpha
    }
}

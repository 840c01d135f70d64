//! Time management for the `go` command.
//!
//! The protocol layer turns clock fields into a [`TimeControl`] and wraps it
//! with any explicit depth or node cap in [`SearchLimits`], which then yields
//! the [`SearchConfig`] handed to the search.

use crate::board::{SearchConfig, DEFAULT_DEPTH, MAX_PLY};

/// Default moves to go estimate when not specified
pub const DEFAULT_MOVES_TO_GO: u64 = 30;

/// Reserved per move for communication latency
pub const MOVE_OVERHEAD_MS: u64 = 100;

/// Only this fraction of the increment is spent on top of the base slice
const INCREMENT_DIVISOR: u64 = 3;

/// Time control settings for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeControl {
    /// No clock information: fixed depth search
    #[default]
    Depth,
    /// Search until stopped
    Infinite,
    /// Fixed time per move
    MoveTime { time_ms: u64 },
    /// Remaining time and increment for the side to move
    Incremental {
        time_left_ms: u64,
        inc_ms: u64,
        movestogo: Option<u64>,
    },
}

impl TimeControl {
    /// Check if this is an unlimited time control (infinite or depth-based).
    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        matches!(self, TimeControl::Infinite | TimeControl::Depth)
    }

    /// Milliseconds to spend on this move, `None` when the clock is not a
    /// constraint.
    #[must_use]
    pub fn budget_ms(&self) -> Option<u64> {
        match *self {
            TimeControl::Depth | TimeControl::Infinite => None,
            TimeControl::MoveTime { time_ms } => Some(time_ms.max(1)),
            TimeControl::Incremental {
                time_left_ms,
                inc_ms,
                movestogo,
            } => Some(incremental_budget(time_left_ms, inc_ms, movestogo)),
        }
    }
}

/// `remaining / movestogo - overhead + inc / 3`, never below one millisecond
fn incremental_budget(time_left_ms: u64, inc_ms: u64, movestogo: Option<u64>) -> u64 {
    let moves_to_go = movestogo.unwrap_or(DEFAULT_MOVES_TO_GO).max(1);
    let slice = (time_left_ms / moves_to_go).saturating_sub(MOVE_OVERHEAD_MS);
    (slice + inc_ms / INCREMENT_DIVISOR).max(1)
}

/// Everything a `go` command constrains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Explicit depth cap from `go depth`
    pub depth: Option<u32>,
    /// Explicit node cap from `go nodes`
    pub nodes: Option<u64>,
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Depth the search may reach.
    ///
    /// An explicit depth always wins. Otherwise a clock lets the search run
    /// to `MAX_PLY` and the deadline decides, while a bare `go` searches
    /// `DEFAULT_DEPTH` plies.
    #[must_use]
    pub fn max_depth(&self) -> u32 {
        match (self.depth, self.time_control) {
            (Some(depth), _) => depth.clamp(1, MAX_PLY as u32),
            (None, TimeControl::Depth) => DEFAULT_DEPTH,
            (None, _) => MAX_PLY as u32,
        }
    }

    /// Build the search configuration, without an info callback.
    #[must_use]
    pub fn to_config(&self) -> SearchConfig {
        let mut config = SearchConfig::depth(self.max_depth());
        if let Some(budget) = self.time_control.budget_ms() {
            config = config.with_time(budget);
        }
        if let Some(nodes) = self.nodes {
            config = config.with_nodes(nodes);
        }
        config
    }
}

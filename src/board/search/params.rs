#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable search parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchParams {
    /// Half-width of the aspiration window around the previous score
    pub aspiration_window: i32,
    /// Moves searched at full depth before late move reductions start
    pub lmr_full_depth_moves: usize,
    pub lmr_min_depth: i32,
    /// Extra plies removed from a reduced move
    pub lmr_reduction: i32,
    pub null_reduction: i32,
    pub null_min_depth: i32,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            aspiration_window: 50,
            lmr_full_depth_moves: 4,
            lmr_min_depth: 3,
            lmr_reduction: 1,
            null_reduction: 2,
            null_min_depth: 3,
        }
    }
}

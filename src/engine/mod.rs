//! Engine controller for managing search and game state.
//!
//! Sits between the protocol layer and the search: owns the game position,
//! runs searches on a background thread and computes time budgets.

mod controller;
pub mod time;

pub use controller::{EngineController, PerftOutcome, SearchJob};
pub use time::{SearchLimits, TimeControl, DEFAULT_MOVES_TO_GO, MOVE_OVERHEAD_MS};

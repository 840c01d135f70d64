//! Search constants.
//!
//! Score sentinels and move ordering priorities shared by the alpha-beta
//! search, quiescence and the transposition table.

// ============================================================================
// SCORES
// ============================================================================

/// Bound on every score the search can return
pub const INFINITY: i32 = 50000;

/// Score of being checkmated at the root; mates further away score `ply` less
pub const MATE_VALUE: i32 = 49000;

/// Scores with absolute value above this are forced mates
pub const MATE_SCORE: i32 = 48000;

pub const DRAW_SCORE: i32 = 0;

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================
// Higher scores = tried earlier. Ordered: PV > captures > killers > history

/// Move from the previous iteration's principal variation
pub const PV_MOVE_SCORE: i32 = 20000;

/// Base added to every MVV-LVA capture score
pub const CAPTURE_SCORE: i32 = 10000;

/// Most recent quiet move that caused a beta cutoff at this ply
pub const KILLER1_SCORE: i32 = 9000;

/// Previous killer
pub const KILLER2_SCORE: i32 = 8000;

/// Most valuable victim / least valuable attacker, indexed `[attacker][victim]`
/// by piece kind.
pub const MVV_LVA: [[i32; 6]; 6] = [
    [105, 205, 305, 405, 505, 605],
    [104, 204, 304, 404, 504, 604],
    [103, 203, 303, 403, 503, 603],
    [102, 202, 302, 402, 502, 602],
    [101, 201, 301, 401, 501, 601],
    [100, 200, 300, 400, 500, 600],
];

// ============================================================================
// LIMITS
// ============================================================================

/// The stop flag and clock are polled when `nodes & NODE_POLL_MASK == 0`
pub const NODE_POLL_MASK: u64 = 2047;

/// Depth used when `go` carries neither a depth nor a clock
pub const DEFAULT_DEPTH: u32 = 24;

//! Search module implementing principal variation search with iterative deepening.
//!
//! Features:
//! - Iterative deepening with aspiration windows
//! - PVS with null move pruning and late move reductions
//! - Quiescence search with stand-pat
//! - Move ordering (PV move, MVV-LVA, killers, history)
//! - Always-replace transposition table for cutoffs
//!
//! The search is single threaded. It polls an external stop flag, a node
//! limit and a deadline every 2048 nodes and unwinds to the last completed
//! iteration when any of them trips.

mod alphabeta;
mod constants;
mod move_order;
mod params;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::tt::{TranspositionTable, DEFAULT_TT_MB};

use super::eval::{ClassicEval, Evaluator};
use super::{Board, Move, Piece, Square, EMPTY_MOVE, MAX_PLY};

pub use constants::{DEFAULT_DEPTH, DRAW_SCORE, INFINITY, MATE_SCORE, MATE_VALUE};
pub use params::SearchParams;

/// Two killer slots per ply, most recent first.
pub struct KillerTable {
    slots: [[Move; 2]; MAX_PLY],
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KillerTable {
    #[must_use]
    pub fn new() -> Self {
        KillerTable {
            slots: [[EMPTY_MOVE; 2]; MAX_PLY],
        }
    }

    #[must_use]
    pub fn primary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(EMPTY_MOVE, |row| row[0])
    }

    #[must_use]
    pub fn secondary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(EMPTY_MOVE, |row| row[1])
    }

    pub fn update(&mut self, ply: usize, mv: Move) {
        let Some(row) = self.slots.get_mut(ply) else {
            return;
        };
        row[1] = row[0];
        row[0] = mv;
    }

    pub fn reset(&mut self) {
        self.slots = [[EMPTY_MOVE; 2]; MAX_PLY];
    }
}

/// Quiet move history indexed by moving piece and destination square.
pub struct HistoryTable {
    entries: [[i32; 64]; 12],
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTable {
    #[must_use]
    pub fn new() -> Self {
        HistoryTable { entries: [[0; 64]; 12] }
    }

    #[must_use]
    pub fn score(&self, piece: Piece, to: Square) -> i32 {
        self.entries[piece.index()][to.as_usize()]
    }

    /// Reward a quiet move that caused a beta cutoff
    pub fn update(&mut self, piece: Piece, to: Square, depth: i32) {
        let entry = &mut self.entries[piece.index()][to.as_usize()];
        *entry = entry.saturating_add(depth * depth);
    }

    pub fn reset(&mut self) {
        self.entries = [[0; 64]; 12];
    }
}

/// Triangular principal variation table. Row `ply` holds the best line
/// found from that ply, in columns `ply..length[ply]`.
pub(crate) struct PvTable {
    moves: [[Move; MAX_PLY + 1]; MAX_PLY + 1],
    length: [usize; MAX_PLY + 1],
}

impl PvTable {
    pub(crate) fn new() -> Self {
        PvTable {
            moves: [[EMPTY_MOVE; MAX_PLY + 1]; MAX_PLY + 1],
            length: [0; MAX_PLY + 1],
        }
    }

    /// Empty the line for a node being entered at `ply`
    #[inline]
    pub(crate) fn start(&mut self, ply: usize) {
        if ply <= MAX_PLY {
            self.length[ply] = ply;
        }
    }

    /// Record `mv` as best at `ply` followed by the child's line
    pub(crate) fn update(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }
        self.moves[ply][ply] = mv;
        let child_len = self.length[ply + 1].max(ply + 1);
        for next in ply + 1..child_len {
            self.moves[ply][next] = self.moves[ply + 1][next];
        }
        self.length[ply] = child_len;
    }

    /// Move of the root line at `ply`, if the line is that long
    #[inline]
    pub(crate) fn root_move(&self, ply: usize) -> Move {
        self.moves[0].get(ply).copied().unwrap_or(EMPTY_MOVE)
    }

    pub(crate) fn root_line(&self) -> &[Move] {
        &self.moves[0][..self.length[0]]
    }

    pub(crate) fn clear(&mut self) {
        self.moves = [[EMPTY_MOVE; MAX_PLY + 1]; MAX_PLY + 1];
        self.length = [0; MAX_PLY + 1];
    }
}

/// Search state persisted across searches
pub struct SearchState {
    pub(crate) tt: TranspositionTable,
    pub(crate) killers: KillerTable,
    pub(crate) history: HistoryTable,
    pub(crate) pv: Box<PvTable>,
    /// Hashes of the positions played before the root, oldest first
    game_history: Vec<u64>,
    params: SearchParams,
}

impl SearchState {
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        SearchState {
            tt: TranspositionTable::new(tt_mb),
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            pv: Box::new(PvTable::new()),
            game_history: Vec::new(),
            params: SearchParams::default(),
        }
    }

    /// Reset per-search heuristics. The transposition table is kept.
    pub fn new_search(&mut self) {
        self.killers.reset();
        self.history.reset();
        self.pv.clear();
    }

    /// Forget everything learned about the previous game
    pub fn new_game(&mut self) {
        self.new_search();
        self.tt.clear();
        self.game_history.clear();
    }

    pub fn resize_tt(&mut self, tt_mb: usize) {
        self.tt.resize(tt_mb);
    }

    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    #[must_use]
    pub fn tt_size_mb(&self) -> usize {
        self.tt.size_mb()
    }

    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        self.tt.hashfull_per_mille()
    }

    /// Replace the list of positions that precede the root
    pub fn set_game_history(&mut self, hashes: Vec<u64>) {
        self.game_history = hashes;
    }

    pub fn push_history(&mut self, hash: u64) {
        self.game_history.push(hash);
    }

    #[must_use]
    pub fn game_history(&self) -> &[u64] {
        &self.game_history
    }

    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SearchParams {
        &mut self.params
    }

    pub fn set_params(&mut self, params: SearchParams) {
        self.params = params;
    }
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::new(DEFAULT_TT_MB)
    }
}

// ============================================================================
// SEARCH API
// ============================================================================

/// Configuration for a search operation.
#[derive(Clone, Default)]
pub struct SearchConfig {
    /// Maximum depth to search (None = `MAX_PLY`)
    pub max_depth: Option<u32>,
    /// Time limit in milliseconds (0 = unlimited)
    pub time_limit_ms: u64,
    /// Node limit (0 = unlimited)
    pub node_limit: u64,
    /// Optional callback for iteration info
    pub info_callback: Option<SearchInfoCallback>,
}

impl SearchConfig {
    /// Create a depth-limited search config
    #[must_use]
    pub fn depth(max_depth: u32) -> Self {
        SearchConfig {
            max_depth: Some(max_depth),
            ..Default::default()
        }
    }

    /// Set time limit
    #[must_use]
    pub fn with_time(mut self, time_limit_ms: u64) -> Self {
        self.time_limit_ms = time_limit_ms;
        self
    }

    /// Set node limit
    #[must_use]
    pub fn with_nodes(mut self, node_limit: u64) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// Attach a callback for iteration info reporting.
    #[must_use]
    pub fn with_info_callback(mut self, callback: SearchInfoCallback) -> Self {
        self.info_callback = Some(callback);
        self
    }
}

/// Information about a completed search iteration.
#[derive(Debug, Clone)]
pub struct SearchIterationInfo {
    pub depth: u32,
    pub nodes: u64,
    pub nps: u64,
    pub time_ms: u64,
    pub score: i32,
    /// Moves to mate, negative when the side to move is getting mated
    pub mate_in: Option<i32>,
    pub pv: Vec<Move>,
}

/// Callback type for iteration info.
pub type SearchInfoCallback = Arc<dyn Fn(&SearchIterationInfo) + Send + Sync>;

/// Result of a search
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// The best move found, `None` only when the side to move has no legal move
    pub best_move: Option<Move>,
    /// Score of the last completed iteration
    pub score: i32,
    /// Last completed depth (0 if the first iteration was interrupted)
    pub depth: u32,
    pub nodes: u64,
    pub pv: Vec<Move>,
}

/// Moves to mate for a mate score, `None` for ordinary scores
#[must_use]
pub fn mate_in(score: i32) -> Option<i32> {
    if score > MATE_SCORE {
        Some((MATE_VALUE - score + 1) / 2)
    } else if score < -MATE_SCORE {
        Some(-(MATE_VALUE + score) / 2)
    } else {
        None
    }
}

/// Run a search with the given evaluator.
#[allow(clippy::needless_pass_by_value)] // Config is intentionally consumed
pub fn search_with<E: Evaluator + ?Sized>(
    board: &mut Board,
    state: &mut SearchState,
    config: SearchConfig,
    stop: &AtomicBool,
    evaluator: &E,
) -> SearchResult {
    alphabeta::run(board, state, &config, stop, evaluator)
}

/// Run a search with the default evaluation.
///
/// # Example
/// ```
/// use std::sync::atomic::AtomicBool;
/// use magic_chess::board::{search, Board, SearchConfig, SearchState};
///
/// let mut board = Board::new();
/// let mut state = SearchState::new(4);
/// let result = search(&mut board, &mut state, SearchConfig::depth(3), &AtomicBool::new(false));
/// assert!(result.best_move.is_some());
/// ```
pub fn search(
    board: &mut Board,
    state: &mut SearchState,
    config: SearchConfig,
    stop: &AtomicBool,
) -> SearchResult {
    search_with(board, state, config, stop, &ClassicEval)
}

/// Find best move with fixed depth limit
pub fn find_best_move(
    board: &mut Board,
    state: &mut SearchState,
    max_depth: u32,
    stop: &AtomicBool,
) -> Option<Move> {
    search(board, state, SearchConfig::depth(max_depth), stop).best_move
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, Square};

    #[test]
    fn test_killers_shift() {
        let mut killers = KillerTable::new();
        let a = Move::quiet(Square::G1, Square::new(2, 5), Piece::WhiteKnight);
        let b = Move::quiet(Square::B1, Square::new(2, 2), Piece::WhiteKnight);
        killers.update(3, a);
        killers.update(3, b);
        assert_eq!(killers.primary(3), b);
        assert_eq!(killers.secondary(3), a);
        assert!(killers.primary(4).is_null());
        // Out of range plies are ignored
        killers.update(MAX_PLY, a);
        assert!(killers.primary(MAX_PLY).is_null());
    }

    #[test]
    fn test_history_accumulates_depth_squared() {
        let mut history = HistoryTable::new();
        history.update(Piece::WhiteKnight, Square::new(2, 5), 3);
        history.update(Piece::WhiteKnight, Square::new(2, 5), 2);
        assert_eq!(history.score(Piece::WhiteKnight, Square::new(2, 5)), 13);
        assert_eq!(history.score(Piece::BlackKnight, Square::new(2, 5)), 0);
        history.reset();
        assert_eq!(history.score(Piece::WhiteKnight, Square::new(2, 5)), 0);
    }

    #[test]
    fn test_pv_table_splices_child_line() {
        let mut pv = PvTable::new();
        let e4 = Move::double_pawn_push(Square::new(1, 4), Square::new(3, 4), Piece::WhitePawn);
        let e5 = Move::double_pawn_push(Square::new(6, 4), Square::new(4, 4), Piece::BlackPawn);
        pv.start(0);
        pv.start(1);
        pv.start(2);
        pv.update(1, e5);
        pv.update(0, e4);
        assert_eq!(pv.root_line(), &[e4, e5]);
        assert_eq!(pv.root_move(1), e5);
        assert!(pv.root_move(2).is_null());
    }

    #[test]
    fn test_mate_in() {
        assert_eq!(mate_in(MATE_VALUE - 1), Some(1));
        assert_eq!(mate_in(MATE_VALUE - 3), Some(2));
        assert_eq!(mate_in(-(MATE_VALUE - 2)), Some(-1));
        assert_eq!(mate_in(350), None);
    }

    #[test]
    fn test_new_game_clears_history() {
        let mut state = SearchState::new(1);
        state.push_history(42);
        assert_eq!(state.game_history(), &[42]);
        state.new_game();
        assert!(state.game_history().is_empty());
    }
}

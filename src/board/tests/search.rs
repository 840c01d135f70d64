//! Search algorithm tests.
//!
//! Tests for the public search entry points: mate finding, draws,
//! stop handling and the tables that survive between searches.

use std::sync::atomic::AtomicBool;

use crate::board::search::{find_best_move, search, search_with, SearchConfig, SearchState};
use crate::board::{Board, MaterialEval, MATE_SCORE, MATE_VALUE};

// ============================================================================
// Alpha-beta search tests
// ============================================================================

#[test]
fn alphabeta_finds_back_rank_mate() {
    // Re8 is mate behind the pawn shield
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4R2K w - - 0 1");
    let mut state = SearchState::new(1);
    let stop = AtomicBool::new(false);

    let best = find_best_move(&mut board, &mut state, 3, &stop);
    assert_eq!(best.map(|mv| mv.to_string()).as_deref(), Some("e1e8"));
}

#[test]
fn alphabeta_scores_mate_in_one() {
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4R2K w - - 0 1");
    let mut state = SearchState::new(1);
    let result = search(&mut board, &mut state, SearchConfig::depth(3), &AtomicBool::new(false));

    assert_eq!(result.score, MATE_VALUE - 1);
    assert!(result.score > MATE_SCORE);
}

#[test]
fn alphabeta_handles_stalemate() {
    // Black king on a8 has no moves and is not in check
    let mut board = Board::from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1");
    let mut state = SearchState::new(1);
    let stop = AtomicBool::new(false);

    assert!(find_best_move(&mut board, &mut state, 4, &stop).is_none());
}

#[test]
fn alphabeta_returns_none_when_checkmated() {
    let mut board =
        Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    let mut state = SearchState::new(1);
    let stop = AtomicBool::new(false);

    assert!(board.is_checkmate());
    assert!(find_best_move(&mut board, &mut state, 3, &stop).is_none());
}

#[test]
fn search_captures_hanging_queen() {
    let mut board = Board::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
    let mut state = SearchState::new(1);
    let stop = AtomicBool::new(false);

    let best = find_best_move(&mut board, &mut state, 3, &stop);
    assert_eq!(best.map(|mv| mv.to_string()).as_deref(), Some("d1d5"));
}

#[test]
fn search_leaves_board_unchanged() {
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let before = board;
    let mut state = SearchState::new(1);
    let _ = search(&mut board, &mut state, SearchConfig::depth(4), &AtomicBool::new(false));
    assert_eq!(board, before);
}

#[test]
fn search_is_deterministic_from_a_fresh_state() {
    let run = || {
        let mut board = Board::new();
        let mut state = SearchState::new(1);
        search(&mut board, &mut state, SearchConfig::depth(5), &AtomicBool::new(false))
    };
    let first = run();
    let second = run();
    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.score, second.score);
    assert_eq!(first.nodes, second.nodes);
    assert_eq!(first.pv, second.pv);
}

#[test]
fn search_with_custom_evaluator() {
    let mut board = Board::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
    let mut state = SearchState::new(1);
    let result = search_with(
        &mut board,
        &mut state,
        SearchConfig::depth(2),
        &AtomicBool::new(false),
        &MaterialEval,
    );
    assert_eq!(result.best_move.map(|mv| mv.to_string()).as_deref(), Some("d1d5"));
    assert!(result.score > 0);
}

// ============================================================================
// Draw handling
// ============================================================================

#[test]
fn search_scores_forced_repetition_as_draw() {
    // Ka2 is the only legal move and the resulting position already
    // occurred in the game, so a rook down still scores as a draw
    let fen = "1r6/8/8/8/8/2k5/8/K7 w - - 0 1";
    let mut after = Board::from_fen(fen);
    after.make_move_uci("a1a2").unwrap();

    let mut board = Board::from_fen(fen);
    assert_eq!(board.legal_moves().len(), 1);
    let mut state = SearchState::new(1);
    let without_history =
        search(&mut board, &mut state, SearchConfig::depth(1), &AtomicBool::new(false));
    assert!(without_history.score < -300);

    let mut state = SearchState::new(1);
    state.set_game_history(vec![after.hash()]);
    let result = search(&mut board, &mut state, SearchConfig::depth(1), &AtomicBool::new(false));
    assert_eq!(result.score, 0);
    assert_eq!(result.best_move.map(|mv| mv.to_string()).as_deref(), Some("a1a2"));
}

#[test]
fn game_history_is_kept_between_searches() {
    let mut state = SearchState::new(1);
    state.set_game_history(vec![1, 2, 3]);
    state.push_history(4);

    let mut board = Board::new();
    let _ = search(&mut board, &mut state, SearchConfig::depth(2), &AtomicBool::new(false));
    assert_eq!(state.game_history(), &[1, 2, 3, 4]);
}

// ============================================================================
// Limits
// ============================================================================

#[test]
fn search_respects_stop_flag() {
    let mut board = Board::new();
    let mut state = SearchState::new(1);
    let stop = AtomicBool::new(true);

    let result = search(&mut board, &mut state, SearchConfig::depth(20), &stop);
    assert_eq!(result.depth, 0);
    assert!(result.best_move.is_some());
}

#[test]
fn search_respects_time_limit() {
    let mut board = Board::new();
    let mut state = SearchState::new(1);
    let start = std::time::Instant::now();

    let result = search(
        &mut board,
        &mut state,
        SearchConfig::default().with_time(50),
        &AtomicBool::new(false),
    );
    assert!(result.best_move.is_some());
    assert!(start.elapsed().as_millis() < 2000);
}

#[test]
fn search_state_survives_new_game() {
    let mut board = Board::new();
    let mut state = SearchState::new(1);
    let _ = search(&mut board, &mut state, SearchConfig::depth(4), &AtomicBool::new(false));
    assert!(state.hashfull_per_mille() > 0);

    state.new_game();
    assert_eq!(state.hashfull_per_mille(), 0);
    assert!(state.game_history().is_empty());
}

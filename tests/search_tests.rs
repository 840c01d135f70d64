//! Search tests to verify the engine finds correct moves in various positions.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use magic_chess::board::{
    find_best_move, search, Board, SearchConfig, SearchIterationInfo, SearchState,
};
use magic_chess::uci::try_parse_position_command;

/// Test that the engine takes a queen left en prise
#[test]
fn captures_free_queen() {
    let mut board = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p1q1/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 0 3");
    let mut state = SearchState::new(4);
    let stop = AtomicBool::new(false);

    let best = find_best_move(&mut board, &mut state, 4, &stop).expect("a move");
    assert_eq!(best.to_string(), "f3g5");
}

/// Test that the engine answers an attack on its queen by taking the attacker
#[test]
fn takes_bishop_attacking_queen() {
    // The g4 bishop attacks the f3 queen and is itself undefended
    let mut board =
        Board::from_fen("rn1qkbnr/ppp1pppp/8/3p4/4P1b1/5Q2/PPPP1PPP/RNB1KBNR w KQkq - 2 3");
    let mut state = SearchState::new(4);
    let stop = AtomicBool::new(false);

    let best = find_best_move(&mut board, &mut state, 4, &stop).expect("a move");
    assert_eq!(best.to_string(), "f3g4");
}

#[test]
fn single_legal_move_is_returned() {
    // Only Ka2 is legal
    let mut board = Board::from_fen("1r6/8/8/8/8/2k5/8/K7 w - - 0 1");
    let mut state = SearchState::new(4);
    let stop = AtomicBool::new(false);

    let best = find_best_move(&mut board, &mut state, 5, &stop).expect("a move");
    assert_eq!(best.to_string(), "a1a2");
}

#[test]
fn no_move_in_checkmate_or_stalemate() {
    let stop = AtomicBool::new(false);
    for fen in [
        "rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        "k7/8/1QK5/8/8/8/8/8 b - - 0 1",
    ] {
        let mut board = Board::from_fen(fen);
        let mut state = SearchState::new(4);
        assert_eq!(find_best_move(&mut board, &mut state, 3, &stop), None, "{fen}");
    }
}

#[test]
fn fixed_depth_search_is_deterministic() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let run = || {
        let mut board = Board::from_fen(fen);
        let mut state = SearchState::new(4);
        search(&mut board, &mut state, SearchConfig::depth(4), &AtomicBool::new(false))
    };
    let a = run();
    let b = run();
    assert_eq!(a.best_move, b.best_move);
    assert_eq!(a.score, b.score);
    assert_eq!(a.nodes, b.nodes);
}

#[test]
fn iterative_deepening_reports_growing_node_counts() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let config = SearchConfig::depth(5).with_info_callback(Arc::new(
        move |info: &SearchIterationInfo| {
            sink.lock().unwrap().push((info.depth, info.nodes));
        },
    ));

    let mut board = Board::new();
    let mut state = SearchState::new(4);
    let result = search(&mut board, &mut state, config, &AtomicBool::new(false));

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 5);
    assert!(log.windows(2).all(|w| w[0].0 < w[1].0 && w[0].1 <= w[1].1));
    assert_eq!(result.nodes, log[4].1);
}

/// A line that returns to an earlier position scores as a draw once the
/// game history from the `position` command is loaded
#[test]
fn repetition_from_game_history_is_a_draw() {
    let args = [
        "fen", "1r6/8/8/8/8/2k5/8/K7", "w", "-", "-", "0", "1", "moves", "a1a2", "b8b7",
        "a2a1", "b7b8",
    ];
    let mut board = Board::new();
    let mut history = Vec::new();
    try_parse_position_command(&mut board, &mut history, &args).unwrap();
    assert_eq!(history.len(), 5);
    assert_eq!(history[0], board.hash());

    let mut state = SearchState::new(4);
    state.set_game_history(history);
    let result = search(&mut board, &mut state, SearchConfig::depth(1), &AtomicBool::new(false));
    assert_eq!(result.score, 0);
}

#[test]
fn time_limited_search_returns_promptly() {
    let mut board = Board::new();
    let mut state = SearchState::new(4);
    let start = std::time::Instant::now();
    let result = search(
        &mut board,
        &mut state,
        SearchConfig::default().with_time(100),
        &AtomicBool::new(false),
    );
    assert!(result.best_move.is_some());
    assert!(result.depth >= 1);
    assert!(start.elapsed().as_millis() < 3000);
}

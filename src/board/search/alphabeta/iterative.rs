use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

use super::SearchContext;
use crate::board::eval::Evaluator;
use crate::board::search::constants::INFINITY;
use crate::board::search::{mate_in, SearchConfig, SearchIterationInfo, SearchResult, SearchState};
use crate::board::{Board, MAX_PLY};

impl<E: Evaluator + ?Sized> SearchContext<'_, E> {
    fn report(&self, depth: u32, score: i32) {
        let Some(callback) = &self.info_callback else {
            return;
        };
        let time_ms = self.start_time.elapsed().as_millis() as u64;
        let nps = if time_ms > 0 { self.nodes * 1000 / time_ms } else { 0 };
        callback(&SearchIterationInfo {
            depth,
            nodes: self.nodes,
            nps,
            time_ms,
            score,
            mate_in: mate_in(score),
            pv: self.state.pv.root_line().to_vec(),
        });
    }

    /// Iterative deepening with aspiration windows. A result outside the
    /// window is re-searched once at the same depth with a full window.
    /// An interrupted iteration is discarded.
    pub(super) fn iterative_deepening(&mut self, max_depth: u32) -> SearchResult {
        let window = self.state.params().aspiration_window;
        let mut result = SearchResult::default();
        let mut alpha = -INFINITY;
        let mut beta = INFINITY;
        let mut depth = 1;

        while depth <= max_depth {
            self.follow_pv = true;
            let score = self.pvs(depth as i32, alpha, beta);
            if self.stopped {
                log::debug!("search stopped during depth {depth}");
                break;
            }

            if score <= alpha || score >= beta {
                log::debug!("depth {depth}: score {score} outside aspiration window [{alpha}, {beta}]");
                alpha = -INFINITY;
                beta = INFINITY;
                continue;
            }

            let pv = self.state.pv.root_line();
            result.best_move = pv.first().copied().or(result.best_move);
            result.pv = pv.to_vec();
            result.score = score;
            result.depth = depth;
            log::debug!("depth {depth} complete: score {score}, {} nodes", self.nodes);
            self.report(depth, score);

            alpha = score - window;
            beta = score + window;
            depth += 1;
        }

        result.nodes = self.nodes;
        result
    }
}

/// Run the main search algorithm
pub(in crate::board::search) fn run<E: Evaluator + ?Sized>(
    board: &mut Board,
    state: &mut SearchState,
    config: &SearchConfig,
    stop: &AtomicBool,
    evaluator: &E,
) -> SearchResult {
    let legal = board.legal_moves();
    let Some(first_legal) = legal.first() else {
        log::debug!("no legal moves at the root");
        return SearchResult::default();
    };

    state.new_search();
    let start_time = Instant::now();
    let max_depth = config.max_depth.unwrap_or(MAX_PLY as u32).clamp(1, MAX_PLY as u32);
    let deadline = (config.time_limit_ms > 0)
        .then(|| start_time + Duration::from_millis(config.time_limit_ms));
    let path = state.game_history().to_vec();

    let mut ctx = SearchContext {
        board,
        state,
        evaluator,
        stop,
        start_time,
        deadline,
        node_limit: config.node_limit,
        nodes: 0,
        ply: 0,
        stopped: false,
        path,
        follow_pv: false,
        info_callback: config.info_callback.clone(),
    };

    let mut result = ctx.iterative_deepening(max_depth);
    if result.best_move.is_none() {
        // Interrupted before depth 1 finished
        result.best_move = Some(first_legal);
    }
    result
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::{Arc, Mutex};

    use crate::board::search::{search, SearchConfig, SearchIterationInfo, SearchState};
    use crate::board::Board;

    #[test]
    fn test_reports_every_completed_depth() {
        let depths = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&depths);
        let config = SearchConfig::depth(4).with_info_callback(Arc::new(move |info: &SearchIterationInfo| {
            sink.lock().unwrap().push((info.depth, info.pv.len()));
        }));
        let mut board = Board::new();
        let mut state = SearchState::new(1);
        let result = search(&mut board, &mut state, config, &AtomicBool::new(false));

        let seen = depths.lock().unwrap().clone();
        assert_eq!(seen.iter().map(|(d, _)| *d).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert!(seen.iter().all(|&(_, len)| len >= 1));
        assert_eq!(result.depth, 4);
        assert_eq!(result.pv.first().copied(), result.best_move);
    }

    #[test]
    fn test_stopped_search_still_returns_a_legal_move() {
        let mut board = Board::new();
        let mut state = SearchState::new(1);
        let result = search(&mut board, &mut state, SearchConfig::depth(10), &AtomicBool::new(true));
        assert_eq!(result.depth, 0);
        let mv = result.best_move.expect("fallback move");
        assert!(board.legal_moves().contains(mv));
    }

    #[test]
    fn test_no_legal_moves_returns_none() {
        let mut board = Board::try_from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let mut state = SearchState::new(1);
        let result = search(&mut board, &mut state, SearchConfig::depth(3), &AtomicBool::new(false));
        assert!(result.best_move.is_none());
    }

    #[test]
    fn test_node_limit_stops_search() {
        let mut board = Board::new();
        let mut state = SearchState::new(1);
        let config = SearchConfig::depth(30).with_nodes(5000);
        let result = search(&mut board, &mut state, config, &AtomicBool::new(false));
        assert!(result.best_move.is_some());
        assert!(result.depth < 30);
        // Polling happens every 2048 nodes
        assert!(result.nodes < 5000 + 2048 * 2);
    }
}

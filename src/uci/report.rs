//! Formatting of search output lines.

use std::fmt::Write as _;
use std::time::Duration;

use crate::board::{mate_in, Move, SearchIterationInfo};

/// `cp <n>` or `mate <n>`, negative mate when the engine is getting mated
#[must_use]
pub fn format_score(score: i32) -> String {
    match mate_in(score) {
        Some(moves) => format!("mate {moves}"),
        None => format!("cp {score}"),
    }
}

#[must_use]
pub fn format_info(info: &SearchIterationInfo) -> String {
    let mut line = format!(
        "info depth {} score {} nodes {} time {} nps {}",
        info.depth,
        format_score(info.score),
        info.nodes,
        info.time_ms,
        info.nps
    );
    if !info.pv.is_empty() {
        line.push_str(" pv");
        for mv in &info.pv {
            let _ = write!(line, " {mv}");
        }
    }
    line
}

/// `bestmove 0000` when there is no legal move
#[must_use]
pub fn format_bestmove(best_move: Option<Move>) -> String {
    match best_move {
        Some(mv) => format!("bestmove {mv}"),
        None => "bestmove 0000".to_string(),
    }
}

#[must_use]
pub fn format_perft(divide: &[(Move, u64)], depth: u32, elapsed: Duration) -> String {
    let mut out = String::new();
    for (mv, nodes) in divide {
        let _ = writeln!(out, "{mv}: {nodes}");
    }
    let total: u64 = divide.iter().map(|&(_, n)| n).sum();
    let _ = write!(
        out,
        "\nNodes searched: {total}\ninfo string perft depth {depth} nodes {total} time_ms {}",
        elapsed.as_millis()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, MATE_VALUE};

    #[test]
    fn scores() {
        assert_eq!(format_score(35), "cp 35");
        assert_eq!(format_score(-120), "cp -120");
        assert_eq!(format_score(MATE_VALUE - 1), "mate 1");
        assert_eq!(format_score(MATE_VALUE - 3), "mate 2");
        assert_eq!(format_score(-(MATE_VALUE - 2)), "mate -1");
    }

    #[test]
    fn info_line() {
        let mut board = Board::new();
        let e4 = board.parse_move("e2e4").unwrap();
        let info = SearchIterationInfo {
            depth: 3,
            nodes: 1200,
            nps: 60000,
            time_ms: 20,
            score: 25,
            mate_in: None,
            pv: vec![e4],
        };
        assert_eq!(
            format_info(&info),
            "info depth 3 score cp 25 nodes 1200 time 20 nps 60000 pv e2e4"
        );
    }

    #[test]
    fn bestmove_lines() {
        let mut board = Board::new();
        let mv = board.parse_move("g1f3").unwrap();
        assert_eq!(format_bestmove(Some(mv)), "bestmove g1f3");
        assert_eq!(format_bestmove(None), "bestmove 0000");
    }

    #[test]
    fn perft_summary() {
        let mut board = Board::new();
        let divide = board.perft_divide(1);
        let text = format_perft(&divide, 1, Duration::from_millis(3));
        assert_eq!(text.lines().filter(|l| l.ends_with(": 1")).count(), 20);
        assert!(text.contains("Nodes searched: 20"));
        assert!(text.ends_with("time_ms 3"));
    }
}

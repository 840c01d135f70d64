//! Move ordering utilities for search.

use super::constants::{CAPTURE_SCORE, KILLER1_SCORE, KILLER2_SCORE, MVV_LVA, PV_MOVE_SCORE};
use super::{HistoryTable, KillerTable};
use crate::board::{Move, MoveList, ScoredMoveList};

/// MVV-LVA score for a capture. En passant captures are pawn takes pawn.
#[inline]
pub(crate) fn mvv_lva(mv: Move) -> i32 {
    let victim = mv.captured().map_or(0, |p| p.kind().index());
    MVV_LVA[mv.piece().kind().index()][victim]
}

/// Ordering tables consulted at one node
pub(crate) struct OrderingContext<'a> {
    pub killers: &'a KillerTable,
    pub history: &'a HistoryTable,
    pub ply: usize,
    /// Root line move at this ply, when the node is still on the PV
    pub pv_move: Option<Move>,
}

impl OrderingContext<'_> {
    pub(crate) fn score(&self, mv: Move) -> i32 {
        if self.pv_move == Some(mv) {
            return PV_MOVE_SCORE;
        }
        if mv.is_capture() {
            return CAPTURE_SCORE + mvv_lva(mv);
        }
        if self.killers.primary(self.ply) == mv {
            KILLER1_SCORE
        } else if self.killers.secondary(self.ply) == mv {
            KILLER2_SCORE
        } else {
            self.history.score(mv.piece(), mv.to())
        }
    }

    /// Score every move and sort best first, keeping generation order on ties
    pub(crate) fn order(&self, moves: &MoveList) -> ScoredMoveList {
        let mut scored = ScoredMoveList::new();
        for &mv in moves {
            scored.push(mv, self.score(mv));
        }
        scored.sort_by_score_desc();
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Piece, Square};

    #[test]
    fn test_mvv_lva_prefers_valuable_victims_and_cheap_attackers() {
        let pxq = Move::capture(Square::E1, Square::new(1, 3), Piece::WhitePawn, Piece::BlackQueen);
        let qxq = Move::capture(Square::E1, Square::new(1, 3), Piece::WhiteQueen, Piece::BlackQueen);
        let pxp = Move::capture(Square::E1, Square::new(1, 3), Piece::WhitePawn, Piece::BlackPawn);
        assert_eq!(mvv_lva(pxq), 505);
        assert_eq!(mvv_lva(qxq), 501);
        assert_eq!(mvv_lva(pxp), 105);
    }

    #[test]
    fn test_order_pv_captures_killers_history() {
        let board =
            Board::try_from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        let moves = board.generate_moves();
        let quiet: Vec<Move> = moves.iter().copied().filter(|m| !m.is_capture()).collect();
        let captures: Vec<Move> = moves.iter().copied().filter(|m| m.is_capture()).collect();

        let mut killers = KillerTable::new();
        killers.update(2, quiet[3]);
        let mut history = HistoryTable::new();
        history.update(quiet[5].piece(), quiet[5].to(), 10);

        let ctx = OrderingContext {
            killers: &killers,
            history: &history,
            ply: 2,
            pv_move: Some(quiet[7]),
        };
        let ordered = ctx.order(&moves);
        assert_eq!(ordered.len(), moves.len());
        assert_eq!(ordered.as_slice()[0].mv, quiet[7]);
        for (i, scored) in ordered.iter().enumerate().skip(1).take(captures.len()) {
            assert!(scored.mv.is_capture(), "slot {i} should hold a capture");
        }
        assert_eq!(ordered.as_slice()[captures.len() + 1].mv, quiet[3]);
        assert_eq!(ordered.as_slice()[captures.len() + 2].mv, quiet[5]);
    }
}

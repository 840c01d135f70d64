use super::SearchContext;
use crate::board::eval::Evaluator;
use crate::board::Move;

impl<E: Evaluator + ?Sized> SearchContext<'_, E> {
    /// Null move pruning: hand the opponent a free move and search the
    /// reply with a null window at `beta`. If we still fail high, the node
    /// is cut without looking at real moves.
    pub(super) fn null_move_cutoff(&mut self, depth: i32, beta: i32, in_check: bool) -> Option<i32> {
        let params = self.state.params();
        if depth < params.null_min_depth || in_check || self.ply == 0 {
            return None;
        }
        let reduced = depth - 1 - params.null_reduction;

        let hash = self.board.hash();
        let snapshot = self.board.make_null_move();
        self.path.push(hash);
        self.ply += 1;
        let score = -self.pvs(reduced, -beta, -beta + 1);
        self.ply -= 1;
        self.path.pop();
        self.board.take_back(snapshot);

        if self.stopped {
            return Some(0);
        }
        (score >= beta).then_some(beta)
    }

    /// Whether a late quiet move may be searched at reduced depth
    pub(super) fn lmr_allowed(
        &self,
        mv: Move,
        pv_move: Move,
        moves_searched: usize,
        depth: i32,
        in_check: bool,
        gives_check: bool,
    ) -> bool {
        let params = self.state.params();
        moves_searched >= params.lmr_full_depth_moves
            && depth >= params.lmr_min_depth
            && !in_check
            && !gives_check
            && !mv.is_capture()
            && !mv.is_promotion()
            && mv != pv_move
    }
}

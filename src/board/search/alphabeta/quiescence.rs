use super::SearchContext;
use crate::board::search::move_order::OrderingContext;
use crate::board::eval::Evaluator;
use crate::board::{MoveFilter, MAX_PLY};

impl<E: Evaluator + ?Sized> SearchContext<'_, E> {
    /// Quiescence search over captures, fail-hard, with stand-pat.
    pub(super) fn quiescence(&mut self, mut alpha: i32, beta: i32) -> i32 {
        self.poll_if_due();
        if self.stopped {
            return 0;
        }

        self.nodes += 1;
        let stand_pat = self.evaluate();

        if self.ply >= MAX_PLY {
            return stand_pat;
        }
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let moves = self.board.generate_moves();
        let ordered = OrderingContext {
            killers: &self.state.killers,
            history: &self.state.history,
            ply: self.ply,
            pv_move: None,
        }
        .order(&moves);

        for scored in ordered.iter() {
            // The filter rejects quiet moves before touching the board
            let Some(snapshot) = self.board.make_move(scored.mv, MoveFilter::CapturesOnly) else {
                continue;
            };
            self.ply += 1;
            let score = -self.quiescence(-beta, -alpha);
            self.ply -= 1;
            self.board.take_back(snapshot);

            if self.stopped {
                return 0;
            }

            if score > alpha {
                alpha = score;
                if score >= beta {
                    return beta;
                }
            }
        }

        alpha
    }
}

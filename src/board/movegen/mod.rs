//! Pseudo-legal move generation.
//!
//! Generated moves obey piece movement and castling rules but may leave the
//! mover's king attacked; `make_move` rejects those.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::make_unmake::MoveFilter;
use super::{Bitboard, Board, Move, MoveList, Piece, Square};

impl Board {
    /// All pseudo-legal moves for the side to move, in a fixed order:
    /// pawns, knights, bishops, rooks, queens, king (castling last).
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_pawn_moves(&mut moves);
        self.generate_knight_moves(&mut moves);
        self.generate_slider_moves(&mut moves);
        self.generate_king_moves(&mut moves);
        moves
    }

    /// Fully legal moves: pseudo-legal moves that survive `make_move`
    pub fn legal_moves(&mut self) -> MoveList {
        let mut legal = MoveList::new();
        for mv in self.generate_moves() {
            if let Some(snapshot) = self.make_move(mv, MoveFilter::All) {
                self.take_back(snapshot);
                legal.push(mv);
            }
        }
        legal
    }

    /// True when the side to move has no legal move and is in check
    pub fn is_checkmate(&mut self) -> bool {
        self.in_check() && self.legal_moves().is_empty()
    }

    /// True when the side to move has no legal move and is not in check
    pub fn is_stalemate(&mut self) -> bool {
        !self.in_check() && self.legal_moves().is_empty()
    }

    /// Push one move per target square, as a capture when the target holds
    /// an enemy piece.
    fn push_targets(&self, moves: &mut MoveList, from: Square, piece: Piece, targets: Bitboard) {
        let enemies = self.occupancy(piece.color().opposite());
        for to in targets {
            match self.piece_at(to) {
                Some(victim) if enemies.contains(to) => {
                    moves.push(Move::capture(from, to, piece, victim));
                }
                _ => moves.push(Move::quiet(from, to, piece)),
            }
        }
    }
}

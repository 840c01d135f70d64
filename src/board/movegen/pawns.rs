use super::super::attack_tables::pawn_attacks;
use super::super::{Board, Color, Move, MoveList, Piece, PieceKind, Square};

/// One move per promotion choice, queen first
fn push_promotions(moves: &mut MoveList, from: Square, to: Square, pawn: Piece, victim: Option<Piece>) {
    let color = pawn.color();
    for kind in PieceKind::PROMOTIONS {
        moves.push(Move::promotion(from, to, pawn, Piece::new(color, kind), victim));
    }
}

impl Board {
    pub(crate) fn generate_pawn_moves(&self, moves: &mut MoveList) {
        let us = self.side;
        let them = us.opposite();
        let pawn = Piece::new(us, PieceKind::Pawn);
        let (push, start_rank, promotion_rank) = match us {
            Color::White => (8i8, 1u8, 7u8),
            Color::Black => (-8i8, 6u8, 0u8),
        };
        let occupied = self.occupied();
        let enemies = self.occupancy(them);

        for from in self.pieces(pawn) {
            if let Some(to) = from.offset(push) {
                if !occupied.contains(to) {
                    if to.rank() == promotion_rank {
                        push_promotions(moves, from, to, pawn, None);
                    } else {
                        moves.push(Move::quiet(from, to, pawn));
                        if from.rank() == start_rank {
                            if let Some(double) = to.offset(push) {
                                if !occupied.contains(double) {
                                    moves.push(Move::double_pawn_push(from, double, pawn));
                                }
                            }
                        }
                    }
                }
            }

            let attacks = pawn_attacks(us, from);
            for to in attacks & enemies {
                let Some(victim) = self.piece_at(to) else {
                    continue;
                };
                if to.rank() == promotion_rank {
                    push_promotions(moves, from, to, pawn, Some(victim));
                } else {
                    moves.push(Move::capture(from, to, pawn, victim));
                }
            }

            if let Some(ep) = self.en_passant {
                if attacks.contains(ep) {
                    let victim = Piece::new(them, PieceKind::Pawn);
                    moves.push(Move::en_passant(from, ep, pawn, victim));
                }
            }
        }
    }
}

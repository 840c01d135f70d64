use super::super::attack_tables::knight_attacks;
use super::super::{Board, MoveList, Piece, PieceKind};

impl Board {
    pub(crate) fn generate_knight_moves(&self, moves: &mut MoveList) {
        let knight = Piece::new(self.side, PieceKind::Knight);
        let not_own = !self.occupancy(self.side);
        for from in self.pieces(knight) {
            self.push_targets(moves, from, knight, knight_attacks(from) & not_own);
        }
    }
}

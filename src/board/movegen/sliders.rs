use super::super::attack_tables::{bishop_attacks, queen_attacks, rook_attacks};
use super::super::{Board, MoveList, Piece, PieceKind};

impl Board {
    /// Bishop, rook and queen moves via magic lookups
    pub(crate) fn generate_slider_moves(&self, moves: &mut MoveList) {
        let occupied = self.occupied();
        let not_own = !self.occupancy(self.side);

        for kind in [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
            let piece = Piece::new(self.side, kind);
            for from in self.pieces(piece) {
                let attacks = match kind {
                    PieceKind::Bishop => bishop_attacks(from, occupied),
                    PieceKind::Rook => rook_attacks(from, occupied),
                    _ => queen_attacks(from, occupied),
                };
                self.push_targets(moves, from, piece, attacks & not_own);
            }
        }
    }
}

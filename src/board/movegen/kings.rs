use super::super::attack_tables::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};
use super::super::{Board, Color, Move, MoveList, Piece, PieceKind, Square};

/// Squares involved in one castling: king start, squares that must be empty,
/// squares that must not be attacked, king target and the rook's start.
struct CastlePath {
    kingside: bool,
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    empty: &'static [Square],
    safe: &'static [Square],
}

const WHITE_PATHS: [CastlePath; 2] = [
    CastlePath {
        kingside: true,
        king_from: Square::E1,
        king_to: Square::G1,
        rook_from: Square::H1,
        empty: &[Square::F1, Square::G1],
        safe: &[Square::E1, Square::F1, Square::G1],
    },
    CastlePath {
        kingside: false,
        king_from: Square::E1,
        king_to: Square::C1,
        rook_from: Square::A1,
        empty: &[Square::B1, Square::C1, Square::D1],
        safe: &[Square::E1, Square::D1, Square::C1],
    },
];

const BLACK_PATHS: [CastlePath; 2] = [
    CastlePath {
        kingside: true,
        king_from: Square::E8,
        king_to: Square::G8,
        rook_from: Square::H8,
        empty: &[Square::F8, Square::G8],
        safe: &[Square::E8, Square::F8, Square::G8],
    },
    CastlePath {
        kingside: false,
        king_from: Square::E8,
        king_to: Square::C8,
        rook_from: Square::A8,
        empty: &[Square::B8, Square::C8, Square::D8],
        safe: &[Square::E8, Square::D8, Square::C8],
    },
];

impl Board {
    pub(crate) fn generate_king_moves(&self, moves: &mut MoveList) {
        let us = self.side;
        let king = Piece::new(us, PieceKind::King);
        let not_own = !self.occupancy(us);
        for from in self.pieces(king) {
            self.push_targets(moves, from, king, king_attacks(from) & not_own);
        }
        self.generate_castling_moves(moves);
    }

    fn generate_castling_moves(&self, moves: &mut MoveList) {
        let us = self.side;
        let them = us.opposite();
        let king = Piece::new(us, PieceKind::King);
        let rook = Piece::new(us, PieceKind::Rook);
        let paths = match us {
            Color::White => &WHITE_PATHS,
            Color::Black => &BLACK_PATHS,
        };
        let occupied = self.occupied();

        for path in paths {
            if !self.castling.has(us, path.kingside)
                || !self.pieces(king).contains(path.king_from)
                || !self.pieces(rook).contains(path.rook_from)
                || path.empty.iter().any(|&sq| occupied.contains(sq))
                || path.safe.iter().any(|&sq| self.is_square_attacked(sq, them))
            {
                continue;
            }
            moves.push(Move::castle(path.king_from, path.king_to, king));
        }
    }

    /// True if any piece of `by` attacks `square` under the current occupancy
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        let piece = |kind| self.pieces(Piece::new(by, kind));

        // A pawn of `by` attacks `square` iff a pawn of the other color on
        // `square` would attack the pawn's square.
        if !(pawn_attacks(by.opposite(), square) & piece(PieceKind::Pawn)).is_empty() {
            return true;
        }
        if !(knight_attacks(square) & piece(PieceKind::Knight)).is_empty() {
            return true;
        }
        if !(king_attacks(square) & piece(PieceKind::King)).is_empty() {
            return true;
        }

        let occupied = self.occupied();
        let queens = piece(PieceKind::Queen);
        if !(bishop_attacks(square, occupied) & (piece(PieceKind::Bishop) | queens)).is_empty() {
            return true;
        }
        !(rook_attacks(square, occupied) & (piece(PieceKind::Rook) | queens)).is_empty()
    }

    /// Whether the side to move's king is attacked
    #[must_use]
    pub fn in_check(&self) -> bool {
        self.king_square(self.side)
            .is_some_and(|king| self.is_square_attacked(king, self.side.opposite()))
    }
}

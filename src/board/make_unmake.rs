use crate::zobrist::ZOBRIST;

use super::state::Snapshot;
use super::{Board, Color, Move, Piece, PieceKind, Square};

/// Which moves `make_move` accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveFilter {
    All,
    /// Reject anything without the capture flag (quiescence search)
    CapturesOnly,
}

/// Rook from/to squares for a castling king move, keyed by the king's target
fn castling_rook(king_to: Square) -> Option<(Square, Square)> {
    match king_to {
        Square::G1 => Some((Square::H1, Square::F1)),
        Square::C1 => Some((Square::A1, Square::D1)),
        Square::G8 => Some((Square::H8, Square::F8)),
        Square::C8 => Some((Square::A8, Square::D8)),
        _ => None,
    }
}

impl Board {
    /// Remove a piece and fold it out of the hash
    #[inline]
    fn lift(&mut self, piece: Piece, sq: Square) {
        self.pieces[piece.index()].clear(sq);
        self.hash ^= ZOBRIST.piece(piece, sq);
    }

    /// Place a piece and fold it into the hash
    #[inline]
    fn put(&mut self, piece: Piece, sq: Square) {
        self.pieces[piece.index()].set(sq);
        self.hash ^= ZOBRIST.piece(piece, sq);
    }

    /// Play `mv` on the board.
    ///
    /// Returns the snapshot to undo it with, or `None` when the move was
    /// rejected: either filtered out (board untouched) or it left the mover's
    /// king attacked (board restored before returning).
    pub fn make_move(&mut self, mv: Move, filter: MoveFilter) -> Option<Snapshot> {
        if filter == MoveFilter::CapturesOnly && !mv.is_capture() {
            return None;
        }

        let snapshot = Snapshot(*self);
        let us = self.side;
        let them = us.opposite();
        let from = mv.from();
        let to = mv.to();
        let piece = mv.piece();

        self.lift(piece, from);
        self.put(piece, to);

        if mv.is_capture() && !mv.is_en_passant() {
            let victim = PieceKind::ALL
                .iter()
                .map(|&kind| Piece::new(them, kind))
                .find(|p| self.pieces[p.index()].contains(to));
            if let Some(victim) = victim {
                self.lift(victim, to);
            }
        }

        if let Some(promoted) = mv.promotion_piece() {
            self.lift(piece, to);
            self.put(promoted, to);
        }

        if mv.is_en_passant() {
            let behind = match us {
                Color::White => to.offset(-8),
                Color::Black => to.offset(8),
            };
            if let Some(sq) = behind {
                self.lift(Piece::new(them, PieceKind::Pawn), sq);
            }
        }

        if mv.is_castling() {
            if let Some((rook_from, rook_to)) = castling_rook(to) {
                let rook = Piece::new(us, PieceKind::Rook);
                self.lift(rook, rook_from);
                self.put(rook, rook_to);
            }
        }

        if let Some(ep) = self.en_passant.take() {
            self.hash ^= ZOBRIST.en_passant(ep);
        }
        if mv.is_double_pawn_push() {
            let ep = match us {
                Color::White => from.offset(8),
                Color::Black => from.offset(-8),
            };
            if let Some(ep) = ep {
                self.en_passant = Some(ep);
                self.hash ^= ZOBRIST.en_passant(ep);
            }
        }

        self.hash ^= ZOBRIST.castling(self.castling);
        self.castling.update_for_move(from.as_usize(), to.as_usize());
        self.hash ^= ZOBRIST.castling(self.castling);

        self.refresh_occupancy();

        if us == Color::Black {
            self.fullmove_number += 1;
        }
        if piece.kind() == PieceKind::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        self.side = them;
        self.hash ^= ZOBRIST.side_key;

        if let Some(king) = self.king_square(us) {
            if self.is_square_attacked(king, them) {
                *self = snapshot.0;
                return None;
            }
        }

        debug_assert_eq!(self.hash, self.compute_hash(), "hash drift after {mv}");
        Some(snapshot)
    }

    /// Pass the turn. Only valid when the side to move is not in check.
    pub fn make_null_move(&mut self) -> Snapshot {
        let snapshot = Snapshot(*self);

        if let Some(ep) = self.en_passant.take() {
            self.hash ^= ZOBRIST.en_passant(ep);
        }
        self.side = self.side.opposite();
        self.hash ^= ZOBRIST.side_key;

        debug_assert_eq!(self.hash, self.compute_hash());
        snapshot
    }

    /// Restore the position saved by `make_move` or `make_null_move`
    #[inline]
    pub fn take_back(&mut self, snapshot: Snapshot) {
        *self = snapshot.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(board: &mut Board, uci: &str) -> Move {
        board
            .legal_moves()
            .into_iter()
            .find(|m| m.to_string() == uci)
            .unwrap_or_else(|| panic!("{uci} not legal"))
    }

    #[test]
    fn test_double_push_sets_en_passant() {
        let mut board = Board::new();
        let mv = find(&mut board, "e2e4");
        let snapshot = board.make_move(mv, MoveFilter::All).unwrap();
        assert_eq!(board.en_passant(), Some("e3".parse().unwrap()));
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.halfmove_clock(), 0);
        board.take_back(snapshot);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_captures_only_filter_leaves_board_untouched() {
        let mut board = Board::new();
        let before = board;
        let mv = find(&mut board, "g1f3");
        assert!(board.make_move(mv, MoveFilter::CapturesOnly).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_illegal_move_is_rolled_back() {
        // The e2 bishop is pinned against the king by the e8 rook
        let mut board = Board::try_from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        let before = board;
        let pinned = Move::quiet("e2".parse().unwrap(), "d3".parse().unwrap(), Piece::WhiteBishop);
        assert!(board.make_move(pinned, MoveFilter::All).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_castling_moves_rook_and_clears_rights() {
        let mut board =
            Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = find(&mut board, "e1g1");
        assert!(mv.is_castling());
        let _ = board.make_move(mv, MoveFilter::All).unwrap();
        assert_eq!(board.piece_at(Square::F1), Some(Piece::WhiteRook));
        assert_eq!(board.piece_at(Square::H1), None);
        assert!(!board.castling_rights().has(Color::White, true));
        assert!(!board.castling_rights().has(Color::White, false));
        assert!(board.castling_rights().has(Color::Black, true));
        assert_eq!(board.hash(), board.compute_hash());
    }

    #[test]
    fn test_en_passant_removes_pawn_behind() {
        let mut board =
            Board::try_from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let mv = find(&mut board, "e5d6");
        assert!(mv.is_en_passant());
        let _ = board.make_move(mv, MoveFilter::CapturesOnly).unwrap();
        assert_eq!(board.piece_at("d5".parse().unwrap()), None);
        assert_eq!(board.piece_at("d6".parse().unwrap()), Some(Piece::WhitePawn));
        assert_eq!(board.en_passant(), None);
    }

    #[test]
    fn test_promotion_replaces_pawn() {
        let mut board = Board::try_from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mv = find(&mut board, "a7b8n");
        let _ = board.make_move(mv, MoveFilter::All).unwrap();
        assert_eq!(board.piece_at("b8".parse().unwrap()), Some(Piece::WhiteKnight));
        assert!(board.pieces(Piece::WhitePawn).is_empty());
        assert!(board.pieces(Piece::BlackRook).is_empty());
    }

    #[test]
    fn test_null_move_flips_side_and_clears_en_passant() {
        let mut board =
            Board::try_from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let before = board;
        let snapshot = board.make_null_move();
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.en_passant(), None);
        assert_eq!(board.hash(), board.compute_hash());
        board.take_back(snapshot);
        assert_eq!(board, before);
    }

    #[test]
    fn test_fullmove_advances_after_black() {
        let mut board = Board::new();
        let mv = find(&mut board, "g1f3");
        let _ = board.make_move(mv, MoveFilter::All).unwrap();
        assert_eq!(board.fullmove_number(), 1);
        assert_eq!(board.halfmove_clock(), 1);
        let mv = find(&mut board, "g8f6");
        let _ = board.make_move(mv, MoveFilter::All).unwrap();
        assert_eq!(board.fullmove_number(), 2);
    }
}

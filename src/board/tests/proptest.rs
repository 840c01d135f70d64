//! Property-based tests using proptest.

use crate::board::{
    Board, ClassicEval, Evaluator, HistoryTable, KillerTable, Move, MoveFilter, Piece, PieceKind,
    Snapshot, Square,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Strategy to generate a random legal move sequence length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=20usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn piece_strategy() -> impl Strategy<Value = Piece> {
    (0..12usize).prop_map(|i| Piece::ALL[i])
}

fn square_strategy() -> impl Strategy<Value = Square> {
    (0..64u8).prop_map(Square::from_index)
}

/// Play `num_moves` random legal moves, returning the snapshots taken
fn random_playout(board: &mut Board, seed: u64, num_moves: usize) -> Vec<Snapshot> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut history = Vec::new();
    for _ in 0..num_moves {
        let moves = board.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        if let Some(snapshot) = board.make_move(mv, MoveFilter::All) {
            history.push(snapshot);
        }
    }
    history
}

proptest! {
    /// Property: make_move followed by take_back restores board state exactly
    #[test]
    fn prop_make_take_back_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let initial = board;

        let mut history = random_playout(&mut board, seed, num_moves);
        while let Some(snapshot) = history.pop() {
            board.take_back(snapshot);
        }

        prop_assert_eq!(board, initial);
        prop_assert_eq!(board.to_fen(), initial.to_fen());
    }

    /// Property: hash is always consistent with recomputed hash
    #[test]
    fn prop_hash_consistency(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            let _snapshot = board.make_move(mv, MoveFilter::All);
            prop_assert_eq!(board.hash(), board.compute_hash());
        }
    }

    /// Property: FEN round-trip preserves position
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let _history = random_playout(&mut board, seed, num_moves);

        let fen = board.to_fen();
        let restored = Board::try_from_fen(&fen).unwrap();

        prop_assert_eq!(restored, board);
        prop_assert_eq!(restored.to_fen(), fen);
    }

    /// Property: legal moves are always legal (no self-check)
    #[test]
    fn prop_legal_moves_are_legal(seed in seed_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..10 {
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }

            let mover = board.side_to_move();
            for &mv in &moves {
                let snapshot = board.make_move(mv, MoveFilter::All);
                prop_assert!(snapshot.is_some(), "legal move rejected: {:?}", mv);
                let king = board.king_square(mover).unwrap();
                prop_assert!(!board.is_square_attacked(king, mover.opposite()),
                    "Legal move left king in check: {:?}", mv);
                if let Some(snapshot) = snapshot {
                    board.take_back(snapshot);
                }
            }

            let mv = moves[rng.gen_range(0..moves.len())];
            let _snapshot = board.make_move(mv, MoveFilter::All);
        }
    }

    // ========================================================================
    // Move Encoding Property Tests
    // ========================================================================

    /// Property: every packed field decodes to what was encoded
    #[test]
    fn prop_move_fields_round_trip(
        from in square_strategy(),
        to in square_strategy(),
        piece in piece_strategy(),
        promotion in proptest::option::of(piece_strategy()),
        captured in proptest::option::of(piece_strategy()),
        flags in 0..16u8,
    ) {
        let capture = flags & 1 != 0;
        let double_push = flags & 2 != 0;
        let en_passant = flags & 4 != 0;
        let castling = flags & 8 != 0;
        let mv = Move::encode(from, to, piece, promotion, captured, capture, double_push, en_passant, castling);

        prop_assert_eq!(mv.from(), from);
        prop_assert_eq!(mv.to(), to);
        prop_assert_eq!(mv.piece(), piece);
        prop_assert_eq!(mv.promotion_piece(), promotion);
        prop_assert_eq!(mv.captured(), captured);
        prop_assert_eq!(mv.is_capture(), capture);
        prop_assert_eq!(mv.is_double_pawn_push(), double_push);
        prop_assert_eq!(mv.is_en_passant(), en_passant);
        prop_assert_eq!(mv.is_castling(), castling);
        prop_assert_eq!(Move::from_u32(mv.as_u32()), mv);
    }

    // ========================================================================
    // Move Ordering Property Tests
    // ========================================================================

    /// Property: killer moves are preserved after update
    #[test]
    fn prop_killer_preserves_moves(
        ply in 0..100usize,
        from1 in square_strategy(),
        to1 in square_strategy(),
        from2 in square_strategy(),
        to2 in square_strategy(),
    ) {
        let mut table = KillerTable::new();
        let mv1 = Move::quiet(from1, to1, Piece::WhiteKnight);
        let mv2 = Move::quiet(from2, to2, Piece::WhiteBishop);

        table.update(ply, mv1);
        if ply < crate::board::MAX_PLY {
            prop_assert_eq!(table.primary(ply), mv1);
        }

        table.update(ply, mv2);
        if ply < crate::board::MAX_PLY {
            prop_assert_eq!(table.primary(ply), mv2);
            prop_assert_eq!(table.secondary(ply), mv1);
        } else {
            prop_assert!(table.primary(ply).is_null());
        }
    }

    /// Property: history only grows
    #[test]
    fn prop_history_monotonic(
        piece in piece_strategy(),
        to in square_strategy(),
        depths in proptest::collection::vec(1..20i32, 1..10),
    ) {
        let mut table = HistoryTable::new();
        let mut previous = table.score(piece, to);
        for depth in depths {
            table.update(piece, to, depth);
            let score = table.score(piece, to);
            prop_assert!(score > previous);
            previous = score;
        }
    }

    // ========================================================================
    // Evaluation Property Tests
    // ========================================================================

    /// Property: evaluation is bounded (no extreme values)
    #[test]
    fn prop_eval_bounded(seed in seed_strategy(), num_moves in 0..30usize) {
        let mut board = Board::new();
        let _history = random_playout(&mut board, seed, num_moves);

        let eval = ClassicEval.evaluate(&board);
        // Kings cancel out, leaving at most ~40 pawns of material plus positional terms
        prop_assert!(eval.abs() < 10000, "Evaluation {} is unreasonably large", eval);
    }

    /// Property: evaluation flips sign with the side to move
    #[test]
    fn prop_eval_is_side_relative(seed in seed_strategy(), num_moves in 0..30usize) {
        let mut board = Board::new();
        let _history = random_playout(&mut board, seed, num_moves);
        prop_assume!(!board.in_check());

        let eval = ClassicEval.evaluate(&board);
        let _snapshot = board.make_null_move();
        prop_assert_eq!(ClassicEval.evaluate(&board), -eval);
    }

    /// Property: there is always exactly one king per side after legal play
    #[test]
    fn prop_kings_survive(seed in seed_strategy(), num_moves in 0..40usize) {
        let mut board = Board::new();
        let _history = random_playout(&mut board, seed, num_moves);
        prop_assert_eq!(board.pieces(Piece::new(crate::board::Color::White, PieceKind::King)).count(), 1);
        prop_assert_eq!(board.pieces(Piece::new(crate::board::Color::Black, PieceKind::King)).count(), 1);
    }

    // ========================================================================
    // Transposition Table Property Tests
    // ========================================================================

    /// Property: TT stores and retrieves correct data
    #[test]
    fn prop_tt_store_retrieve(
        hash in 1..u64::MAX,
        depth in 0..100i32,
        score in -10000..10000i32,
        ply in 0..64usize,
    ) {
        use crate::tt::{BoundType, TranspositionTable};

        let mut tt = TranspositionTable::new(1);
        tt.store(hash, depth, score, BoundType::Exact, ply);

        let entry = tt.probe(hash, ply);
        prop_assert!(entry.is_some());
        if let Some(entry) = entry {
            prop_assert_eq!(entry.depth(), depth);
            prop_assert_eq!(entry.score(), score);
        }
    }
}

//! Invariants that must hold over randomly played games.

use chess_ai::{legal_moves, Bitboard, Board};
use chess_ai_core::{Color, Piece, PieceKind};
use proptest::prelude::*;

/// Plays up to `choices.len()` plies, picking each move by index.
fn play(choices: &[u16], mut check: impl FnMut(&Board)) -> Board {
    let mut board = Board::new();
    check(&board);
    for &choice in choices {
        let moves = legal_moves(&board);
        if moves.is_empty() {
            break;
        }
        let mv = moves[choice as usize % moves.len()];
        board.apply_move(mv);
        check(&board);
    }
    board
}

/// Piece bits with the phantom kings of the last castling removed.
fn real_pieces(board: &Board, piece: Piece) -> Bitboard {
    let bits = board.pieces(piece);
    if piece.kind() == PieceKind::King {
        bits & !board.extra_kings(piece.color())
    } else {
        bits
    }
}

fn all_pieces() -> impl Iterator<Item = Piece> {
    (0..Piece::COUNT as u8).filter_map(Piece::from_slot)
}

fn assert_occupancy(board: &Board) {
    for color in Color::ALL {
        let union = PieceKind::ALL
            .iter()
            .fold(Bitboard::EMPTY, |acc, &kind| {
                acc | board.pieces(Piece::new(kind, color))
            });
        assert_eq!(union, board.occupancy(color), "{:?}", board);
    }

    let mut seen = Bitboard::EMPTY;
    for piece in all_pieces() {
        let bits = real_pieces(board, piece);
        assert!((seen & bits).is_empty(), "overlapping pieces in {:?}", board);
        seen |= bits;
    }
}

fn assert_material(board: &Board) {
    for color in Color::ALL {
        let mut material = 0;
        let mut pawns = 0;
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind, color);
            let count = real_pieces(board, piece).count() as i32;
            material += count * piece.value();
            if kind == PieceKind::Pawn {
                pawns += count;
            }
        }
        assert_eq!(board.material_value(color), material, "{:?}", board);
        assert_eq!(board.pawn_count(color), pawns, "{:?}", board);
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 24, .. ProptestConfig::default() })]

    #[test]
    fn prop_occupancy_and_material_hold(choices in prop::collection::vec(any::<u16>(), 0..60)) {
        play(&choices, |board| {
            assert_occupancy(board);
            assert_material(board);
        });
    }

    #[test]
    fn prop_clone_is_independent(choices in prop::collection::vec(any::<u16>(), 1..40)) {
        let board = play(&choices, |_| {});
        let snapshot = board.clone();
        let mut copy = board.clone();
        for mv in legal_moves(&copy).into_iter().take(1) {
            copy.apply_move(mv);
        }
        prop_assert_eq!(&board, &snapshot);
    }

    #[test]
    fn prop_hash_depends_on_placement_only(choices in prop::collection::vec(any::<u16>(), 0..40)) {
        let board = play(&choices, |_| {});
        let rebuilt = Board::from_fen(&board.to_fen()).unwrap();
        prop_assert_eq!(board.hash_key(), rebuilt.hash_key());
        prop_assert_eq!(board.hash_lock(), rebuilt.hash_lock());
        prop_assert_eq!(board.hash_key(), board.clone().hash_key());
    }

    #[test]
    fn prop_en_passant_target_lasts_one_ply(choices in prop::collection::vec(any::<u16>(), 0..40)) {
        let mut board = Board::new();
        for &choice in &choices {
            let moves = legal_moves(&board);
            if moves.is_empty() {
                break;
            }
            let mv = moves[choice as usize % moves.len()];
            board.apply_move(mv);
            let double_push = mv.moving.kind() == PieceKind::Pawn
                && (mv.source.index() as i16 - mv.destination.index() as i16).abs() == 16;
            prop_assert_eq!(board.en_passant_target().count(), u32::from(double_push));
        }
    }
}

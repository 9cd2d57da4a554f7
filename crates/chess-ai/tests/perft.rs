//! Perft reference counts for well-known positions.
//!
//! Deeper runs are ignored by default. Run them with:
//! `cargo test -p chess-ai --release --test perft -- --ignored`

use chess_ai::movegen::perft::{perft, perft_divide};
use chess_ai::Board;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 0 1";

fn board(fen: &str) -> Board {
    Board::from_fen(fen).expect("valid FEN")
}

#[test]
fn test_startpos() {
    let start = Board::new();
    assert_eq!(perft(&start, 1), 20);
    assert_eq!(perft(&start, 2), 400);
    assert_eq!(perft(&start, 3), 8902);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_startpos_depth_4() {
    assert_eq!(perft(&Board::new(), 4), 197_281);
}

// castling both ways, en passant, promotions and pins
#[test]
fn test_kiwipete() {
    let position = board(KIWIPETE);
    assert_eq!(perft(&position, 1), 48);
    assert_eq!(perft(&position, 2), 2039);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_kiwipete_depth_3() {
    assert_eq!(perft(&board(KIWIPETE), 3), 97_862);
}

// check evasion and the horizontal en passant pin
#[test]
fn test_position_3() {
    let position = board(POSITION_3);
    assert_eq!(perft(&position, 1), 14);
    assert_eq!(perft(&position, 2), 191);
    assert_eq!(perft(&position, 3), 2812);
}

#[test]
fn test_position_4() {
    let position = board(POSITION_4);
    assert_eq!(perft(&position, 1), 6);
    assert_eq!(perft(&position, 2), 264);
}

#[test]
fn test_position_5() {
    let position = board(POSITION_5);
    assert_eq!(perft(&position, 1), 44);
    assert_eq!(perft(&position, 2), 1486);
}

#[test]
fn test_divide_matches_total() {
    let position = board(KIWIPETE);
    let results = perft_divide(&position, 2);
    assert_eq!(results.len(), 48);
    let total: u64 = results.iter().map(|(_, n)| n).sum();
    assert_eq!(total, 2039);
    assert!(results.iter().any(|(uci, _)| uci == "e1g1"));
    assert!(results.iter().any(|(uci, _)| uci == "e1c1"));
}

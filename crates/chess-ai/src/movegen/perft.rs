//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a fixed depth, which
//! can be compared against published values to validate move generation,
//! move application and check detection together.

use crate::legality::legal_moves;
use crate::Board;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| {
            let mut next = board.clone();
            next.apply_move(mv);
            perft(&next, depth - 1)
        })
        .sum()
}

/// Perft split by root move, sorted by UCI string.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = legal_moves(board)
        .into_iter()
        .map(|mv| {
            let mut next = board.clone();
            next.apply_move(mv);
            let nodes = if depth > 1 { perft(&next, depth - 1) } else { 1 };
            (mv.to_uci(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

//! Embedded chess engine core with bitboard representation.
//!
//! This crate provides:
//! - [`Bitboard`] - 64-bit square sets, bit `n` = square `n` (a8 = 0)
//! - [`Board`] - piece placement, castling, en passant and material state
//! - [`MoveListGenerator`] - pseudo-legal move generation over precomputed rays
//! - [`CheckDetector`] - check, checkmate and stalemate by reply simulation
//! - [`TranspositionTable`] - evaluation cache keyed by Zobrist fingerprints
//! - Perft for validating the above
//!
//! # Example
//!
//! ```
//! use chess_ai::{Board, MoveListGenerator};
//!
//! let mut board = Board::new();
//! let mut generator = MoveListGenerator::new();
//! assert_eq!(generator.compute_legal_moves(&mut board, true), Ok(true));
//! println!("Pseudo-legal moves from the start: {}", generator.len());
//!
//! let mv = generator.moves()[0];
//! let mut next = board.clone();
//! next.apply_move(mv);
//! assert_ne!(next.hash_key(), board.hash_key());
//! ```

mod bitboard;
mod board;
pub mod config;
pub mod events;
mod legality;
pub mod movegen;
pub mod transposition;
mod zobrist;

pub use bitboard::{Bitboard, SQUARE_BITS};
pub use board::{Board, BoardError, CastlingWing, ALL_BLACK, ALL_WHITE, BITBOARD_COUNT};
pub use config::{ConfigError, EngineConfig, TranspositionConfig};
pub use events::{MoveEvent, MoveObserver, NullObserver};
pub use legality::{legal_moves, CheckDetector, CheckStatus, ReplySimulation};
pub use movegen::{GenerationError, MoveListGenerator};
pub use transposition::{
    CachedEval, EvaluationKind, TableStats, TranspositionEntry, TranspositionTable,
};
pub use zobrist::{ZobristTables, ZOBRIST};

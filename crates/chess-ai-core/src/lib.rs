//! Core types for the chess AI.
//!
//! This crate provides the values that cross the boundary between the engine
//! and the UI layer:
//! - [`Piece`] slots (0-11, even = white) and [`PieceKind`]
//! - [`Square`] indices (0-63, a8 = 0, row-major)
//! - [`Move`], [`MoveKind`] and [`Promotion`]
//! - FEN parsing and serialization

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{CastlingFlags, Fen, FenError};
pub use mov::{Move, MoveKind, Promotion};
pub use piece::{Piece, PieceKind};
pub use square::Square;

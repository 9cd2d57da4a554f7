//! Zobrist tables for position identification.
//!
//! A position is identified by two independent 64-bit fingerprints: the
//! `hash` picks the transposition slot and the `lock` confirms that the entry
//! in that slot belongs to the same position. Both are the XOR of one random
//! value per (piece slot, square) pair.

use chess_ai_core::{Piece, Square};

/// Two independent 12x64 tables of random values.
pub struct ZobristTables {
    pub hash: [[u64; 64]; Piece::COUNT],
    pub lock: [[u64; 64]; Piece::COUNT],
}

/// Fills a 12x64 table from a xorshift64 stream starting at `seed`.
const fn fill_table(seed: u64) -> [[u64; 64]; Piece::COUNT] {
    let mut state = seed;
    let mut table = [[0u64; 64]; Piece::COUNT];

    let mut slot = 0;
    while slot < Piece::COUNT {
        let mut square = 0;
        while square < 64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            table[slot][square] = state;
            square += 1;
        }
        slot += 1;
    }
    table
}

impl ZobristTables {
    /// Builds both tables from fixed seeds so fingerprints are stable across
    /// runs.
    pub const fn new() -> Self {
        ZobristTables {
            hash: fill_table(0x9E37_79B9_7F4A_7C15),
            lock: fill_table(0xD1B5_4A32_D192_ED03),
        }
    }

    #[inline]
    pub const fn hash_of(&self, piece: Piece, square: Square) -> u64 {
        self.hash[piece.index()][square.index() as usize]
    }

    #[inline]
    pub const fn lock_of(&self, piece: Piece, square: Square) -> u64 {
        self.lock[piece.index()][square.index() as usize]
    }
}

impl Default for ZobristTables {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide tables, evaluated at compile time.
pub static ZOBRIST: ZobristTables = ZobristTables::new();

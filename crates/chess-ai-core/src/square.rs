//! Board square representation.

use std::fmt;

/// A square on the chess board, indexed 0-63.
///
/// Squares are numbered row by row starting from the top-left corner as seen
/// from White, matching the index layout the UI layer uses:
/// - a8 = 0, b8 = 1, ..., h8 = 7
/// - a7 = 8, ..., h1 = 63
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from index without bounds checking.
    ///
    /// # Safety
    /// The index must be in the range 0-63.
    #[inline]
    pub const unsafe fn from_index_unchecked(index: u8) -> Self {
        debug_assert!(index < 64);
        Square(index)
    }

    /// Creates a square from its row (0 = eighth rank) and column (0 = a-file).
    #[inline]
    pub const fn from_row_column(row: u8, column: u8) -> Option<Self> {
        if row < 8 && column < 8 {
            Some(Square(row * 8 + column))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let (file, rank) = (bytes[0].to_ascii_lowercase(), bytes[1]);
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Square::from_row_column(b'8' - rank, file - b'a')
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Row counted from the eighth rank (0-7).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Column counted from the a-file (0-7).
    #[inline]
    pub const fn column(self) -> u8 {
        self.0 % 8
    }

    /// Adds a raw index offset, returning `None` when it leaves 0-63.
    ///
    /// No file wrap-around check is made; callers guard board edges.
    #[inline]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let target = self.0 as i16 + delta as i16;
        if target >= 0 && target < 64 {
            Some(Square(target as u8))
        } else {
            None
        }
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.column()) as char;
        let rank = (b'8' - self.row()) as char;
        format!("{}{}", file, rank)
    }

    // Corners and castling squares
    pub const A8: Square = Square(0);
    pub const B8: Square = Square(1);
    pub const C8: Square = Square(2);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const F8: Square = Square(5);
    pub const G8: Square = Square(6);
    pub const H8: Square = Square(7);
    pub const A1: Square = Square(56);
    pub const B1: Square = Square(57);
    pub const C1: Square = Square(58);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const F1: Square = Square(61);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}={})", self.0, self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

//! Player color representation.

/// The two sides. The discriminant is the parity bit of every piece slot
/// belonging to that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Both colors, white first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the color encoded by a slot's parity bit.
    #[inline]
    pub const fn from_parity(value: u8) -> Self {
        if value % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Square-index offset of a single pawn step.
    ///
    /// Square 0 is a8, so White advances toward lower indices.
    #[inline]
    pub const fn pawn_step(self) -> i8 {
        match self {
            Color::White => -8,
            Color::Black => 8,
        }
    }

    /// Board row (0 = eighth rank) holding this side's pieces at the start.
    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

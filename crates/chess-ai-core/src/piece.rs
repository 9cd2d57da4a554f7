//! Piece kinds and the 12-slot piece identity shared with the UI layer.

use crate::Color;

/// The six kinds of chess pieces.
///
/// Discriminants are the white slot of each kind; the black slot is one
/// higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 2,
    Bishop = 4,
    Rook = 6,
    Queen = 8,
    King = 10,
}

impl PieceKind {
    /// All piece kinds in slot order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Material value in centipawns.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 350,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 2000,
        }
    }

    /// Lowercase FEN letter.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Returns true for bishops, rooks and queens.
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A colored piece, stored as its slot number (0-11).
///
/// Even slots are white, odd slots are black. The slot doubles as the index
/// of the piece's bitboard inside a board.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(u8);

impl Piece {
    /// Number of real piece slots.
    pub const COUNT: usize = 12;

    /// Slot value used on the wire for "no piece".
    pub const EMPTY_SLOT: u8 = 12;

    pub const WHITE_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::White);
    pub const WHITE_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::White);
    pub const WHITE_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::White);
    pub const WHITE_ROOK: Piece = Piece::new(PieceKind::Rook, Color::White);
    pub const WHITE_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::White);
    pub const WHITE_KING: Piece = Piece::new(PieceKind::King, Color::White);
    pub const BLACK_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::Black);
    pub const BLACK_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::Black);
    pub const BLACK_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::Black);
    pub const BLACK_ROOK: Piece = Piece::new(PieceKind::Rook, Color::Black);
    pub const BLACK_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::Black);
    pub const BLACK_KING: Piece = Piece::new(PieceKind::King, Color::Black);

    /// Creates the piece of the given kind and color.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece(kind as u8 + color as u8)
    }

    /// Decodes a wire slot. The empty sentinel and out-of-range values map
    /// to `None`.
    #[inline]
    pub const fn from_slot(slot: u8) -> Option<Self> {
        if slot < Self::COUNT as u8 {
            Some(Piece(slot))
        } else {
            None
        }
    }

    /// Encodes an optional piece as a wire slot.
    #[inline]
    pub const fn slot_of(piece: Option<Piece>) -> u8 {
        match piece {
            Some(p) => p.0,
            None => Self::EMPTY_SLOT,
        }
    }

    /// Returns the slot number, which is also the bitboard index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the slot number as stored on the wire.
    #[inline]
    pub const fn slot(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn color(self) -> Color {
        Color::from_parity(self.0)
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self.0 & !1 {
            0 => PieceKind::Pawn,
            2 => PieceKind::Knight,
            4 => PieceKind::Bishop,
            6 => PieceKind::Rook,
            8 => PieceKind::Queen,
            _ => PieceKind::King,
        }
    }

    /// Material value in centipawns.
    #[inline]
    pub const fn value(self) -> i32 {
        self.kind().value()
    }

    /// Returns the FEN character (uppercase for White).
    pub const fn to_fen_char(self) -> char {
        let c = self.kind().letter();
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character.
    pub const fn from_fen_char(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }

    /// Two-letter token used by board dumps ("WP", "BK", ...).
    pub fn token(self) -> String {
        let side = match self.color() {
            Color::White => 'W',
            Color::Black => 'B',
        };
        format!("{}{}", side, self.kind().letter().to_ascii_uppercase())
    }
}

impl std::fmt::Debug for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({} {})", self.color(), self.kind())
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_fen_char())
    }
}

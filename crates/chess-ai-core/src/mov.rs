//! Move representation.

use crate::{Color, Piece, PieceKind, Square};
use std::fmt;

/// What a move does to the board, independent of promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Quiet move to an empty square (pawn pushes included).
    Normal,
    /// Capture of the piece standing on the destination square.
    CaptureOrdinary,
    /// Pawn capture of the pawn standing behind the destination square.
    CaptureEnPassant,
    /// King-side castling (O-O).
    CastleKingside,
    /// Queen-side castling (O-O-O).
    CastleQueenside,
    /// The mover resigns; no pieces move.
    Resign,
    /// The game is declared drawn; no pieces move.
    Stalemate,
}

impl MoveKind {
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(self, MoveKind::CaptureOrdinary | MoveKind::CaptureEnPassant)
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }
}

/// Piece a pawn turns into on the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Promotion {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl Promotion {
    /// Generation order used for promotion moves.
    pub const ALL: [Promotion; 4] = [
        Promotion::Queen,
        Promotion::Knight,
        Promotion::Rook,
        Promotion::Bishop,
    ];

    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self {
            Promotion::Knight => PieceKind::Knight,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Queen => PieceKind::Queen,
        }
    }

    /// The promoted piece for the given side.
    #[inline]
    pub const fn piece(self, color: Color) -> Piece {
        Piece::new(self.kind(), color)
    }

    pub const fn to_char(self) -> char {
        self.kind().letter()
    }

    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'n' => Some(Promotion::Knight),
            'b' => Some(Promotion::Bishop),
            'r' => Some(Promotion::Rook),
            'q' => Some(Promotion::Queen),
            _ => None,
        }
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

/// A chess move.
///
/// Moves are plain values: they carry the moving and captured piece slots so
/// that applying one never has to search the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub source: Square,
    pub destination: Square,
    pub moving: Piece,
    pub captured: Option<Piece>,
    pub kind: MoveKind,
    pub promotion: Option<Promotion>,
}

impl Move {
    /// Creates a quiet move.
    #[inline]
    pub const fn normal(source: Square, destination: Square, moving: Piece) -> Self {
        Move {
            source,
            destination,
            moving,
            captured: None,
            kind: MoveKind::Normal,
            promotion: None,
        }
    }

    /// Creates an ordinary capture of `captured` on the destination square.
    #[inline]
    pub const fn capture(
        source: Square,
        destination: Square,
        moving: Piece,
        captured: Piece,
    ) -> Self {
        Move {
            source,
            destination,
            moving,
            captured: Some(captured),
            kind: MoveKind::CaptureOrdinary,
            promotion: None,
        }
    }

    /// Creates an en passant capture by `moving` (a pawn).
    #[inline]
    pub const fn en_passant(source: Square, destination: Square, moving: Piece) -> Self {
        Move {
            source,
            destination,
            moving,
            captured: Some(Piece::new(PieceKind::Pawn, moving.color().opposite())),
            kind: MoveKind::CaptureEnPassant,
            promotion: None,
        }
    }

    /// Creates a castling move for the king `moving` standing on `source`.
    #[inline]
    pub const fn castle(source: Square, destination: Square, moving: Piece, kind: MoveKind) -> Self {
        Move {
            source,
            destination,
            moving,
            captured: None,
            kind,
            promotion: None,
        }
    }

    /// Creates a resignation by `side`.
    ///
    /// The moving slot carries the side; no squares are touched.
    #[inline]
    pub const fn resign(side: Color) -> Self {
        Move {
            source: Square::A8,
            destination: Square::A8,
            moving: Piece::new(PieceKind::King, side),
            captured: None,
            kind: MoveKind::Resign,
            promotion: None,
        }
    }

    /// Creates a draw declaration made on `side`'s turn.
    #[inline]
    pub const fn stalemate(side: Color) -> Self {
        Move {
            source: Square::A8,
            destination: Square::A8,
            moving: Piece::new(PieceKind::King, side),
            captured: None,
            kind: MoveKind::Stalemate,
            promotion: None,
        }
    }

    /// Returns the same move with a promotion attached.
    #[inline]
    pub const fn with_promotion(self, promotion: Promotion) -> Self {
        Move {
            promotion: Some(promotion),
            ..self
        }
    }

    /// The side making the move.
    #[inline]
    pub const fn side(self) -> Color {
        self.moving.color()
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.kind.is_capture()
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    ///
    /// Resignations and draw declarations render as the null move "0000".
    pub fn to_uci(self) -> String {
        match self.kind {
            MoveKind::Resign | MoveKind::Stalemate => "0000".to_string(),
            _ => match self.promotion {
                Some(p) => format!("{}{}{}", self.source, self.destination, p.to_char()),
                None => format!("{}{}", self.source, self.destination),
            },
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?} {:?}", self.to_uci(), self.moving, self.kind)?;
        if let Some(captured) = self.captured {
            write!(f, " x{:?}", captured)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

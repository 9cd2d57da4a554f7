//! FEN (Forsyth-Edwards Notation) parsing and serialization.
//!
//! FEN lists ranks from the eighth down to the first, which is exactly the
//! square index order used throughout this crate, so the placement field maps
//! onto square indices without any flipping.

use crate::{Color, Piece, Square};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 or 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Castling availability as written in the third FEN field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingFlags {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingFlags {
    pub const ALL: CastlingFlags = CastlingFlags {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    fn parse(field: &str) -> Result<Self, FenError> {
        let mut flags = CastlingFlags::default();
        if field == "-" {
            return Ok(flags);
        }
        for c in field.chars() {
            let flag = match c {
                'K' => &mut flags.white_kingside,
                'Q' => &mut flags.white_queenside,
                'k' => &mut flags.black_kingside,
                'q' => &mut flags.black_queenside,
                other => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        other
                    )))
                }
            };
            *flag = true;
        }
        Ok(flags)
    }
}

impl fmt::Display for CastlingFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut any = false;
        for (held, c) in [
            (self.white_kingside, 'K'),
            (self.white_queenside, 'Q'),
            (self.black_kingside, 'k'),
            (self.black_queenside, 'q'),
        ] {
            if held {
                write!(f, "{}", c)?;
                any = true;
            }
        }
        if !any {
            write!(f, "-")?;
        }
        Ok(())
    }
}

/// A parsed FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Piece on each square, indexed by square number (a8 = 0).
    pub placement: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingFlags,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string. The two move counters may be omitted, in which
    /// case they default to `0 1`.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 4 && fields.len() != 6 {
            return Err(FenError::InvalidFieldCount(fields.len()));
        }

        let placement = Self::parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = CastlingFlags::parse(fields[2])?;
        let en_passant = Self::parse_en_passant(fields[3])?;

        let (halfmove_clock, fullmove_number) = if fields.len() == 6 {
            let halfmove = fields[4]
                .parse::<u32>()
                .map_err(|_| FenError::InvalidHalfmoveClock(fields[4].to_string()))?;
            let fullmove = fields[5]
                .parse::<u32>()
                .map_err(|_| FenError::InvalidFullmoveNumber(fields[5].to_string()))?;
            (halfmove, fullmove)
        } else {
            (0, 1)
        };

        Ok(Fen {
            placement,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_placement(field: &str) -> Result<[Option<Piece>; 64], FenError> {
        let rows: Vec<&str> = field.split('/').collect();
        if rows.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                rows.len()
            )));
        }

        let mut placement = [None; 64];
        for (row, text) in rows.iter().enumerate() {
            let mut column = 0usize;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    column += skip as usize;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if column < 8 {
                        placement[row * 8 + column] = Some(piece);
                    }
                    column += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - row
                    )));
                }
            }
            if column != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - row,
                    column
                )));
            }
        }
        Ok(placement)
    }

    fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
        if field == "-" {
            return Ok(None);
        }
        match Square::from_algebraic(field) {
            Some(sq) if sq.row() == 2 || sq.row() == 5 => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(field.to_string())),
        }
    }

    /// Renders the placement field.
    pub fn placement_field(placement: &[Option<Piece>; 64]) -> String {
        let mut out = String::new();
        for row in 0..8 {
            let mut empty = 0;
            for column in 0..8 {
                match placement[row * 8 + column] {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if row < 7 {
                out.push('/');
            }
        }
        out
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let ep = self
            .en_passant
            .map(Square::to_algebraic)
            .unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{} {} {} {} {} {}",
            Self::placement_field(&self.placement),
            side,
            self.castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

//! Pseudo-legal move generation.
//!
//! [`MoveListGenerator`] walks the precomputed jump lists and rays of
//! [`tables`] for the side to move. Moves that leave the mover's own king
//! attacked are still produced; they are weeded out one ply later, when the
//! opponent's generation finds a capture of that king and reports
//! [`GenerationError::IllegalPosition`].

pub mod perft;
mod tables;

use crate::{Bitboard, Board, CastlingWing};
use chess_ai_core::{Color, Move, MoveKind, Piece, PieceKind, Promotion, Square};
use thiserror::Error;

pub use tables::{move_tables, MoveTables};

/// Why generation produced no usable move list.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// The side to move can capture the enemy king: the previous move was
    /// illegal.
    #[error("the side to move can capture the enemy king")]
    IllegalPosition,

    /// The side to move has no pseudo-legal moves.
    #[error("no moves available")]
    NoMoves,
}

/// Squares that must be empty for each castling move, and the king's
/// destination, indexed by `CastlingWing::right_index`.
struct CastlingPath {
    king_from: Square,
    king_to: Square,
    empty: Bitboard,
    kind: MoveKind,
}

const CASTLING_PATHS: [CastlingPath; 4] = [
    // white kingside
    CastlingPath {
        king_from: Square::E1,
        king_to: Square::G1,
        empty: Bitboard((1 << 61) | (1 << 62)),
        kind: MoveKind::CastleKingside,
    },
    // black kingside
    CastlingPath {
        king_from: Square::E8,
        king_to: Square::G8,
        empty: Bitboard((1 << 5) | (1 << 6)),
        kind: MoveKind::CastleKingside,
    },
    // white queenside
    CastlingPath {
        king_from: Square::E1,
        king_to: Square::C1,
        empty: Bitboard((1 << 59) | (1 << 58) | (1 << 57)),
        kind: MoveKind::CastleQueenside,
    },
    // black queenside
    CastlingPath {
        king_from: Square::E8,
        king_to: Square::C8,
        empty: Bitboard((1 << 3) | (1 << 2) | (1 << 1)),
        kind: MoveKind::CastleQueenside,
    },
];

/// Generates pseudo-legal move lists.
///
/// A generator owns its list and reuses the allocation between calls.
#[derive(Debug, Clone, Default)]
pub struct MoveListGenerator {
    moves: Vec<Move>,
}

impl MoveListGenerator {
    pub fn new() -> Self {
        MoveListGenerator {
            moves: Vec::with_capacity(64),
        }
    }

    /// Generates every pseudo-legal move for the side to move.
    ///
    /// The mover's phantom kings are removed from `board` first. On success
    /// `proceed` is passed back unchanged.
    pub fn compute_legal_moves(
        &mut self,
        board: &mut Board,
        proceed: bool,
    ) -> Result<bool, GenerationError> {
        self.moves.clear();
        let side = board.side_to_move();
        board.clear_extra_kings(side);

        if let Err(err) = self.generate(board, side) {
            tracing::trace!(side = %side, "enemy king can be captured");
            return Err(err);
        }

        if self.moves.is_empty() {
            Err(GenerationError::NoMoves)
        } else {
            Ok(proceed)
        }
    }

    /// Generates only the captures, for quiescence search.
    ///
    /// Promotions that capture are kept; quiet promotions are not.
    pub fn compute_quiescence_moves(
        &mut self,
        board: &mut Board,
        proceed: bool,
    ) -> Result<bool, GenerationError> {
        match self.compute_legal_moves(board, proceed) {
            Err(GenerationError::IllegalPosition) => return Err(GenerationError::IllegalPosition),
            Err(GenerationError::NoMoves) | Ok(_) => {}
        }

        self.moves.retain(|mv| mv.is_capture());

        if self.moves.is_empty() {
            Err(GenerationError::NoMoves)
        } else {
            Ok(proceed)
        }
    }

    /// Moves produced by the last generation.
    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns true if `mv` is in the last generated list.
    pub fn contains(&self, mv: &Move) -> bool {
        self.moves.iter().any(|m| m == mv)
    }

    /// Finds the first generated move between two squares.
    ///
    /// For promotions this is the queen promotion.
    pub fn find_move(&self, source: Square, destination: Square) -> Option<Move> {
        self.moves
            .iter()
            .find(|m| m.source == source && m.destination == destination)
            .copied()
    }

    fn generate(&mut self, board: &Board, side: Color) -> Result<(), GenerationError> {
        let tables = move_tables();

        let queen = Piece::new(PieceKind::Queen, side);
        for from in squares_for(board.pieces(queen), side) {
            match side {
                Color::White => {
                    self.slide(board, tables.bishop_rays(from), from, queen)?;
                    self.slide(board, tables.rook_rays(from), from, queen)?;
                }
                Color::Black => {
                    self.slide(board, tables.rook_rays(from), from, queen)?;
                    self.slide(board, tables.bishop_rays(from), from, queen)?;
                }
            }
        }

        let king = Piece::new(PieceKind::King, side);
        for from in squares_for(board.pieces(king), side) {
            self.jump(board, tables.king_jumps(from), from, king)?;
            self.castling(board, from, king);
        }

        let rook = Piece::new(PieceKind::Rook, side);
        for from in squares_for(board.pieces(rook), side) {
            self.slide(board, tables.rook_rays(from), from, rook)?;
        }

        let bishop = Piece::new(PieceKind::Bishop, side);
        for from in squares_for(board.pieces(bishop), side) {
            self.slide(board, tables.bishop_rays(from), from, bishop)?;
        }

        let knight = Piece::new(PieceKind::Knight, side);
        for from in squares_for(board.pieces(knight), side) {
            self.jump(board, tables.knight_jumps(from), from, knight)?;
        }

        let pawn = Piece::new(PieceKind::Pawn, side);
        for from in squares_for(board.pieces(pawn), side) {
            self.pawn(board, from, pawn)?;
        }

        Ok(())
    }

    /// Adds a capture of whatever enemy piece stands on `to`.
    fn capture(
        &mut self,
        board: &Board,
        from: Square,
        to: Square,
        moving: Piece,
    ) -> Result<Option<Move>, GenerationError> {
        let Some(captured) = board.piece_at(moving.color().opposite(), to) else {
            return Ok(None);
        };
        if captured.kind() == PieceKind::King {
            return Err(GenerationError::IllegalPosition);
        }
        Ok(Some(Move::capture(from, to, moving, captured)))
    }

    fn slide(
        &mut self,
        board: &Board,
        rays: &[Vec<Square>],
        from: Square,
        moving: Piece,
    ) -> Result<(), GenerationError> {
        let own = board.occupancy(moving.color());
        let enemy = board.occupancy(moving.color().opposite());
        for ray in rays {
            for &to in ray {
                if own.contains(to) {
                    break;
                }
                if enemy.contains(to) {
                    if let Some(mv) = self.capture(board, from, to, moving)? {
                        self.moves.push(mv);
                    }
                    break;
                }
                self.moves.push(Move::normal(from, to, moving));
            }
        }
        Ok(())
    }

    fn jump(
        &mut self,
        board: &Board,
        targets: &[Square],
        from: Square,
        moving: Piece,
    ) -> Result<(), GenerationError> {
        let own = board.occupancy(moving.color());
        let enemy = board.occupancy(moving.color().opposite());
        for &to in targets {
            if own.contains(to) {
                continue;
            }
            if enemy.contains(to) {
                if let Some(mv) = self.capture(board, from, to, moving)? {
                    self.moves.push(mv);
                }
            } else {
                self.moves.push(Move::normal(from, to, moving));
            }
        }
        Ok(())
    }

    fn castling(&mut self, board: &Board, from: Square, king: Piece) {
        let side = king.color();
        let occupied = board.occupied();
        for wing in [CastlingWing::Kingside, CastlingWing::Queenside] {
            if !board.castling_right(side, wing) {
                continue;
            }
            let path = &CASTLING_PATHS[wing.right_index(side)];
            if path.king_from == from && (occupied & path.empty).is_empty() {
                self.moves
                    .push(Move::castle(from, path.king_to, king, path.kind));
            }
        }
    }

    fn pawn(&mut self, board: &Board, from: Square, pawn: Piece) -> Result<(), GenerationError> {
        let side = pawn.color();
        let occupied = board.occupied();
        let enemy = board.occupancy(side.opposite());
        let (start_row, last_row, en_passant_row) = match side {
            Color::White => (6, 0, 2),
            Color::Black => (1, 7, 5),
        };

        let Some(one) = from.offset(side.pawn_step()) else {
            return Ok(());
        };

        // pushes
        if !occupied.contains(one) {
            if one.row() == last_row {
                self.promotions(Move::normal(from, one, pawn));
            } else {
                self.moves.push(Move::normal(from, one, pawn));
                if from.row() == start_row {
                    if let Some(two) = one.offset(side.pawn_step()) {
                        if !occupied.contains(two) {
                            self.moves.push(Move::normal(from, two, pawn));
                        }
                    }
                }
            }
        }

        // captures, left diagonal then right
        let column = from.column();
        let diagonals = [
            (column > 0).then(|| one.offset(-1)).flatten(),
            (column < 7).then(|| one.offset(1)).flatten(),
        ];
        for to in diagonals.into_iter().flatten() {
            if enemy.contains(to) {
                if let Some(mv) = self.capture(board, from, to, pawn)? {
                    if to.row() == last_row {
                        self.promotions(mv);
                    } else {
                        self.moves.push(mv);
                    }
                }
            } else if to.row() == en_passant_row && board.en_passant_target().contains(to) {
                self.moves.push(Move::en_passant(from, to, pawn));
            }
        }
        Ok(())
    }

    fn promotions(&mut self, base: Move) {
        for promotion in Promotion::ALL {
            self.moves.push(base.with_promotion(promotion));
        }
    }
}

/// Squares of a bitboard in a side's scan order: White from h1 (63) down,
/// Black from a8 (0) up.
struct ScanOrder {
    bits: Bitboard,
    side: Color,
}

impl Iterator for ScanOrder {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        match self.side {
            Color::White => self.bits.pop_highest(),
            Color::Black => self.bits.pop_lowest(),
        }
    }
}

#[inline]
fn squares_for(bits: Bitboard, side: Color) -> ScanOrder {
    ScanOrder { bits, side }
}

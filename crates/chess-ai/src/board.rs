//! Bitboard board representation.
//!
//! A [`Board`] keeps one bitboard per piece slot (0-11) plus two colour
//! aggregates (12 = all white, 13 = all black). Material and pawn counters
//! are maintained incrementally by [`Board::add_piece`] and
//! [`Board::remove_piece`], the only primitives that touch piece bits.
//!
//! # Phantom kings
//!
//! After a side castles, its king bitboard and aggregate additionally carry
//! the king's source square and the square it passed over, for exactly one
//! ply. If the opponent can "capture" either phantom, castling crossed an
//! attacked square and the move generator reports the position as illegal.
//! The phantoms are removed when the castling side generates again.

use chess_ai_core::{CastlingFlags, Color, Fen, FenError, Move, MoveKind, Piece, PieceKind, Square};
use std::fmt;
use thiserror::Error;

use crate::events::{castling_rook_squares, en_passant_victim, MoveEvent, MoveObserver};
use crate::zobrist::ZOBRIST;
use crate::Bitboard;

/// Bitboard index of the all-white aggregate.
pub const ALL_WHITE: usize = 12;
/// Bitboard index of the all-black aggregate.
pub const ALL_BLACK: usize = 13;

/// Total number of bitboards a board holds.
pub const BITBOARD_COUNT: usize = 14;

/// Errors reported by the checked board-editing API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("no {piece:?} on {square}")]
    MissingPiece { piece: Piece, square: Square },

    #[error("square {square} is already occupied")]
    SquareOccupied { square: Square },

    #[error("move {0} is not made by the side to move")]
    WrongSide(Move),

    #[error("capture {0} does not name the captured piece")]
    NoCapturedPiece(Move),

    #[error("move {0} does not fit the kind it claims")]
    MalformedMove(Move),
}

/// Castling wing. The discriminant plus the colour index gives the slot in
/// the castling-rights array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingWing {
    Kingside = 0,
    Queenside = 2,
}

impl CastlingWing {
    #[inline]
    pub const fn right_index(self, color: Color) -> usize {
        self as usize + color.index()
    }
}

/// Complete mutable board state.
///
/// Cloning produces a fully independent copy; search code clones a board
/// once per branch.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    bitboards: [Bitboard; BITBOARD_COUNT],
    extra_kings: [Bitboard; 2],
    castling_rights: [bool; 4],
    has_castled: [bool; 2],
    en_passant_target: Bitboard,
    material_value: [i32; 2],
    pawn_count: [i32; 2],
    side_to_move: Color,
}

impl Board {
    /// Creates a board with no pieces, no rights and White to move.
    pub fn empty() -> Self {
        Board {
            bitboards: [Bitboard::EMPTY; BITBOARD_COUNT],
            extra_kings: [Bitboard::EMPTY; 2],
            castling_rights: [false; 4],
            has_castled: [false; 2],
            en_passant_target: Bitboard::EMPTY,
            material_value: [0; 2],
            pawn_count: [0; 2],
            side_to_move: Color::White,
        }
    }

    /// Creates the standard starting position.
    pub fn new() -> Self {
        Self::from_fen(Fen::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a board from a FEN string.
    ///
    /// The move counters are accepted but not tracked.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = Fen::parse(fen)?;
        let mut board = Board::empty();

        for (index, piece) in parsed.placement.iter().enumerate() {
            if let (Some(piece), Some(square)) = (piece, Square::from_index(index as u8)) {
                board.add_piece(*piece, square);
            }
        }

        let flags = parsed.castling;
        board.castling_rights[CastlingWing::Kingside.right_index(Color::White)] =
            flags.white_kingside;
        board.castling_rights[CastlingWing::Kingside.right_index(Color::Black)] =
            flags.black_kingside;
        board.castling_rights[CastlingWing::Queenside.right_index(Color::White)] =
            flags.white_queenside;
        board.castling_rights[CastlingWing::Queenside.right_index(Color::Black)] =
            flags.black_queenside;

        board.en_passant_target = parsed
            .en_passant
            .map(Bitboard::from_square)
            .unwrap_or(Bitboard::EMPTY);
        board.side_to_move = parsed.side_to_move;

        Ok(board)
    }

    /// Returns the FEN string for this board. Move counters are written as
    /// `0 1`.
    pub fn to_fen(&self) -> String {
        let mut placement = [None; 64];
        for (index, slot) in placement.iter_mut().enumerate() {
            if let Some(square) = Square::from_index(index as u8) {
                *slot = self.piece_on(square);
            }
        }

        let fen = Fen {
            placement,
            side_to_move: self.side_to_move,
            castling: CastlingFlags {
                white_kingside: self.castling_right(Color::White, CastlingWing::Kingside),
                white_queenside: self.castling_right(Color::White, CastlingWing::Queenside),
                black_kingside: self.castling_right(Color::Black, CastlingWing::Kingside),
                black_queenside: self.castling_right(Color::Black, CastlingWing::Queenside),
            },
            en_passant: self.en_passant_target.lowest(),
            halfmove_clock: 0,
            fullmove_number: 1,
        };
        fen.to_string()
    }

    // ----- accessors -----

    /// Returns bitboard `index` (0-11 piece slots, 12-13 aggregates).
    #[inline]
    pub fn bitboard(&self, index: usize) -> Bitboard {
        self.bitboards[index]
    }

    /// Returns the bitboard of one piece slot.
    #[inline]
    pub fn pieces(&self, piece: Piece) -> Bitboard {
        self.bitboards[piece.index()]
    }

    /// Returns all squares occupied by `color`, phantom kings included.
    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.bitboards[ALL_WHITE + color.index()]
    }

    /// Returns all occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.bitboards[ALL_WHITE] | self.bitboards[ALL_BLACK]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Overrides the side to move.
    #[inline]
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline]
    pub fn castling_right(&self, color: Color, wing: CastlingWing) -> bool {
        self.castling_rights[wing.right_index(color)]
    }

    #[inline]
    pub fn has_castled(&self, color: Color) -> bool {
        self.has_castled[color.index()]
    }

    /// En passant target as a bitboard holding at most one square.
    #[inline]
    pub fn en_passant_target(&self) -> Bitboard {
        self.en_passant_target
    }

    /// Phantom-king mask of `color`; empty unless that side just castled.
    #[inline]
    pub fn extra_kings(&self, color: Color) -> Bitboard {
        self.extra_kings[color.index()]
    }

    #[inline]
    pub fn material_value(&self, color: Color) -> i32 {
        self.material_value[color.index()]
    }

    #[inline]
    pub fn pawn_count(&self, color: Color) -> i32 {
        self.pawn_count[color.index()]
    }

    /// Finds the piece of `color` on `square`, treating phantom kings as
    /// kings.
    ///
    /// Kings are checked first: a phantom king can share a square with the
    /// rook that just castled.
    pub fn piece_at(&self, color: Color, square: Square) -> Option<Piece> {
        if !self.occupancy(color).contains(square) {
            return None;
        }
        let king = Piece::new(PieceKind::King, color);
        if self.pieces(king).contains(square) {
            return Some(king);
        }
        PieceKind::ALL[..5]
            .iter()
            .map(|&kind| Piece::new(kind, color))
            .find(|&piece| self.pieces(piece).contains(square))
    }

    /// Returns the real piece standing on `square`, ignoring phantom kings.
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        (0..Piece::COUNT as u8)
            .filter_map(Piece::from_slot)
            .find(|&piece| self.real_pieces(piece).contains(square))
    }

    /// Piece bits of one slot with phantom kings masked out.
    #[inline]
    fn real_pieces(&self, piece: Piece) -> Bitboard {
        let bits = self.pieces(piece);
        if piece.kind() == PieceKind::King {
            bits & !self.extra_kings[piece.color().index()]
        } else {
            bits
        }
    }

    // ----- primitives -----

    /// Puts `piece` on `square` and updates aggregates and counters.
    ///
    /// The square must not hold a piece of the same slot.
    #[inline]
    pub(crate) fn add_piece(&mut self, piece: Piece, square: Square) {
        debug_assert!(
            !self.pieces(piece).contains(square),
            "{:?} already on {}",
            piece,
            square
        );
        let color = piece.color();
        self.bitboards[piece.index()].set(square);
        self.bitboards[ALL_WHITE + color.index()].set(square);
        self.material_value[color.index()] += piece.value();
        if piece.kind() == PieceKind::Pawn {
            self.pawn_count[color.index()] += 1;
        }
    }

    /// Removes `piece` from `square` and updates aggregates and counters.
    ///
    /// The piece must be on the square.
    #[inline]
    pub(crate) fn remove_piece(&mut self, piece: Piece, square: Square) {
        debug_assert!(
            self.pieces(piece).contains(square),
            "{:?} missing from {}",
            piece,
            square
        );
        let color = piece.color();
        self.bitboards[piece.index()].clear(square);
        self.bitboards[ALL_WHITE + color.index()].clear(square);
        self.material_value[color.index()] -= piece.value();
        if piece.kind() == PieceKind::Pawn {
            self.pawn_count[color.index()] -= 1;
        }
    }

    /// Places a piece on an empty square.
    pub fn place_piece(&mut self, piece: Piece, square: Square) -> Result<(), BoardError> {
        self.require_empty(square)?;
        self.add_piece(piece, square);
        Ok(())
    }

    /// Removes a piece that is known to be on `square`.
    pub fn take_piece(&mut self, piece: Piece, square: Square) -> Result<(), BoardError> {
        self.require_piece(piece, square)?;
        self.remove_piece(piece, square);
        Ok(())
    }

    fn set_extra_kings(&mut self, color: Color, mask: Bitboard) {
        let king = Piece::new(PieceKind::King, color);
        self.extra_kings[color.index()] = mask;
        self.bitboards[king.index()] |= mask;
        self.bitboards[ALL_WHITE + color.index()] |= mask;
    }

    /// Removes the phantom kings of `color`, if any.
    pub fn clear_extra_kings(&mut self, color: Color) {
        let mask = self.extra_kings[color.index()];
        if mask.is_empty() {
            return;
        }
        let king = Piece::new(PieceKind::King, color);
        let rook = Piece::new(PieceKind::Rook, color);
        self.bitboards[king.index()] ^= mask;
        self.bitboards[ALL_WHITE + color.index()] ^= mask;
        // the rook may sit on a phantom square
        let rooks = self.bitboards[rook.index()];
        self.bitboards[ALL_WHITE + color.index()] |= rooks;
        self.extra_kings[color.index()] = Bitboard::EMPTY;
    }

    // ----- moves -----

    /// Applies `mv` without any legality checking.
    ///
    /// The moving piece must be on the source square and the captured piece,
    /// if any, on its square.
    pub fn apply_move(&mut self, mv: Move) {
        let side = mv.side();
        // phantoms only live through the opponent's reply
        self.clear_extra_kings(side);

        match mv.kind {
            MoveKind::Resign | MoveKind::Stalemate => {
                self.side_to_move = side.opposite();
                return;
            }
            MoveKind::Normal => {
                self.remove_piece(mv.moving, mv.source);
                self.add_piece(mv.moving, mv.destination);
            }
            MoveKind::CaptureOrdinary => {
                if let Some(captured) = mv.captured {
                    self.remove_piece(captured, mv.destination);
                }
                self.remove_piece(mv.moving, mv.source);
                self.add_piece(mv.moving, mv.destination);
            }
            MoveKind::CaptureEnPassant => {
                if let Some(victim) = en_passant_victim(mv.destination, side) {
                    let pawn = mv
                        .captured
                        .unwrap_or(Piece::new(PieceKind::Pawn, side.opposite()));
                    self.remove_piece(pawn, victim);
                }
                self.remove_piece(mv.moving, mv.source);
                self.add_piece(mv.moving, mv.destination);
            }
            MoveKind::CastleKingside | MoveKind::CastleQueenside => {
                self.remove_piece(mv.moving, mv.source);
                self.add_piece(mv.moving, mv.destination);
                if let Some((rook_from, rook_to)) = castling_rook_squares(mv.source, mv.kind) {
                    let rook = Piece::new(PieceKind::Rook, side);
                    self.remove_piece(rook, rook_from);
                    self.add_piece(rook, rook_to);

                    let mask = Bitboard::from_square(mv.source) | Bitboard::from_square(rook_to);
                    self.set_extra_kings(side, mask);
                }
                self.has_castled[side.index()] = true;
            }
        }

        if let Some(promotion) = mv.promotion {
            self.remove_piece(mv.moving, mv.destination);
            self.add_piece(promotion.piece(side), mv.destination);
        }

        self.update_en_passant_target(&mv);
        self.update_castling_rights(&mv);
        self.side_to_move = side.opposite();
    }

    /// Reports `mv` to `observer`, then applies it.
    pub fn apply_move_confirmed<O: MoveObserver + ?Sized>(&mut self, mv: Move, observer: &mut O) {
        observer.on_move(mv.side(), MoveEvent::describe(&mv));
        self.apply_move(mv);
    }

    /// Applies `mv` after checking that it belongs to the side to move, that
    /// its squares fit its kind, and that the pieces it names are where it
    /// says.
    pub fn try_apply_move(&mut self, mv: Move) -> Result<(), BoardError> {
        let side = mv.side();
        if side != self.side_to_move {
            return Err(BoardError::WrongSide(mv));
        }
        if matches!(mv.kind, MoveKind::Resign | MoveKind::Stalemate) {
            self.apply_move(mv);
            return Ok(());
        }
        self.require_piece(mv.moving, mv.source)?;
        match mv.kind {
            MoveKind::CaptureOrdinary => {
                let captured = mv.captured.ok_or(BoardError::NoCapturedPiece(mv))?;
                self.require_piece(captured, mv.destination)?;
            }
            MoveKind::CaptureEnPassant => {
                let en_passant_row = match side {
                    Color::White => 2,
                    Color::Black => 5,
                };
                if mv.moving.kind() != PieceKind::Pawn || mv.destination.row() != en_passant_row {
                    return Err(BoardError::MalformedMove(mv));
                }
                let victim = en_passant_victim(mv.destination, side)
                    .ok_or(BoardError::MalformedMove(mv))?;
                let captured = mv.captured.ok_or(BoardError::NoCapturedPiece(mv))?;
                self.require_piece(captured, victim)?;
                self.require_empty(mv.destination)?;
            }
            MoveKind::CastleKingside | MoveKind::CastleQueenside => {
                let (king_from, step) = match (side, mv.kind) {
                    (Color::White, MoveKind::CastleKingside) => (Square::E1, 2),
                    (Color::White, _) => (Square::E1, -2),
                    (Color::Black, MoveKind::CastleKingside) => (Square::E8, 2),
                    (Color::Black, _) => (Square::E8, -2),
                };
                if mv.moving.kind() != PieceKind::King
                    || mv.source != king_from
                    || mv.source.offset(step) != Some(mv.destination)
                {
                    return Err(BoardError::MalformedMove(mv));
                }
                let (rook_from, rook_to) = castling_rook_squares(mv.source, mv.kind)
                    .ok_or(BoardError::MalformedMove(mv))?;
                self.require_piece(Piece::new(PieceKind::Rook, side), rook_from)?;
                self.require_empty(mv.destination)?;
                self.require_empty(rook_to)?;
            }
            _ => self.require_empty(mv.destination)?,
        }
        self.apply_move(mv);
        Ok(())
    }

    fn require_piece(&self, piece: Piece, square: Square) -> Result<(), BoardError> {
        if self.real_pieces(piece).contains(square) {
            Ok(())
        } else {
            Err(BoardError::MissingPiece { piece, square })
        }
    }

    fn require_empty(&self, square: Square) -> Result<(), BoardError> {
        if self.occupied().contains(square) {
            Err(BoardError::SquareOccupied { square })
        } else {
            Ok(())
        }
    }

    fn update_en_passant_target(&mut self, mv: &Move) {
        self.en_passant_target = Bitboard::EMPTY;
        if mv.moving.kind() != PieceKind::Pawn {
            return;
        }
        let source = mv.source.index();
        let destination = mv.destination.index();
        let target = match mv.side() {
            Color::White if source.wrapping_sub(destination) == 16 => Square::from_index(destination + 8),
            Color::Black if destination.wrapping_sub(source) == 16 => Square::from_index(source + 8),
            _ => None,
        };
        if let Some(square) = target {
            self.en_passant_target = Bitboard::from_square(square);
        }
    }

    fn update_castling_rights(&mut self, mv: &Move) {
        if mv.moving.kind() == PieceKind::King {
            let side = mv.side();
            self.castling_rights[CastlingWing::Kingside.right_index(side)] = false;
            self.castling_rights[CastlingWing::Queenside.right_index(side)] = false;
        }
        for square in [mv.source, mv.destination] {
            if let Some(right) = corner_right(square) {
                self.castling_rights[right] = false;
            }
        }
    }

    // ----- evaluation helpers -----

    /// Zobrist hash of the piece placement.
    pub fn hash_key(&self) -> u64 {
        self.fold_pieces(|piece, square| ZOBRIST.hash_of(piece, square))
    }

    /// Independent Zobrist fingerprint used to confirm transposition hits.
    pub fn hash_lock(&self) -> u64 {
        self.fold_pieces(|piece, square| ZOBRIST.lock_of(piece, square))
    }

    fn fold_pieces(&self, value: impl Fn(Piece, Square) -> u64) -> u64 {
        let mut key = 0u64;
        for piece in (0..Piece::COUNT as u8).filter_map(Piece::from_slot) {
            for square in self.real_pieces(piece) {
                key ^= value(piece, square);
            }
        }
        key
    }

    /// Material balance from `side`'s point of view.
    ///
    /// The leader's advantage grows as material comes off the board, and
    /// faster when the leader still has pawns.
    pub fn eval_material(&self, side: Color) -> i32 {
        let white = self.material_value(Color::White);
        let black = self.material_value(Color::Black);
        if white == black {
            return 0;
        }

        let (leader, diff) = if black > white {
            (Color::Black, black - white)
        } else {
            (Color::White, white - black)
        };
        let total = i64::from(white + black);
        let pawns = i64::from(self.pawn_count(leader).max(0));
        let diff = i64::from(diff);

        let value = diff.min(2400) + (diff * (12000 - total) * pawns) / (6400 * (pawns + 1));
        let value = value as i32;
        if side == leader {
            value
        } else {
            -value
        }
    }
}

/// Castling-right slot tied to a corner square, if `square` is one.
#[inline]
fn corner_right(square: Square) -> Option<usize> {
    match square.index() {
        0 => Some(CastlingWing::Queenside.right_index(Color::Black)),
        7 => Some(CastlingWing::Kingside.right_index(Color::Black)),
        56 => Some(CastlingWing::Queenside.right_index(Color::White)),
        63 => Some(CastlingWing::Kingside.right_index(Color::White)),
        _ => None,
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for column in 0..8u8 {
                match Square::from_row_column(row, column).and_then(|sq| self.piece_on(sq)) {
                    Some(piece) => write!(f, "{} ", piece.token())?,
                    None => write!(f, ".. ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a  b  c  d  e  f  g  h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn assert_occupancy(board: &Board) {
        for color in Color::ALL {
            let mut union = Bitboard::EMPTY;
            for kind in PieceKind::ALL {
                union |= board.pieces(Piece::new(kind, color));
            }
            assert_eq!(union, board.occupancy(color));
        }
    }

    #[test]
    fn start_position_layout() {
        let board = Board::new();
        assert_eq!(board.piece_on(Square::E1), Some(Piece::WHITE_KING));
        assert_eq!(board.piece_on(Square::A8), Some(Piece::BLACK_ROOK));
        assert_eq!(board.occupancy(Color::White).count(), 16);
        assert_eq!(board.occupancy(Color::Black).count(), 16);
        assert_eq!(board.pawn_count(Color::White), 8);
        assert_eq!(board.material_value(Color::Black), 6000);
        assert_eq!(board.bitboard(ALL_WHITE), board.occupancy(Color::White));
        assert!(board.castling_right(Color::White, CastlingWing::Queenside));
        assert_occupancy(&board);
    }

    #[test]
    fn fen_roundtrip() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        assert_eq!(Board::from_fen(fen).unwrap().to_fen(), fen);
        assert_eq!(Board::new().to_fen(), Fen::STARTPOS);
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let mut board = Board::new();
        board.apply_move(Move::normal(sq("e2"), sq("e4"), Piece::WHITE_PAWN));
        assert_eq!(board.en_passant_target(), Bitboard::from_square(sq("e3")));
        assert_eq!(board.en_passant_target().lowest().map(Square::index), Some(44));
        assert_eq!(board.side_to_move(), Color::Black);

        board.apply_move(Move::normal(sq("g8"), sq("f6"), Piece::BLACK_KNIGHT));
        assert!(board.en_passant_target().is_empty());

        board.apply_move(Move::normal(sq("d2"), sq("d3"), Piece::WHITE_PAWN));
        board.apply_move(Move::normal(sq("c7"), sq("c5"), Piece::BLACK_PAWN));
        assert_eq!(board.en_passant_target(), Bitboard::from_square(sq("c6")));
    }

    #[test]
    fn en_passant_removes_victim() {
        let mut board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        board.apply_move(Move::en_passant(sq("e5"), sq("d6"), Piece::WHITE_PAWN));
        assert_eq!(board.piece_on(sq("d5")), None);
        assert_eq!(board.piece_on(sq("d6")), Some(Piece::WHITE_PAWN));
        assert_eq!(board.pawn_count(Color::Black), 0);
        assert_occupancy(&board);
    }

    #[test]
    fn castling_moves_rook_and_sets_phantoms() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        board.apply_move(Move::castle(
            Square::E1,
            Square::G1,
            Piece::WHITE_KING,
            MoveKind::CastleKingside,
        ));
        assert_eq!(board.piece_on(Square::G1), Some(Piece::WHITE_KING));
        assert_eq!(board.piece_on(Square::F1), Some(Piece::WHITE_ROOK));
        assert_eq!(board.piece_on(Square::H1), None);
        assert_eq!(
            board.extra_kings(Color::White),
            Bitboard::from_squares(&[Square::E1, Square::F1])
        );
        assert_eq!(board.piece_at(Color::White, Square::F1), Some(Piece::WHITE_KING));
        assert!(board.has_castled(Color::White));
        assert!(!board.castling_right(Color::White, CastlingWing::Kingside));
        assert!(!board.castling_right(Color::White, CastlingWing::Queenside));
        assert!(board.castling_right(Color::Black, CastlingWing::Kingside));

        board.clear_extra_kings(Color::White);
        assert!(board.extra_kings(Color::White).is_empty());
        assert_eq!(board.pieces(Piece::WHITE_KING), Bitboard::from_square(Square::G1));
        assert!(board.occupancy(Color::White).contains(Square::F1));
        assert!(!board.occupancy(Color::White).contains(Square::E1));
        assert_occupancy(&board);
    }

    #[test]
    fn queenside_castling_for_black() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        board.apply_move(Move::castle(
            Square::E8,
            Square::C8,
            Piece::BLACK_KING,
            MoveKind::CastleQueenside,
        ));
        assert_eq!(board.piece_on(Square::C8), Some(Piece::BLACK_KING));
        assert_eq!(board.piece_on(Square::D8), Some(Piece::BLACK_ROOK));
        assert_eq!(
            board.extra_kings(Color::Black),
            Bitboard::from_squares(&[Square::E8, Square::D8])
        );
        assert_eq!(board.to_fen(), "2kr3r/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    }

    #[test]
    fn corner_moves_clear_rights() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        board.apply_move(Move::normal(Square::A8, Square::B8, Piece::BLACK_ROOK));
        assert!(!board.castling_right(Color::Black, CastlingWing::Queenside));
        assert!(board.castling_right(Color::Black, CastlingWing::Kingside));

        // capturing a rook in its corner removes the owner's right
        board.apply_move(Move::capture(
            Square::H1,
            Square::H8,
            Piece::WHITE_ROOK,
            Piece::BLACK_ROOK,
        ));
        assert!(!board.castling_right(Color::White, CastlingWing::Kingside));
        assert!(!board.castling_right(Color::Black, CastlingWing::Kingside));
        assert!(board.castling_right(Color::White, CastlingWing::Queenside));
    }

    #[test]
    fn promotion_swaps_piece() {
        let mut board = Board::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mv = Move::capture(sq("a7"), sq("b8"), Piece::WHITE_PAWN, Piece::BLACK_ROOK)
            .with_promotion(chess_ai_core::Promotion::Queen);
        board.apply_move(mv);
        assert_eq!(board.piece_on(sq("b8")), Some(Piece::WHITE_QUEEN));
        assert_eq!(board.pawn_count(Color::White), 0);
        assert_eq!(board.material_value(Color::White), 2900);
        assert_eq!(board.material_value(Color::Black), 2000);
        assert_occupancy(&board);
    }

    #[test]
    fn resign_only_flips_side() {
        let mut board = Board::new();
        let before = board.clone();
        board.apply_move(Move::resign(Color::White));
        assert_eq!(board.side_to_move(), Color::Black);
        board.set_side_to_move(Color::White);
        assert_eq!(board, before);
    }

    #[test]
    fn clone_is_independent() {
        let original = Board::new();
        let mut copy = original.clone();
        copy.apply_move(Move::normal(sq("g1"), sq("f3"), Piece::WHITE_KNIGHT));
        assert_eq!(original, Board::new());
        assert_ne!(original, copy);
    }

    #[test]
    fn hash_ignores_move_order() {
        let mut a = Board::new();
        a.apply_move(Move::normal(sq("g1"), sq("f3"), Piece::WHITE_KNIGHT));
        a.apply_move(Move::normal(sq("g8"), sq("f6"), Piece::BLACK_KNIGHT));
        a.apply_move(Move::normal(sq("b1"), sq("c3"), Piece::WHITE_KNIGHT));

        let mut b = Board::new();
        b.apply_move(Move::normal(sq("b1"), sq("c3"), Piece::WHITE_KNIGHT));
        b.apply_move(Move::normal(sq("g8"), sq("f6"), Piece::BLACK_KNIGHT));
        b.apply_move(Move::normal(sq("g1"), sq("f3"), Piece::WHITE_KNIGHT));

        assert_eq!(a.hash_key(), b.hash_key());
        assert_eq!(a.hash_lock(), b.hash_lock());
        assert_ne!(a.hash_key(), Board::new().hash_key());
    }

    #[test]
    fn hash_excludes_phantom_kings() {
        let mut castled = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        castled.apply_move(Move::castle(
            Square::E1,
            Square::G1,
            Piece::WHITE_KING,
            MoveKind::CastleKingside,
        ));
        let placed = Board::from_fen("4k3/8/8/8/8/8/8/5RK1 b - - 0 1").unwrap();
        assert_eq!(castled.hash_key(), placed.hash_key());
        assert_eq!(castled.hash_lock(), placed.hash_lock());
    }

    #[test]
    fn material_evaluation() {
        assert_eq!(Board::new().eval_material(Color::White), 0);

        // white is a rook up with eight pawns
        let board =
            Board::from_fen("1nbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQk - 0 1").unwrap();
        let total = 6000 + 5500;
        let expected = 500 + (500 * (12000 - total) * 8) / (6400 * 9);
        assert_eq!(board.eval_material(Color::White), expected);
        assert_eq!(board.eval_material(Color::Black), -expected);
    }

    #[test]
    fn checked_editing() {
        let mut board = Board::empty();
        assert_eq!(board.place_piece(Piece::WHITE_KING, Square::E1), Ok(()));
        assert_eq!(
            board.place_piece(Piece::BLACK_KING, Square::E1),
            Err(BoardError::SquareOccupied { square: Square::E1 })
        );
        assert_eq!(
            board.take_piece(Piece::WHITE_QUEEN, Square::E1),
            Err(BoardError::MissingPiece {
                piece: Piece::WHITE_QUEEN,
                square: Square::E1
            })
        );
        assert_eq!(board.take_piece(Piece::WHITE_KING, Square::E1), Ok(()));
        assert_eq!(board.material_value(Color::White), 0);
    }

    #[test]
    fn try_apply_move_checks_preconditions() {
        let mut board = Board::new();
        let wrong_side = Move::normal(sq("e7"), sq("e5"), Piece::BLACK_PAWN);
        assert_eq!(
            board.try_apply_move(wrong_side),
            Err(BoardError::WrongSide(wrong_side))
        );
        let ghost = Move::normal(sq("e4"), sq("e5"), Piece::WHITE_PAWN);
        assert!(matches!(
            board.try_apply_move(ghost),
            Err(BoardError::MissingPiece { .. })
        ));
        let blocked = Move::normal(sq("a1"), sq("a2"), Piece::WHITE_ROOK);
        assert!(matches!(
            board.try_apply_move(blocked),
            Err(BoardError::SquareOccupied { .. })
        ));
        assert_eq!(
            board.try_apply_move(Move::normal(sq("e2"), sq("e4"), Piece::WHITE_PAWN)),
            Ok(())
        );
    }

    #[test]
    fn try_apply_move_rejects_impossible_geometry() {
        // a king "capturing en passant" onto the first row
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let before = board.clone();
        let mv = Move::en_passant(Square::E1, Square::G1, Piece::WHITE_KING);
        assert_eq!(board.try_apply_move(mv), Err(BoardError::MalformedMove(mv)));

        // a black pawn landing on the eighth row
        let mut black = Board::from_fen("4k3/p7/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        let mv = Move::en_passant(sq("a7"), Square::B8, Piece::BLACK_PAWN);
        assert_eq!(black.try_apply_move(mv), Err(BoardError::MalformedMove(mv)));

        // castling with the king on the edge of the board
        let mut edge = Board::from_fen("4k3/8/8/8/8/8/8/7K w - - 0 1").unwrap();
        let mv = Move::castle(Square::H1, Square::G1, Piece::WHITE_KING, MoveKind::CastleKingside);
        assert_eq!(edge.try_apply_move(mv), Err(BoardError::MalformedMove(mv)));

        let mv = Move::castle(Square::E1, Square::F1, Piece::WHITE_KING, MoveKind::CastleKingside);
        assert_eq!(board.try_apply_move(mv), Err(BoardError::MalformedMove(mv)));
        assert_eq!(board, before);
    }

    #[test]
    fn try_apply_move_requires_named_pieces() {
        let mut board = Board::from_fen("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1").unwrap();
        let before = board.clone();
        assert_eq!(
            board.try_apply_move(Move::en_passant(sq("e5"), sq("d6"), Piece::WHITE_PAWN)),
            Err(BoardError::MissingPiece {
                piece: Piece::BLACK_PAWN,
                square: sq("d5"),
            })
        );

        let unnamed = Move {
            captured: None,
            ..Move::capture(sq("e5"), sq("d6"), Piece::WHITE_PAWN, Piece::BLACK_PAWN)
        };
        assert_eq!(
            board.try_apply_move(unnamed),
            Err(BoardError::NoCapturedPiece(unnamed))
        );
        assert_eq!(board, before);

        let mut rookless = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1").unwrap();
        let castle = Move::castle(Square::E1, Square::G1, Piece::WHITE_KING, MoveKind::CastleKingside);
        assert_eq!(
            rookless.try_apply_move(castle),
            Err(BoardError::MissingPiece {
                piece: Piece::WHITE_ROOK,
                square: Square::H1,
            })
        );

        let mut castling = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert_eq!(castling.try_apply_move(castle), Ok(()));
        assert_eq!(castling.piece_on(Square::F1), Some(Piece::WHITE_ROOK));
        assert_eq!(castling.piece_on(Square::G1), Some(Piece::WHITE_KING));
    }

    #[test]
    fn malformed_moves_apply_without_leaving_the_board() {
        // unchecked path: no rook squares exist, so only the king moves
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/7K w - - 0 1").unwrap();
        board.apply_move(Move::castle(
            Square::H1,
            Square::G1,
            Piece::WHITE_KING,
            MoveKind::CastleKingside,
        ));
        assert_eq!(board.piece_on(Square::G1), Some(Piece::WHITE_KING));
        assert!(board.extra_kings(Color::White).is_empty());
        assert_occupancy(&board);
    }

    #[test]
    fn confirmed_moves_reach_observer() {
        let mut board = Board::new();
        let mut log: Vec<(Color, MoveEvent)> = Vec::new();
        let mv = Move::normal(sq("e2"), sq("e4"), Piece::WHITE_PAWN);
        board.apply_move_confirmed(mv, &mut log);
        assert_eq!(
            log,
            vec![(
                Color::White,
                MoveEvent::Move {
                    piece: Piece::WHITE_PAWN,
                    from: sq("e2"),
                    to: sq("e4"),
                }
            )]
        );
        assert_eq!(board.piece_on(sq("e4")), Some(Piece::WHITE_PAWN));
    }
}

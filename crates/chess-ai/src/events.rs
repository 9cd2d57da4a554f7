//! Notifications emitted when a move is confirmed on the game board.
//!
//! Search code applies moves silently on cloned boards. The game line applies
//! moves through [`Board::apply_move_confirmed`](crate::Board::apply_move_confirmed),
//! which first describes the move to a [`MoveObserver`] so a UI can animate
//! it or write it to a log.

use chess_ai_core::{Color, Move, MoveKind, Piece, Square};

/// What a confirmed move does, as seen by a display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEvent {
    /// A piece moved to an empty square.
    Move { piece: Piece, from: Square, to: Square },
    /// A piece captured on its destination square.
    Capture {
        piece: Piece,
        from: Square,
        to: Square,
        captured: Piece,
    },
    /// A pawn captured en passant; `victim` is where the captured pawn stood.
    EnPassant {
        piece: Piece,
        from: Square,
        to: Square,
        victim: Square,
    },
    /// The king and rook moved together.
    Castle {
        king_from: Square,
        king_to: Square,
        rook_from: Square,
        rook_to: Square,
    },
    /// A pawn reached the last row and became `piece`.
    Promotion {
        from: Square,
        to: Square,
        piece: Piece,
        capture: Option<Piece>,
    },
    Resign,
    Stalemate,
}

impl MoveEvent {
    /// Describes `mv` as an event.
    pub fn describe(mv: &Move) -> Self {
        let side = mv.side();
        if let Some(promotion) = mv.promotion {
            return MoveEvent::Promotion {
                from: mv.source,
                to: mv.destination,
                piece: promotion.piece(side),
                capture: mv.captured,
            };
        }
        match mv.kind {
            MoveKind::Normal => MoveEvent::Move {
                piece: mv.moving,
                from: mv.source,
                to: mv.destination,
            },
            MoveKind::CaptureOrdinary => match mv.captured {
                Some(captured) => MoveEvent::Capture {
                    piece: mv.moving,
                    from: mv.source,
                    to: mv.destination,
                    captured,
                },
                None => MoveEvent::Move {
                    piece: mv.moving,
                    from: mv.source,
                    to: mv.destination,
                },
            },
            MoveKind::CaptureEnPassant => match en_passant_victim(mv.destination, side) {
                Some(victim) => MoveEvent::EnPassant {
                    piece: mv.moving,
                    from: mv.source,
                    to: mv.destination,
                    victim,
                },
                None => MoveEvent::Move {
                    piece: mv.moving,
                    from: mv.source,
                    to: mv.destination,
                },
            },
            MoveKind::CastleKingside | MoveKind::CastleQueenside => {
                match castling_rook_squares(mv.source, mv.kind) {
                    Some((rook_from, rook_to)) => MoveEvent::Castle {
                        king_from: mv.source,
                        king_to: mv.destination,
                        rook_from,
                        rook_to,
                    },
                    None => MoveEvent::Move {
                        piece: mv.moving,
                        from: mv.source,
                        to: mv.destination,
                    },
                }
            }
            MoveKind::Resign => MoveEvent::Resign,
            MoveKind::Stalemate => MoveEvent::Stalemate,
        }
    }
}

/// Receives confirmed moves for the side that made them.
pub trait MoveObserver {
    fn on_move(&mut self, side: Color, event: MoveEvent);
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl MoveObserver for NullObserver {
    fn on_move(&mut self, _side: Color, _event: MoveEvent) {}
}

impl MoveObserver for Vec<(Color, MoveEvent)> {
    fn on_move(&mut self, side: Color, event: MoveEvent) {
        self.push((side, event));
    }
}

/// Square of the pawn removed by an en passant capture landing on
/// `destination`, or `None` if that square is off the board.
pub(crate) fn en_passant_victim(destination: Square, mover: Color) -> Option<Square> {
    destination.offset(-mover.pawn_step())
}

/// Rook source and destination for a castling move whose king starts on
/// `king_from`. Kingside: +3 to +1; queenside: -4 to -1.
pub(crate) fn castling_rook_squares(king_from: Square, kind: MoveKind) -> Option<(Square, Square)> {
    let (from, to) = match kind {
        MoveKind::CastleQueenside => (-4, -1),
        _ => (3, 1),
    };
    Some((king_from.offset(from)?, king_from.offset(to)?))
}

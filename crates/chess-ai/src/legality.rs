//! Check detection by reply simulation.
//!
//! The generator is pseudo-legal, so legality is decided one ply ahead: a
//! move is playable when the opponent's reply generation does not find a
//! capture of the mover's king.

use chess_ai_core::{Move, PieceKind};

use crate::movegen::{GenerationError, MoveListGenerator};
use crate::Board;

/// Status of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckStatus {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl CheckStatus {
    /// Returns true when the game cannot continue.
    pub fn is_game_over(self) -> bool {
        matches!(self, CheckStatus::Checkmate | CheckStatus::Stalemate)
    }
}

/// Computes the check status of the side to move.
pub trait CheckDetector {
    fn check_status(&self, board: &Board) -> CheckStatus;
}

/// Tries every pseudo-legal move and looks for a reply that captures the
/// king.
///
/// Any losing move by a piece other than the king marks the position as
/// `Check`, which also catches pinned pieces. With no escape at all the
/// result is `Checkmate` when the king is attacked where it stands and
/// `Stalemate` otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReplySimulation;

impl CheckDetector for ReplySimulation {
    fn check_status(&self, board: &Board) -> CheckStatus {
        let mut scratch = board.clone();
        let mut generator = MoveListGenerator::new();
        match generator.compute_legal_moves(&mut scratch, true) {
            Ok(_) => {}
            Err(GenerationError::NoMoves) => return no_escape_status(&scratch),
            // the opponent's king hangs; nothing constrains the side to move
            Err(GenerationError::IllegalPosition) => return CheckStatus::Normal,
        }

        let mut status = CheckStatus::Normal;
        let mut escape = false;
        let mut replies = MoveListGenerator::new();
        for &mv in generator.moves() {
            if survives(&scratch, mv, &mut replies) {
                escape = true;
            } else if mv.moving.kind() != PieceKind::King {
                status = CheckStatus::Check;
            }
        }

        let status = if escape {
            status
        } else {
            no_escape_status(&scratch)
        };
        tracing::trace!(?status, side = %board.side_to_move(), "check status");
        status
    }
}

impl Board {
    /// Check status of the side to move, by reply simulation.
    pub fn check_status(&self) -> CheckStatus {
        ReplySimulation.check_status(self)
    }

    /// Returns true if the side to move could have its king captured were
    /// it the opponent's turn.
    pub fn in_check(&self) -> bool {
        let mut probe = self.clone();
        probe.set_side_to_move(self.side_to_move().opposite());
        let mut generator = MoveListGenerator::new();
        matches!(
            generator.compute_legal_moves(&mut probe, true),
            Err(GenerationError::IllegalPosition)
        )
    }
}

fn no_escape_status(board: &Board) -> CheckStatus {
    if board.in_check() {
        CheckStatus::Checkmate
    } else {
        CheckStatus::Stalemate
    }
}

/// Applies `mv` to a copy of `board` and reports whether the king survives
/// the opponent's replies. A reply list that is merely empty counts as
/// survival.
fn survives(board: &Board, mv: Move, replies: &mut MoveListGenerator) -> bool {
    let mut next = board.clone();
    next.apply_move(mv);
    !matches!(
        replies.compute_legal_moves(&mut next, true),
        Err(GenerationError::IllegalPosition)
    )
}

/// Pseudo-legal moves of the side to move that do not leave its king
/// capturable.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut scratch = board.clone();
    let mut generator = MoveListGenerator::new();
    if generator.compute_legal_moves(&mut scratch, true).is_err() {
        return Vec::new();
    }

    let mut replies = MoveListGenerator::new();
    generator
        .moves()
        .iter()
        .copied()
        .filter(|&mv| survives(&scratch, mv, &mut replies))
        .collect()
}

//! Per-square jump lists and sliding rays.
//!
//! The tables are built once on first use and shared by every generator.

use chess_ai_core::Square;
use std::sync::OnceLock;

/// (row delta, column delta) pairs. Row 0 is the eighth rank.
const KNIGHT_STEPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Up-left, up-right, down-left, down-right.
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// West, east, north, south.
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Squares reachable in one move, ignoring occupancy.
pub struct MoveTables {
    knight: Vec<Vec<Square>>,
    king: Vec<Vec<Square>>,
    bishop: Vec<Vec<Vec<Square>>>,
    rook: Vec<Vec<Vec<Square>>>,
}

static MOVE_TABLES: OnceLock<MoveTables> = OnceLock::new();

/// Gets the global move tables, initializing them if necessary.
pub fn move_tables() -> &'static MoveTables {
    MOVE_TABLES.get_or_init(MoveTables::new)
}

fn step(square: Square, (dr, dc): (i8, i8)) -> Option<Square> {
    let row = square.row() as i8 + dr;
    let column = square.column() as i8 + dc;
    if (0..8).contains(&row) && (0..8).contains(&column) {
        Square::from_row_column(row as u8, column as u8)
    } else {
        None
    }
}

fn jumps(square: Square, steps: &[(i8, i8)]) -> Vec<Square> {
    steps.iter().filter_map(|&d| step(square, d)).collect()
}

fn rays(square: Square, directions: &[(i8, i8)]) -> Vec<Vec<Square>> {
    directions
        .iter()
        .map(|&d| {
            let mut ray = Vec::new();
            let mut current = square;
            while let Some(next) = step(current, d) {
                ray.push(next);
                current = next;
            }
            ray
        })
        .filter(|ray| !ray.is_empty())
        .collect()
}

impl MoveTables {
    fn new() -> Self {
        let squares: Vec<Square> = (0..64u8).filter_map(Square::from_index).collect();
        let tables = MoveTables {
            knight: squares.iter().map(|&sq| jumps(sq, &KNIGHT_STEPS)).collect(),
            king: squares.iter().map(|&sq| jumps(sq, &KING_STEPS)).collect(),
            bishop: squares.iter().map(|&sq| rays(sq, &BISHOP_DIRECTIONS)).collect(),
            rook: squares.iter().map(|&sq| rays(sq, &ROOK_DIRECTIONS)).collect(),
        };
        tracing::debug!("move tables initialised");
        tables
    }

    #[inline]
    pub fn knight_jumps(&self, square: Square) -> &[Square] {
        &self.knight[square.index() as usize]
    }

    #[inline]
    pub fn king_jumps(&self, square: Square) -> &[Square] {
        &self.king[square.index() as usize]
    }

    /// Diagonal rays from `square`, nearest square first.
    #[inline]
    pub fn bishop_rays(&self, square: Square) -> &[Vec<Square>] {
        &self.bishop[square.index() as usize]
    }

    /// Orthogonal rays from `square`, nearest square first.
    #[inline]
    pub fn rook_rays(&self, square: Square) -> &[Vec<Square>] {
        &self.rook[square.index() as usize]
    }
}

use serde::{Deserialize, Serialize};

use super::{Board, Piece, COLS, ROWS};

/// How the destruction scan bounds-checks neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeighborBounds {
    /// The right neighbour is only inspected while `col + 1 < ROWS` and the
    /// upper neighbour while `row + 1 < COLS`. On a 7x6 board a piece in
    /// column 5 never sees its right neighbour, and a top-row piece reads one
    /// cell above the board, which counts as empty.
    #[default]
    Literal,
    /// Each neighbour is checked against its own axis.
    Symmetric,
}

/// What a destruction pass removed, in scan order (column, then row).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestructionReport {
    pub removed: Vec<(usize, usize, Piece)>,
}

impl DestructionReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.removed.len()
    }
}

/// Number of orthogonal opposing strong counters a piece needs to be destroyed.
const SURROUND_THRESHOLD: usize = 2;

/// Remove every piece surrounded by two or more opposing strong counters, then
/// let the remaining pieces fall.
///
/// All removal decisions are taken against the board as it was on entry.
pub fn destroy_and_settle(board: &mut Board, bounds: NeighborBounds) -> DestructionReport {
    let marked = mark(board, bounds);

    for &(col, row, _) in &marked {
        board.set(col, row, None);
    }
    board.settle();

    DestructionReport { removed: marked }
}

/// Pieces that a destruction pass would remove, without touching the board.
pub fn mark(board: &Board, bounds: NeighborBounds) -> Vec<(usize, usize, Piece)> {
    let mut marked = Vec::new();
    for col in 0..COLS {
        for row in 0..ROWS {
            let Some(piece) = board.get(col, row) else {
                continue;
            };
            if surrounding_attackers(board, col, row, &piece, bounds) >= SURROUND_THRESHOLD {
                marked.push((col, row, piece));
            }
        }
    }
    marked
}

fn surrounding_attackers(
    board: &Board,
    col: usize,
    row: usize,
    piece: &Piece,
    bounds: NeighborBounds,
) -> usize {
    let (right_limit, up_limit) = match bounds {
        NeighborBounds::Literal => (ROWS, COLS),
        NeighborBounds::Symmetric => (COLS, ROWS),
    };

    let mut neighbours = Vec::with_capacity(4);
    if col > 0 {
        neighbours.push((col - 1, row));
    }
    if col + 1 < right_limit {
        neighbours.push((col + 1, row));
    }
    if row + 1 < up_limit {
        neighbours.push((col, row + 1));
    }
    if row > 0 {
        neighbours.push((col, row - 1));
    }

    neighbours
        .into_iter()
        .filter_map(|(c, r)| board.piece_at(c, r))
        .filter(|other| piece.is_threatened_by(other))
        .count()
}

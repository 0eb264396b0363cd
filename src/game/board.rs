use super::{ElementType, Piece, Player};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// The board, indexed `[column][row]` with row 0 at the bottom.
///
/// Occupied cells in a column always form a contiguous run starting at row 0;
/// only [`Board::drop_piece`] and the destruction pass mutate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; ROWS]; COLS],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("column is out of bounds")]
    OutOfBounds,
    #[error("column is full")]
    ColumnFull,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[None; ROWS]; COLS],
        }
    }

    /// Get the piece at a specific position.
    /// Row 0 is the bottom. Panics on coordinates outside the board.
    pub fn get(&self, col: usize, row: usize) -> Option<Piece> {
        self.cells[col][row]
    }

    /// Like [`Board::get`], but coordinates outside the board read as empty.
    pub fn piece_at(&self, col: usize, row: usize) -> Option<Piece> {
        self.cells.get(col).and_then(|c| c.get(row)).copied().flatten()
    }

    pub(crate) fn set(&mut self, col: usize, row: usize, piece: Option<Piece>) {
        self.cells[col][row] = piece;
    }

    pub fn is_column_in_bounds(&self, col: usize) -> bool {
        col < COLS
    }

    /// A column accepts a piece when it exists and its top cell is empty.
    pub fn is_column_open(&self, col: usize) -> bool {
        self.is_column_in_bounds(col) && self.cells[col][ROWS - 1].is_none()
    }

    /// True when the top cell of the column is occupied.
    /// Out-of-range columns are reported as not occupied.
    pub fn top_occupied(&self, col: usize) -> bool {
        self.is_column_in_bounds(col) && self.cells[col][ROWS - 1].is_some()
    }

    /// Number of pieces stacked in a column
    pub fn column_height(&self, col: usize) -> usize {
        self.cells[col].iter().take_while(|c| c.is_some()).count()
    }

    /// Columns that can still take a piece, in ascending order
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| self.is_column_open(col)).collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.top_occupied(col))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|c| c.is_none())
    }

    /// Check that no column has an empty cell below an occupied one
    pub fn is_settled(&self) -> bool {
        self.cells
            .iter()
            .all(|column| column.iter().skip_while(|c| c.is_some()).all(|c| c.is_none()))
    }

    /// Drop a piece in a column, returns the row where it landed.
    ///
    /// This is the only placement path, used for the live board and for
    /// simulated copies alike. A rejected drop leaves the board untouched.
    pub fn drop_piece(&mut self, col: usize, piece: Piece) -> Result<usize, PlacementError> {
        if !self.is_column_in_bounds(col) {
            return Err(PlacementError::OutOfBounds);
        }

        if self.top_occupied(col) {
            return Err(PlacementError::ColumnFull);
        }

        // Find the lowest empty row in this column
        for row in 0..ROWS {
            if self.cells[col][row].is_none() {
                self.cells[col][row] = Some(piece);
                return Ok(row);
            }
        }

        unreachable!("Column should not be full if top_occupied returned false");
    }

    /// Compact each column downward, keeping the relative order of its pieces.
    pub(crate) fn settle(&mut self) {
        for column in self.cells.iter_mut() {
            let mut empty_row = 0;
            for row in 0..ROWS {
                if let Some(piece) = column[row] {
                    if empty_row != row {
                        column[empty_row] = Some(piece);
                        column[row] = None;
                    }
                    empty_row += 1;
                }
            }
        }
        debug_assert!(self.is_settled(), "gravity left a gap in a column");
    }

    /// Render the board as text, top row first.
    ///
    /// Each cell is `.` or an element letter, uppercase for player 1 and
    /// lowercase for player 2.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((COLS + 1) * ROWS);
        for row in (0..ROWS).rev() {
            for col in 0..COLS {
                out.push(match self.cells[col][row] {
                    None => '.',
                    Some(p) if p.owner == Player::One => p.element.symbol(),
                    Some(p) => p.element.symbol().to_ascii_lowercase(),
                });
            }
            out.push('\n');
        }
        out
    }

    /// Build a board from rows written the way [`Board::render`] prints them.
    /// Returns `None` on a malformed picture.
    pub fn from_rows(rows: &[&str]) -> Option<Board> {
        if rows.len() != ROWS {
            return None;
        }
        let mut board = Board::new();
        for (i, line) in rows.iter().enumerate() {
            let row = ROWS - 1 - i;
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != COLS {
                return None;
            }
            for (col, ch) in chars.into_iter().enumerate() {
                let owner = if ch.is_ascii_uppercase() {
                    Player::One
                } else {
                    Player::Two
                };
                let element = match ch.to_ascii_uppercase() {
                    '.' => continue,
                    'F' => ElementType::Fire,
                    'W' => ElementType::Water,
                    'E' => ElementType::Earth,
                    'A' => ElementType::Air,
                    _ => return None,
                };
                board.cells[col][row] = Some(Piece::new(element, owner));
            }
        }
        Some(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

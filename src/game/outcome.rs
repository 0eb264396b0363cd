use super::{Board, Player, COLS, ROWS};

/// Number of matching pieces needed for a win.
pub const LINE_LENGTH: usize = 4;

/// A winning run of four: the first cell and the stepping direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinLine {
    pub start_col: usize,
    pub start_row: usize,
    pub delta_col: isize,
    pub delta_row: isize,
}

impl WinLine {
    /// The four `(col, row)` coordinates of the line, in stepping order.
    pub fn cells(&self) -> [(usize, usize); LINE_LENGTH] {
        std::array::from_fn(|i| {
            let i = i as isize;
            (
                (self.start_col as isize + i * self.delta_col) as usize,
                (self.start_row as isize + i * self.delta_row) as usize,
            )
        })
    }
}

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeResult {
    Continue,
    Win(WinLine),
    Draw,
}

/// Scan order: horizontal, vertical, diagonal up-right from the start cell,
/// diagonal down-right from the start cell.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Evaluate the board: the first winning line in scan order, a draw when
/// every column is topped out, otherwise `Continue`.
///
/// Within a direction, start cells are visited column by column and, inside a
/// column, from the bottom row up. Pure function of the board contents.
pub fn evaluate(board: &Board) -> OutcomeResult {
    for (delta_col, delta_row) in DIRECTIONS {
        let span = LINE_LENGTH as isize - 1;
        let col_end = COLS as isize - span * delta_col;
        let (row_start, row_end) = if delta_row < 0 {
            (span, ROWS as isize)
        } else {
            (0, ROWS as isize - span * delta_row)
        };

        for col in 0..col_end {
            for row in row_start..row_end {
                let line = WinLine {
                    start_col: col as usize,
                    start_row: row as usize,
                    delta_col,
                    delta_row,
                };
                if is_match(board, &line) {
                    return OutcomeResult::Win(line);
                }
            }
        }
    }

    if board.is_full() {
        OutcomeResult::Draw
    } else {
        OutcomeResult::Continue
    }
}

/// Owner of a winning line, read from its start cell.
pub fn winner(board: &Board, line: &WinLine) -> Option<Player> {
    board.get(line.start_col, line.start_row).map(|p| p.owner)
}

/// Four cells match when all are occupied by pieces of one element and one owner.
fn is_match(board: &Board, line: &WinLine) -> bool {
    let [first, rest @ ..] = line.cells();
    let Some(head) = board.get(first.0, first.1) else {
        return false;
    };
    rest.iter().all(|&(col, row)| board.get(col, row) == Some(head))
}

//! The move engine: a 3×3 grid of [`Cell`]s and its line check.
//!
//! The same [`Grid::place`] resolves a sub-board (the value placed is the player's mark) and the
//! meta-board (the value placed is the outcome of the sub-board that just got decided).

use std::ops::Index;

use tracing::trace;

use crate::{cell::Cell, error::EngineError};

/// Number of rows, columns, sub-board rows and sub-board columns.
pub const SIZE: usize = 3;

/// A 3×3 grid of cells, indexed by `(row, col)`.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, Default)]
pub struct Grid {
    cells: [[Cell; SIZE]; SIZE],
}

impl Grid {
    /// An all-`Empty` grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from its rows. No outcome is computed.
    pub fn from_rows(cells: [[Cell; SIZE]; SIZE]) -> Self {
        Self { cells }
    }

    /// Rows of the grid.
    pub fn rows(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.cells
    }

    /// Content at `(row, col)`, `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Coordinates of every `Empty` cell, row-major.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .filter(|&(row, col)| self.cells[row][col] == Cell::Empty)
    }

    /// True if no cell is `Empty`.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|c| *c != Cell::Empty)
    }

    /// Place `mark` at `(row, col)` and return the resulting outcome of the grid.
    ///
    /// Only the lines going through `(row, col)` are checked: its row, its column, and the
    /// diagonals it lies on. A line only counts when `mark` is `X` or `O`, so three `Invalid`
    /// cells never make a winner.
    ///
    /// Returns `mark` if it completed a line, `Empty` if the grid still has room, `Invalid` if
    /// it is full without a line.
    ///
    /// # Errors
    /// The cell must be `Empty`, the coordinates in range and `mark` not `Empty`. The grid is
    /// left untouched on error.
    pub fn place(&mut self, row: usize, col: usize, mark: Cell) -> Result<Cell, EngineError> {
        let current = self
            .get(row, col)
            .ok_or(EngineError::OutOfRange { row, col })?;
        if mark == Cell::Empty {
            return Err(EngineError::EmptyMark);
        }
        if current != Cell::Empty {
            return Err(EngineError::Occupied { row, col, current });
        }

        self.cells[row][col] = mark;

        if mark.is_player() && self.completes_line(row, col, mark) {
            trace!(row, col, ?mark, "line completed");
            return Ok(mark);
        }
        Ok(self.open_or_drawn())
    }

    /// Outcome of the grid recomputed from scratch: the player owning a full line, else `Empty`
    /// while a cell is free, else `Invalid`.
    ///
    /// [`Grid::place`] only looks at the lines through the last move; this looks at all eight
    /// and is what the board invariant is checked against.
    pub fn outcome(&self) -> Cell {
        for mark in [Cell::X, Cell::O] {
            let full = |line: [(usize, usize); SIZE]| line.iter().all(|&(r, c)| self.cells[r][c] == mark);
            if LINES.iter().any(|line| full(*line)) {
                return mark;
            }
        }
        self.open_or_drawn()
    }

    fn completes_line(&self, row: usize, col: usize, mark: Cell) -> bool {
        let row_done = self.cells[row].iter().all(|c| *c == mark);
        let col_done = (0..SIZE).all(|r| self.cells[r][col] == mark);
        let diag_done = row == col && (0..SIZE).all(|i| self.cells[i][i] == mark);
        let anti_done = row + col == SIZE - 1 && (0..SIZE).all(|i| self.cells[i][SIZE - 1 - i] == mark);
        row_done || col_done || diag_done || anti_done
    }

    fn open_or_drawn(&self) -> Cell {
        if self.is_full() {
            Cell::Invalid
        } else {
            Cell::Empty
        }
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Cell;

    fn index(&self, (row, col): (usize, usize)) -> &Cell {
        &self.cells[row][col]
    }
}

const LINES: [[(usize, usize); SIZE]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

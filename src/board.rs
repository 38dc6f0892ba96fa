//! The full board: nine sub-boards and the grid of their outcomes.

use std::fmt::Display;

use tracing::debug;

use crate::{
    cell::Cell,
    error::EngineError,
    grid::{Grid, SIZE},
    moves::Move,
};

/// Nine sub-boards arranged in a 3×3 grid, plus the meta-board of their outcomes.
///
/// `outcomes[(i, j)]` is kept equal to the outcome of sub-board `(i, j)`: it is written in the
/// same call that places the mark, never lazily.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Board {
    sub_boards: [[Grid; SIZE]; SIZE],
    outcomes: Grid,
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// The sub-board at `(row, col)`.
    pub fn sub_board(&self, row: usize, col: usize) -> &Grid {
        &self.sub_boards[row][col]
    }

    /// The meta-board: one outcome per sub-board.
    pub fn outcomes(&self) -> &Grid {
        &self.outcomes
    }

    /// Content of the square addressed by `mv`.
    pub fn cell(&self, mv: Move) -> Cell {
        self.sub_boards[mv.board.0][mv.board.1][mv.cell]
    }

    /// Play `mark` at `mv` and return the outcome of the whole game.
    ///
    /// The mark is placed in its sub-board first. When that decides the sub-board (won or full),
    /// its outcome is placed in the meta-board with the very same line check, and the meta-board
    /// outcome is returned. While the sub-board stays open, `Empty` is returned.
    ///
    /// # Errors
    /// `mark` must be `X` or `O`, both coordinate pairs in range, the sub-board still open and the
    /// square empty. On error nothing is modified.
    pub fn play(&mut self, mv: Move, mark: Cell) -> Result<Cell, EngineError> {
        if !mark.is_player() {
            return Err(EngineError::EmptyMark);
        }
        let (sub_row, sub_col) = mv.board;
        let decided = self
            .outcomes
            .get(sub_row, sub_col)
            .ok_or(EngineError::OutOfRange {
                row: sub_row,
                col: sub_col,
            })?;
        if decided != Cell::Empty {
            return Err(EngineError::Occupied {
                row: sub_row,
                col: sub_col,
                current: decided,
            });
        }

        let (row, col) = mv.cell;
        let sub_outcome = self.sub_boards[sub_row][sub_col].place(row, col, mark)?;
        if sub_outcome == Cell::Empty {
            return Ok(Cell::Empty);
        }

        debug!(sub_row, sub_col, outcome = ?sub_outcome, "sub-board decided");
        self.outcomes.place(sub_row, sub_col, sub_outcome)
    }

    /// Every legal move after `last` was played.
    ///
    /// The square of `last` selects the sub-board to play in. If that sub-board is already
    /// decided, or at the start of the game, any empty square of any open sub-board is legal.
    /// Moves are returned row-major, without duplicates.
    pub fn legal_moves(&self, last: Option<Move>) -> Vec<Move> {
        match last.map(|m| m.target()) {
            Some((row, col)) if self.outcomes.get(row, col) == Some(Cell::Empty) => {
                self.moves_in(row, col).collect()
            }
            _ => self
                .outcomes
                .empty_cells()
                .flat_map(|(row, col)| self.moves_in(row, col))
                .collect(),
        }
    }

    /// True when every entry of the meta-board equals the recomputed outcome of its sub-board.
    pub fn is_consistent(&self) -> bool {
        (0..SIZE).all(|row| {
            (0..SIZE).all(|col| self.outcomes[(row, col)] == self.sub_boards[row][col].outcome())
        })
    }

    fn moves_in(&self, sub_row: usize, sub_col: usize) -> impl Iterator<Item = Move> + '_ {
        self.sub_boards[sub_row][sub_col]
            .empty_cells()
            .map(move |(row, col)| Move {
                board: (sub_row, sub_col),
                cell: (row, col),
            })
    }
}

/// Plain text picture of the 81 squares, sub-boards separated by `|` and `-`.
impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for sub_row in 0..SIZE {
            if sub_row > 0 {
                writeln!(f, "------+-------+------")?;
            }
            for row in 0..SIZE {
                let line = (0..SIZE)
                    .map(|sub_col| {
                        self.sub_boards[sub_row][sub_col].rows()[row]
                            .iter()
                            .map(Cell::to_string)
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect::<Vec<_>>()
                    .join(" | ");
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

//! Move addressing: which sub-board, and which square inside it.

use std::{fmt::Display, str::FromStr};

use anyhow::{anyhow, bail, Context};

use crate::grid::SIZE;

/// One of the 81 squares of the board.
///
/// `board` selects the sub-board, `cell` the square inside it. Both are `(row, col)` pairs in
/// `0..3`: a `Move` can only be built through [`Move::new`], [`Move::all`] or parsing, which
/// all check the range.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct Move {
    pub(crate) board: (usize, usize),
    pub(crate) cell: (usize, usize),
}

impl Move {
    /// Create a move, `None` if any coordinate is out of range.
    pub fn new(sub_row: usize, sub_col: usize, row: usize, col: usize) -> Option<Move> {
        if [sub_row, sub_col, row, col].iter().all(|&v| v < SIZE) {
            Some(Move {
                board: (sub_row, sub_col),
                cell: (row, col),
            })
        } else {
            None
        }
    }

    /// Sub-board `(row, col)`.
    pub fn board(&self) -> (usize, usize) {
        self.board
    }

    /// Square `(row, col)` inside the sub-board.
    pub fn cell(&self) -> (usize, usize) {
        self.cell
    }

    /// The sub-board the opponent is sent to by this move.
    pub fn target(&self) -> (usize, usize) {
        self.cell
    }

    /// All 81 moves, row-major over `(sub_row, sub_col, row, col)`.
    pub fn all() -> impl Iterator<Item = Move> {
        let pairs = || (0..SIZE).flat_map(|row| (0..SIZE).map(move |col| (row, col)));
        pairs().flat_map(move |board| pairs().map(move |cell| Move { board, cell }))
    }
}

/// Space separated `sub_row sub_col row col`, e.g. `0 0 1 1`.
impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.board.0, self.board.1, self.cell.0, self.cell.1
        )
    }
}

/// Accepts four digits separated by whitespace and/or commas.
impl FromStr for Move {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<usize>()
                    .with_context(|| format!("'{part}' is not a coordinate"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let [sub_row, sub_col, row, col] = values[..] else {
            bail!("expected 4 coordinates, got {} in '{s}'", values.len());
        };
        Move::new(sub_row, sub_col, row, col)
            .ok_or_else(|| anyhow!("coordinates must be in 0..{SIZE}, got '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_moves_are_distinct() {
        let all: std::collections::HashSet<_> = Move::all().collect();
        assert_eq!(all.len(), 81);
        assert_eq!(Move::all().next(), Move::new(0, 0, 0, 0));
        assert_eq!(Move::all().last(), Move::new(2, 2, 2, 2));
        // squares first, then sub-boards
        assert_eq!(Move::all().nth(1), Move::new(0, 0, 0, 1));
        assert_eq!(Move::all().nth(9), Move::new(0, 1, 0, 0));
        assert_eq!(Move::all().nth(27), Move::new(1, 0, 0, 0));
    }

    #[test]
    fn parse_text() {
        let m: Move = "0 2 1 1".parse().unwrap();
        assert_eq!(m, Move::new(0, 2, 1, 1).unwrap());
        assert_eq!("2,1, 0,2\n".parse::<Move>().unwrap(), Move::new(2, 1, 0, 2).unwrap());
        assert_eq!(m.to_string(), "0 2 1 1");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("0 0 1".parse::<Move>().is_err());
        assert!("0 0 1 3".parse::<Move>().is_err());
        assert!("a b c d".parse::<Move>().is_err());
        assert!("".parse::<Move>().is_err());
    }

    #[test]
    fn target_is_the_cell() {
        let m = Move::new(0, 1, 2, 1).unwrap();
        assert_eq!((m.board(), m.cell()), ((0, 1), (2, 1)));
        assert_eq!(m.target(), (2, 1));
        assert_eq!(Move::new(3, 0, 0, 0), None);
    }
}

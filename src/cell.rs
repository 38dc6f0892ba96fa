//! The four-valued cell model shared by squares and board outcomes.

use std::fmt::Display;

/// Content of a square, and outcome of a 3×3 grid.
///
/// The same type describes both scales of the game:
/// - on a sub-board, a square is `Empty`, `X` or `O`;
/// - as an outcome, `Empty` means "still open", `X`/`O` means "won by that
///   player" and `Invalid` means "full without a line" (drawn).
///
/// `Invalid` is never a legal move target.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Default)]
pub enum Cell {
    /// Drawn grid. Only ever used as an outcome.
    Invalid,
    /// Empty square, or a grid that is still open.
    #[default]
    Empty,
    /// Player O.
    O,
    /// Player X.
    X,
}

impl Cell {
    /// True for `X` and `O`.
    pub fn is_player(self) -> bool {
        matches!(self, Cell::X | Cell::O)
    }

    /// The other player mark. `Empty` and `Invalid` have no opponent and map to themselves.
    pub fn opponent(self) -> Cell {
        match self {
            Cell::X => Cell::O,
            Cell::O => Cell::X,
            other => other,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Cell::Invalid => '#',
            Cell::Empty => '.',
            Cell::O => 'O',
            Cell::X => 'X',
        };
        write!(f, "{c}")
    }
}

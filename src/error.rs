//! Contract violations reported by the engine.
//!
//! None of these can happen during a game between conforming players: they mean the caller or a
//! [`Strategy`](crate::player::Strategy) broke the rules, so they are reported instead of being
//! corrected.

use thiserror::Error;

use crate::{cell::Cell, moves::Move};

/// Errors returned by the move engine, the game and the tournament.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EngineError {
    /// A mark was placed on a square that is not empty.
    #[error("square ({row}, {col}) is already taken by {current}")]
    Occupied {
        /// Row of the square, or of the sub-board.
        row: usize,
        /// Column of the square, or of the sub-board.
        col: usize,
        /// What is already there.
        current: Cell,
    },
    /// A row or column is not in `0..3`.
    #[error("coordinate ({row}, {col}) is outside the 3x3 grid")]
    OutOfRange {
        /// Offending row.
        row: usize,
        /// Offending column.
        col: usize,
    },
    /// `Cell::Empty` was used as the mark to place.
    #[error("cannot place an empty mark")]
    EmptyMark,
    /// A strategy returned a move that was not in the legal set.
    #[error("{mark} chose {chosen}, which is not a legal move")]
    IllegalChoice {
        /// Mark of the offending player.
        mark: Cell,
        /// The move it answered with.
        chosen: Move,
    },
    /// The game already reached a terminal state.
    #[error("game is already over")]
    GameOver,
    /// Round-robin with fewer than two players.
    #[error("a tournament needs at least two players, got {0}")]
    NotEnoughPlayers(usize),
}

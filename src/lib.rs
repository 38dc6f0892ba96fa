//! # Super Tic Tac Toe
//!
//! Nine tic-tac-toe boards arranged in a 3×3 grid. The square a player picks inside a sub-board
//! tells the opponent which sub-board to play in next; winning three sub-boards in a line wins
//! the game.
//!
//! It provides:
//! - The rules engine: [`Board`](crate::board::Board) and its legal moves, and the
//!   [`Grid`](crate::grid::Grid) line check shared by sub-boards and the meta-board
//! - Turn-by-turn game driving via [`Game`](crate::game::Game)
//! - Pluggable players through the [`Strategy`](crate::player::Strategy) trait, with random,
//!   scripted and stream-driven strategies
//! - Elo ratings updated after every game, and round-robin [`Tournament`](crate::tournament::Tournament)s
//!
//! # Rules
//!
//! - X moves first.
//! - A move in square `(r, c)` of any sub-board sends the opponent to sub-board `(r, c)`.
//! - If that sub-board is already won or full, the opponent may play in any open sub-board.
//! - A decided sub-board takes no more marks. A full sub-board without a line counts for nobody.
//! - The game is won by a line of won sub-boards, and drawn once every sub-board is decided
//!   without such a line.
//!
//! # Usage Example
//!
//! ```rust
//! use super_tic_tac_toe::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     // Reproducible random bots: "RandoBot 0", "RandoBot 1", ...
//!     let mut roster = Roster::with_seed(42);
//!     let mut tournament = Tournament::new(roster.random_bots(3));
//!
//!     // 3 players, both colors: 6 games
//!     let results = tournament.play()?;
//!     assert_eq!(results.len(), 6);
//!
//!     for (player, record) in tournament.standings() {
//!         println!("{}: {:.1} ({record})", player.name(), player.rating);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! A game can also be driven one move at a time, to show the board in between:
//!
//! ```rust
//! use super_tic_tac_toe::prelude::*;
//!
//! let mut x = Player::new("alice", RandomStrategy::seeded(1));
//! let mut o = Player::new("bob", RandomStrategy::seeded(2));
//! let mut game = Game::new(&mut x, &mut o);
//! while game.play_one_turn()? == GameState::InProgress {
//!     println!("{}", game.board());
//! }
//! println!("{}", game.state());
//! # Ok::<(), anyhow::Error>(())
//! ```
#![warn(missing_docs)]

pub use anyhow;
pub mod board;
pub mod cell;
pub mod configuration;
pub mod error;
pub mod game;
pub mod grid;
pub mod logger;
pub mod moves;
pub mod player;
pub mod rating;
pub mod tournament;

/// Commonly used types and traits for quick access.
///
/// ```rust
/// use super_tic_tac_toe::prelude::*;
/// ```
pub mod prelude {
    pub use crate::board::Board;
    pub use crate::cell::Cell;
    pub use crate::configuration::Configuration;
    pub use crate::error::EngineError;
    pub use crate::game::{Game, GameState};
    pub use crate::moves::Move;
    pub use crate::player::{Player, RandomStrategy, Roster, ScriptedStrategy, Strategy, StreamStrategy};
    pub use crate::tournament::{MatchRecord, Record, Tournament};
}

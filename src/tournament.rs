//! Round-robin tournaments between rated players.
//!
//! Every player meets every other player twice, once with each mark. Games run one after the
//! other and ratings carry over from one game to the next, so the final ratings depend on the
//! order of the games: the roster order decides it.

use std::fmt::Display;

use anyhow::Context;
use tracing::{info, instrument};

use crate::{
    cell::Cell,
    error::EngineError,
    game::{Game, GameState},
    player::Player,
};

/// Win/draw/loss tally of a player.
#[derive(PartialEq, Eq, PartialOrd, Ord, Default, Debug, Clone, Copy)]
pub struct Record {
    /// Number of wins.
    pub num_win: u32,
    /// Number of draws.
    pub num_draw: u32,
    /// Number of losses.
    pub num_lose: u32,
}

impl Record {
    /// Games played.
    pub fn played(&self) -> u32 {
        self.num_win + self.num_draw + self.num_lose
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "win: {}, draw: {}, lose: {}",
            self.num_win, self.num_draw, self.num_lose
        )
    }
}

/// Summary of one finished game.
#[derive(PartialEq, Debug, Clone)]
pub struct MatchRecord {
    /// Name of the player holding X.
    pub x: String,
    /// Name of the player holding O.
    pub o: String,
    /// Terminal state of the game.
    pub state: GameState,
    /// Number of moves played.
    pub moves: usize,
    /// Ratings of X and O once the game was over.
    pub ratings: (f64, f64),
}

impl Display for MatchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} VS {}]: {} in {} moves ({:.1} / {:.1})",
            self.x, self.o, self.state, self.moves, self.ratings.0, self.ratings.1
        )
    }
}

/// A round-robin tournament over an ordered roster.
#[derive(Debug)]
pub struct Tournament {
    players: Vec<Player>,
    records: Vec<Record>,
}

impl Tournament {
    /// A tournament between `players`, in this order.
    pub fn new(players: Vec<Player>) -> Self {
        let records = vec![Record::default(); players.len()];
        Self { players, records }
    }

    /// Every ordered pair `(x, o)` of distinct roster indices, in roster order.
    pub fn pairings(&self) -> Vec<(usize, usize)> {
        let n = self.players.len();
        (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .filter(|(i, j)| i != j)
            .collect()
    }

    /// Play every pairing to the end.
    ///
    /// `n * (n - 1)` games are played for `n` players, each with a fresh board.
    ///
    /// # Error
    /// [`EngineError::NotEnoughPlayers`] with fewer than two players, or the first error of a
    /// game. Games played before the error keep their effect on ratings.
    #[instrument(skip(self), fields(players = self.players.len()))]
    pub fn play(&mut self) -> anyhow::Result<Vec<MatchRecord>> {
        if self.players.len() < 2 {
            return Err(EngineError::NotEnoughPlayers(self.players.len()).into());
        }

        let pairings = self.pairings();
        let mut results = Vec::with_capacity(pairings.len());
        for (i, j) in pairings {
            let record = self
                .play_pairing(i, j)
                .with_context(|| format!("game #{}", results.len() + 1))?;
            info!("{record}");
            results.push(record);
        }
        Ok(results)
    }

    fn play_pairing(&mut self, i: usize, j: usize) -> anyhow::Result<MatchRecord> {
        let (x, o) = pair_mut(&mut self.players, i, j);
        let mut game = Game::new(x, o);
        let state = game.play()?;
        let moves = game.history().len();
        drop(game);

        let (x, o) = (&self.players[i], &self.players[j]);
        let record = MatchRecord {
            x: x.name().to_owned(),
            o: o.name().to_owned(),
            state,
            moves,
            ratings: (x.rating, o.rating),
        };

        match state.winner() {
            Some(Cell::X) => {
                self.records[i].num_win += 1;
                self.records[j].num_lose += 1;
            }
            Some(_) => {
                self.records[i].num_lose += 1;
                self.records[j].num_win += 1;
            }
            None => {
                self.records[i].num_draw += 1;
                self.records[j].num_draw += 1;
            }
        }
        Ok(record)
    }

    /// Players in roster order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Players with their tally, best rating first.
    pub fn standings(&self) -> Vec<(&Player, Record)> {
        let mut standings: Vec<_> = self.players.iter().zip(self.records.iter().copied()).collect();
        standings.sort_by(|a, b| b.0.rating.total_cmp(&a.0.rating));
        standings
    }

    /// Give the players back, ratings included.
    pub fn into_players(self) -> Vec<Player> {
        self.players
    }
}

/// Two distinct mutable elements of a slice. `i != j` is guaranteed by the callers.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    if i < j {
        let (left, right) = items.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Roster;

    #[test]
    fn pairings_cover_both_colors() {
        let tournament = Tournament::new(Roster::with_seed(0).random_bots(3));
        assert_eq!(
            tournament.pairings(),
            vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]
        );
    }

    #[test]
    fn pair_mut_returns_requested_order() {
        let mut v = [1, 2, 3];
        let (a, b) = pair_mut(&mut v, 2, 0);
        assert_eq!((*a, *b), (3, 1));
        let (a, b) = pair_mut(&mut v, 0, 1);
        assert_eq!((*a, *b), (1, 2));
    }

    #[test]
    fn needs_two_players() {
        let mut tournament = Tournament::new(Roster::new().random_bots(1));
        let err = tournament.play().unwrap_err();
        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::NotEnoughPlayers(1))
        );
    }

    #[test]
    fn records_add_up() {
        let mut tournament = Tournament::new(Roster::with_seed(5).random_bots(4));
        let results = tournament.play().unwrap();
        assert_eq!(results.len(), 12);

        let standings = tournament.standings();
        assert!(standings.iter().all(|(_, r)| r.played() == 6));
        let wins: u32 = standings.iter().map(|(_, r)| r.num_win).sum();
        let losses: u32 = standings.iter().map(|(_, r)| r.num_lose).sum();
        assert_eq!(wins, losses);
        assert!(standings
            .windows(2)
            .all(|w| w[0].0.rating >= w[1].0.rating));
    }
}

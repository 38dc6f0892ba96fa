//! Players and the strategies that pick their moves.
//!
//! A [`Player`] is what a tournament keeps track of: a name and an Elo rating. How it plays is
//! delegated to a boxed [`Strategy`], so random bots, scripted test players and players reading
//! moves from a stream can all take part in the same tournament.

use std::{
    collections::VecDeque,
    fmt::Debug,
    io::{BufRead, Write},
};

use anyhow::{bail, Context};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::trace;

use crate::{moves::Move, rating::INITIAL_RATING};

/// How a player picks a move.
pub trait Strategy {
    /// Pick one move out of `legal`.
    ///
    /// `legal` is never empty. The returned move must be one of its elements: the game refuses
    /// anything else.
    ///
    /// # Error
    /// Returned when the strategy cannot produce a move at all (I/O failure, exhausted script, ...).
    fn choose(&mut self, legal: &[Move]) -> anyhow::Result<Move>;
}

/// A rated participant.
pub struct Player {
    name: String,
    /// Elo rating, updated by every game this player finishes.
    pub rating: f64,
    strategy: Box<dyn Strategy>,
}

impl Player {
    /// A player starting at [`INITIAL_RATING`].
    pub fn new(name: impl Into<String>, strategy: impl Strategy + 'static) -> Player {
        Player {
            name: name.into(),
            rating: INITIAL_RATING,
            strategy: Box::new(strategy),
        }
    }

    /// Builder-style rating override.
    pub fn with_rating(mut self, rating: f64) -> Player {
        self.rating = rating;
        self
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ask the strategy for a move.
    pub fn choose(&mut self, legal: &[Move]) -> anyhow::Result<Move> {
        self.strategy
            .choose(legal)
            .with_context(|| format!("{} could not choose a move", self.name))
    }
}

impl Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("rating", &self.rating)
            .finish_non_exhaustive()
    }
}

/// Builds players, numbering the ones that are not given a name.
#[derive(Debug, Default)]
pub struct Roster {
    next_id: usize,
    seed: Option<u64>,
}

impl Roster {
    /// Random bots will be seeded from the OS.
    pub fn new() -> Roster {
        Roster::default()
    }

    /// Random bots get reproducible seeds derived from `seed`.
    pub fn with_seed(seed: u64) -> Roster {
        Roster {
            next_id: 0,
            seed: Some(seed),
        }
    }

    /// A random bot named `RandoBot <n>`, `n` counting every bot made by this roster.
    pub fn random_bot(&mut self) -> Player {
        let id = self.next_id;
        self.next_id += 1;
        let strategy = match self.seed {
            Some(seed) => RandomStrategy::seeded(seed.wrapping_add(id as u64)),
            None => RandomStrategy::new(),
        };
        Player::new(format!("RandoBot {id}"), strategy)
    }

    /// `count` random bots.
    pub fn random_bots(&mut self, count: usize) -> Vec<Player> {
        (0..count).map(|_| self.random_bot()).collect()
    }
}

/// Uniformly random legal moves.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: ChaCha20Rng,
}

impl RandomStrategy {
    /// Seeded from OS randomness.
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Same seed, same games.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn choose(&mut self, legal: &[Move]) -> anyhow::Result<Move> {
        if legal.is_empty() {
            bail!("no legal move to choose from");
        }
        Ok(legal[self.rng.random_range(0..legal.len())])
    }
}

/// Plays a fixed list of moves, in order, whatever the legal moves are.
///
/// Handy to replay a known game. A move of the script that is not legal is still returned, and
/// the game rejects it.
#[derive(Debug, Clone, Default)]
pub struct ScriptedStrategy {
    moves: VecDeque<Move>,
}

impl ScriptedStrategy {
    /// Plays `moves` in order.
    pub fn new(moves: impl IntoIterator<Item = Move>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }

    /// Moves not played yet.
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl Strategy for ScriptedStrategy {
    fn choose(&mut self, _legal: &[Move]) -> anyhow::Result<Move> {
        match self.moves.pop_front() {
            Some(m) => Ok(m),
            None => bail!("script exhausted"),
        }
    }
}

/// Text protocol over a reader/writer pair.
///
/// For each turn, the legal moves are written on one line, separated by `;`, then one line is
/// read back and parsed as a [`Move`] (`sub_row sub_col row col`). Lines that do not parse, or
/// name a move that is not legal, are answered with an `invalid:` line and read again, up to
/// `max_attempts` times.
///
/// With stdin/stdout this is an interactive player; with a child process' pipes it is an
/// external agent.
pub struct StreamStrategy<R, W> {
    reader: R,
    writer: W,
    max_attempts: usize,
}

impl<R: BufRead, W: Write> StreamStrategy<R, W> {
    /// Three attempts per turn.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            max_attempts: 3,
        }
    }

    /// Number of lines read per turn before giving up. At least one.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    fn ask(&mut self, legal: &[Move]) -> anyhow::Result<String> {
        let options = legal
            .iter()
            .map(Move::to_string)
            .collect::<Vec<_>>()
            .join(";");
        writeln!(self.writer, "{options}").context("could not send legal moves")?;
        self.writer.flush()?;

        let mut line = String::new();
        let n = self
            .reader
            .read_line(&mut line)
            .context("could not read a move")?;
        if n == 0 {
            bail!("stream closed before a move was sent");
        }
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Strategy for StreamStrategy<R, W> {
    fn choose(&mut self, legal: &[Move]) -> anyhow::Result<Move> {
        for attempt in 1..=self.max_attempts {
            let line = self.ask(legal)?;
            match line.trim().parse::<Move>() {
                Ok(m) if legal.contains(&m) => return Ok(m),
                Ok(m) => {
                    trace!(attempt, %m, "illegal move received");
                    writeln!(self.writer, "invalid: {m} is not legal")?;
                }
                Err(e) => {
                    trace!(attempt, error = %e, "unparsable move received");
                    writeln!(self.writer, "invalid: {e}")?;
                }
            }
        }
        bail!("no legal move after {} attempts", self.max_attempts)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn mv(a: usize, b: usize, c: usize, d: usize) -> Move {
        Move::new(a, b, c, d).unwrap()
    }

    #[test]
    fn random_picks_from_legal() {
        let legal: Vec<_> = Move::all().filter(|m| m.board == (2, 1)).collect();
        let mut strategy = RandomStrategy::seeded(7);
        for _ in 0..100 {
            assert!(legal.contains(&strategy.choose(&legal).unwrap()));
        }
        assert!(strategy.choose(&[]).is_err());
    }

    #[test]
    fn same_seed_same_choices() {
        let legal: Vec<_> = Move::all().collect();
        let mut a = RandomStrategy::seeded(42);
        let mut b = RandomStrategy::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.choose(&legal).unwrap(), b.choose(&legal).unwrap());
        }
    }

    #[test]
    fn roster_numbers_its_bots() {
        let mut roster = Roster::with_seed(1);
        let bots = roster.random_bots(3);
        let names: Vec<_> = bots.iter().map(Player::name).collect();
        assert_eq!(names, ["RandoBot 0", "RandoBot 1", "RandoBot 2"]);
        assert!(bots.iter().all(|p| p.rating == INITIAL_RATING));

        // counters are per roster, not global
        let mut other = Roster::new();
        assert_eq!(other.random_bot().name(), "RandoBot 0");
    }

    #[test]
    fn script_plays_in_order_then_fails() {
        let mut s = ScriptedStrategy::new([mv(0, 0, 0, 0), mv(1, 1, 1, 1)]);
        assert_eq!(s.choose(&[]).unwrap(), mv(0, 0, 0, 0));
        assert_eq!(s.remaining(), 1);
        assert_eq!(s.choose(&[]).unwrap(), mv(1, 1, 1, 1));
        assert!(s.choose(&[]).is_err());
    }

    #[test]
    fn stream_retries_until_legal() {
        let legal = [mv(1, 1, 0, 0), mv(1, 1, 2, 2)];
        let input = Cursor::new("nonsense\n0 0 0 0\n1 1 2 2\n");
        let mut output = Vec::new();
        let chosen = StreamStrategy::new(input, &mut output)
            .choose(&legal)
            .unwrap();
        assert_eq!(chosen, mv(1, 1, 2, 2));

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "1 1 0 0;1 1 2 2");
        assert!(lines[1].starts_with("invalid:"));
        assert_eq!(lines[3], "invalid: 0 0 0 0 is not legal");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn stream_gives_up() {
        let legal = [mv(0, 0, 0, 0)];
        let input = Cursor::new("2 2 2 2\n");
        let mut output = Vec::new();
        let result = StreamStrategy::new(input, &mut output)
            .with_max_attempts(1)
            .choose(&legal);
        assert!(result.is_err());

        let closed = StreamStrategy::new(Cursor::new(""), Vec::new()).choose(&legal);
        assert!(closed.is_err());
    }

    #[test]
    fn player_is_boxed_strategy() {
        let mut p = Player::new("scripted", ScriptedStrategy::new([mv(2, 2, 2, 2)])).with_rating(900.0);
        assert_eq!(p.rating, 900.0);
        assert_eq!(p.choose(&[mv(2, 2, 2, 2)]).unwrap(), mv(2, 2, 2, 2));
        let err = p.choose(&[mv(2, 2, 2, 2)]).unwrap_err();
        assert!(err.to_string().contains("scripted could not choose"));
    }
}

//! Config for the tournament driver
//!
//! Configuration can be created programmatically using [`Configuration::new()`] or by reading
//! environment variables using [`Configuration::from_env()`].
//!
//! # Environment Variables
//!
//! All values are optional. Flags are case-insensitive, set them to `"true"` to enable them.
//!
//! - `STTT_VERBOSE`: Print every game result to stdout (default: `true`)
//! - `STTT_LOG`: Write traces to a timestamped log file (default: `false`)
//! - `STTT_PLAYERS`: Number of random bots in the tournament (default: `4`)
//! - `STTT_SEED`: Seed for the random bots, OS randomness when unset
//! - `STTT_LIVE`: Play a single game and print the board after every move (default: `false`)
//! - `STTT_MOVE_DELAY_MS`: Pause between moves of a live game, in milliseconds (default: `0`)

use std::{str::FromStr, time::Duration};

use tracing::warn;

/// Configuration of the tournament driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) verbose: bool,
    pub(crate) log: bool,
    pub(crate) players: usize,
    pub(crate) seed: Option<u64>,
    pub(crate) live: bool,
    pub(crate) move_delay: Duration,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - Game results are printed to stdout.
    /// - Logging to file is disabled.
    /// - Four random bots take part.
    /// - Bots are seeded from the OS.
    /// - A full tournament is played, not a live game.
    /// - Live games do not pause between moves.
    pub fn new() -> Self {
        Self {
            verbose: true,
            log: false,
            players: 4,
            seed: None,
            live: false,
            move_delay: Duration::ZERO,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// See the module documentation for the recognized variables. Unset variables, and numbers
    /// that do not parse, keep the default value.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::new();
        let flag = |var: &str, default: bool| match lookup(var) {
            Some(val) => val.eq_ignore_ascii_case("true"),
            None => default,
        };
        let number = |var: &str| -> Option<u64> {
            let val = lookup(var)?;
            match u64::from_str(val.trim()) {
                Ok(n) => Some(n),
                Err(e) => {
                    warn!("ignoring {var}='{val}': {e}");
                    None
                }
            }
        };

        Self {
            verbose: flag("STTT_VERBOSE", defaults.verbose),
            log: flag("STTT_LOG", defaults.log),
            players: number("STTT_PLAYERS").map_or(defaults.players, |n| n as usize),
            seed: number("STTT_SEED"),
            live: flag("STTT_LIVE", defaults.live),
            move_delay: number("STTT_MOVE_DELAY_MS")
                .map_or(defaults.move_delay, Duration::from_millis),
        }
    }

    /// Enable or disable printing results.
    pub fn with_verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Enable or disable logging to file.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// Number of random bots in the tournament.
    pub fn with_players(mut self, value: usize) -> Self {
        self.players = value;
        self
    }

    /// Seed the random bots for reproducible tournaments.
    pub fn with_seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Play a single game move by move instead of a tournament.
    pub fn with_live(mut self, value: bool) -> Self {
        self.live = value;
        self
    }

    /// Pause between the moves of a live game.
    pub fn with_move_delay(mut self, value: Duration) -> Self {
        self.move_delay = value;
        self
    }

    /// Whether results are printed.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Whether traces go to a log file.
    pub fn log(&self) -> bool {
        self.log
    }

    /// Number of random bots.
    pub fn players(&self) -> usize {
        self.players
    }

    /// Seed of the random bots, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether a single live game is played.
    pub fn live(&self) -> bool {
        self.live
    }

    /// Pause between live moves.
    pub fn move_delay(&self) -> Duration {
        self.move_delay
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

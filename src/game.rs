//! A single game between two rated players.

use anyhow::Context;
use tracing::{debug, info, instrument, trace};

use crate::{
    board::Board, cell::Cell, error::EngineError, moves::Move, player::Player,
    rating::rating_delta,
};

/// Where a game stands.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum GameState {
    /// Moves are still expected.
    InProgress,
    /// X completed a line on the meta-board.
    WonByX,
    /// O completed a line on the meta-board.
    WonByO,
    /// Every sub-board is decided and no meta-board line was completed.
    Drawn,
}

impl GameState {
    /// True for every state but `InProgress`.
    pub fn is_terminal(self) -> bool {
        self != GameState::InProgress
    }

    /// The winning mark, if any.
    pub fn winner(self) -> Option<Cell> {
        match self {
            GameState::WonByX => Some(Cell::X),
            GameState::WonByO => Some(Cell::O),
            _ => None,
        }
    }

    fn from_outcome(outcome: Cell) -> GameState {
        match outcome {
            Cell::Empty => GameState::InProgress,
            Cell::X => GameState::WonByX,
            Cell::O => GameState::WonByO,
            Cell::Invalid => GameState::Drawn,
        }
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GameState::InProgress => "in progress",
            GameState::WonByX => "X wins",
            GameState::WonByO => "O wins",
            GameState::Drawn => "draw",
        };
        write!(f, "{s}")
    }
}

/// Turn order, board and result of one game.
///
/// X always moves first. The game borrows both players for its whole lifetime: when it
/// finishes, their ratings are updated right away, exactly once. A game dropped before the end
/// leaves the ratings untouched.
///
/// Drive it with [`Game::play`] to completion, or with [`Game::play_one_turn`] to look at the
/// board between moves.
#[derive(Debug)]
pub struct Game<'p> {
    x: &'p mut Player,
    o: &'p mut Player,
    board: Board,
    last_mover: Cell,
    last_move: Option<Move>,
    history: Vec<(Cell, Move)>,
    state: GameState,
}

impl<'p> Game<'p> {
    /// A new game, `x` to move.
    pub fn new(x: &'p mut Player, o: &'p mut Player) -> Game<'p> {
        Game {
            x,
            o,
            board: Board::new(),
            last_mover: Cell::O,
            last_move: None,
            history: Vec::with_capacity(81),
            state: GameState::InProgress,
        }
    }

    /// Play a single move and return the resulting state.
    ///
    /// The player to move receives the legal moves, its choice is placed on its sub-board and,
    /// if that decides the sub-board, on the meta-board. When the meta-board gets decided the
    /// game ends and both ratings are updated.
    ///
    /// # Error
    /// - [`EngineError::GameOver`] if the game already ended.
    /// - [`EngineError::IllegalChoice`] if the strategy answered with a move outside the legal set.
    /// - whatever the strategy itself failed with.
    ///
    /// The board is unchanged on error.
    pub fn play_one_turn(&mut self) -> anyhow::Result<GameState> {
        if self.state.is_terminal() {
            return Err(EngineError::GameOver.into());
        }

        let mark = self.to_move();
        let legal = self.board.legal_moves(self.last_move);
        trace!(?mark, legal = legal.len(), "turn {}", self.history.len() + 1);

        let chosen = self.player_mut(mark).choose(&legal)?;
        if !legal.contains(&chosen) {
            return Err(EngineError::IllegalChoice { mark, chosen }.into());
        }

        let outcome = self
            .board
            .play(chosen, mark)
            .with_context(|| format!("applying {chosen} for {mark}"))?;
        trace!(?mark, %chosen, "played");

        self.last_mover = mark;
        self.last_move = Some(chosen);
        self.history.push((mark, chosen));
        self.state = GameState::from_outcome(outcome);

        if self.state.is_terminal() {
            self.finish();
        }
        Ok(self.state)
    }

    /// Play until the game ends and return the final state.
    ///
    /// # Error
    /// [`EngineError::GameOver`] if called on a finished game, or any error of
    /// [`Game::play_one_turn`].
    #[instrument(skip(self), fields(x = %self.x.name(), o = %self.o.name()))]
    pub fn play(&mut self) -> anyhow::Result<GameState> {
        if self.state.is_terminal() {
            return Err(EngineError::GameOver.into());
        }
        while !self.state.is_terminal() {
            self.play_one_turn()?;
        }
        Ok(self.state)
    }

    fn finish(&mut self) {
        let Some((delta_x, delta_o)) = rating_delta(self.x.rating, self.o.rating, self.state)
        else {
            return;
        };
        self.x.rating += delta_x;
        self.o.rating += delta_o;
        debug!(delta_x, delta_o, "ratings updated");
        info!(
            "{} (X) VS {} (O): {} after {} moves",
            self.x.name(),
            self.o.name(),
            self.state,
            self.history.len()
        );
    }

    fn player_mut(&mut self, mark: Cell) -> &mut Player {
        match mark {
            Cell::X => &mut *self.x,
            _ => &mut *self.o,
        }
    }

    /// The player holding `mark`; `O` for anything that is not `X`.
    pub fn player(&self, mark: Cell) -> &Player {
        match mark {
            Cell::X => &*self.x,
            _ => &*self.o,
        }
    }

    /// Mark of the player expected to move next.
    pub fn to_move(&self) -> Cell {
        self.last_mover.opponent()
    }

    /// Current state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// The board, for display.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Last move played, `None` before the first move.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Every move played so far, with the mark that played it.
    pub fn history(&self) -> &[(Cell, Move)] {
        &self.history
    }

    /// Legal moves for the player to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.state.is_terminal() {
            return vec![];
        }
        self.board.legal_moves(self.last_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{RandomStrategy, ScriptedStrategy};

    fn mv(a: usize, b: usize, c: usize, d: usize) -> Move {
        Move::new(a, b, c, d).unwrap()
    }

    fn random(seed: u64) -> Player {
        Player::new(format!("random {seed}"), RandomStrategy::seeded(seed))
    }

    #[test]
    fn x_moves_first_and_turns_alternate() {
        let mut x = random(1);
        let mut o = random(2);
        let mut game = Game::new(&mut x, &mut o);
        assert_eq!(game.to_move(), Cell::X);
        assert_eq!(game.legal_moves().len(), 81);
        for _ in 0..6 {
            game.play_one_turn().unwrap();
        }
        let marks: Vec<_> = game.history().iter().map(|(m, _)| *m).collect();
        assert_eq!(marks, [Cell::X, Cell::O, Cell::X, Cell::O, Cell::X, Cell::O]);
        assert_eq!(game.to_move(), Cell::X);
    }

    #[test]
    fn forced_sub_board_after_first_move() {
        let mut x = Player::new("x", ScriptedStrategy::new([mv(0, 0, 1, 1)]));
        let mut o = random(3);
        let mut game = Game::new(&mut x, &mut o);
        assert_eq!(game.play_one_turn().unwrap(), GameState::InProgress);
        assert_eq!(game.last_move(), Some(mv(0, 0, 1, 1)));

        let legal = game.legal_moves();
        let expected: Vec<_> = Move::all().filter(|m| m.board == (1, 1)).collect();
        assert_eq!(legal, expected);
    }

    #[test]
    fn illegal_choice_is_refused() {
        // (0, 0, 0, 0) sends O to sub-board (0, 0); O answers in (2, 2)
        let mut x = Player::new("x", ScriptedStrategy::new([mv(0, 0, 0, 0)]));
        let mut o = Player::new("o", ScriptedStrategy::new([mv(2, 2, 0, 0)]));
        let mut game = Game::new(&mut x, &mut o);
        game.play_one_turn().unwrap();
        let err = game.play_one_turn().unwrap_err();
        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::IllegalChoice {
                mark: Cell::O,
                chosen: mv(2, 2, 0, 0)
            })
        );
        assert_eq!(game.board().cell(mv(2, 2, 0, 0)), Cell::Empty);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn finished_game_refuses_more_turns() {
        let mut x = random(10);
        let mut o = random(11);
        let mut game = Game::new(&mut x, &mut o);
        let state = game.play().unwrap();
        assert!(state.is_terminal());
        assert!(game.legal_moves().is_empty());

        for err in [game.play_one_turn().unwrap_err(), game.play().unwrap_err()] {
            assert_eq!(err.downcast_ref::<EngineError>(), Some(&EngineError::GameOver));
        }
    }

    #[test]
    fn ratings_change_once_and_only_at_the_end() {
        let mut x = random(20);
        let mut o = random(21);
        let state = {
            let mut game = Game::new(&mut x, &mut o);
            while game.state() == GameState::InProgress {
                assert_eq!(game.player(Cell::X).rating, 800.0);
                assert_eq!(game.player(Cell::O).rating, 800.0);
                game.play_one_turn().unwrap();
            }
            game.state()
        };
        let expected = rating_delta(800.0, 800.0, state).unwrap();
        assert_eq!(x.rating, 800.0 + expected.0);
        assert_eq!(o.rating, 800.0 + expected.1);
    }

    #[test]
    fn abandoned_game_keeps_ratings() {
        let mut x = random(30);
        let mut o = random(31);
        {
            let mut game = Game::new(&mut x, &mut o);
            for _ in 0..10 {
                game.play_one_turn().unwrap();
            }
        }
        assert_eq!(x.rating, 800.0);
        assert_eq!(o.rating, 800.0);
    }

    #[test]
    fn strategy_failure_is_reported() {
        let mut x = Player::new("empty script", ScriptedStrategy::default());
        let mut o = random(40);
        let mut game = Game::new(&mut x, &mut o);
        let err = game.play().unwrap_err();
        assert!(err.to_string().contains("empty script"));
        assert_eq!(game.state(), GameState::InProgress);
    }
}

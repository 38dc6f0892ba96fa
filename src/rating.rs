//! Elo rating update applied once per finished game.

use crate::game::GameState;

/// Rating of a freshly created player.
pub const INITIAL_RATING: f64 = 800.0;

/// Maximum rating change for a single game.
pub const K_FACTOR: f64 = 40.0;

/// Expected score of a player rated `rating` against one rated `opponent`.
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / 400.0))
}

/// Rating changes `(delta_x, delta_o)` for a finished game.
///
/// X scores 1, 0.5 or 0 for a win, a draw or a loss, O the complement. Each side moves by
/// `K_FACTOR * (actual - expected)`, so the deltas always sum to zero.
///
/// Returns `None` while the game is in progress.
pub fn rating_delta(rating_x: f64, rating_o: f64, state: GameState) -> Option<(f64, f64)> {
    let actual_x = match state {
        GameState::WonByX => 1.0,
        GameState::Drawn => 0.5,
        GameState::WonByO => 0.0,
        GameState::InProgress => return None,
    };
    let expected_x = expected_score(rating_x, rating_o);
    let delta_x = K_FACTOR * (actual_x - expected_x);
    Some((delta_x, -delta_x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_ratings() {
        let (x, o) = rating_delta(800.0, 800.0, GameState::WonByX).unwrap();
        assert_eq!((x, o), (20.0, -20.0));

        let (x, o) = rating_delta(800.0, 800.0, GameState::Drawn).unwrap();
        assert_eq!(x, 0.0);
        assert_eq!(o, 0.0);

        let (x, o) = rating_delta(1200.0, 1200.0, GameState::WonByO).unwrap();
        assert_eq!((x, o), (-20.0, 20.0));
    }

    #[test]
    fn zero_sum() {
        for (rx, ro) in [(800.0, 800.0), (1000.0, 600.0), (432.5, 1711.25)] {
            for state in [GameState::WonByX, GameState::WonByO, GameState::Drawn] {
                let (x, o) = rating_delta(rx, ro, state).unwrap();
                assert!((x + o).abs() < 1e-12, "{rx} {ro} {state:?}");
            }
        }
    }

    #[test]
    fn upsets_move_more() {
        let (underdog_win, _) = rating_delta(600.0, 1000.0, GameState::WonByX).unwrap();
        let (favourite_win, _) = rating_delta(1000.0, 600.0, GameState::WonByX).unwrap();
        assert!(underdog_win > 20.0 && underdog_win < K_FACTOR);
        assert!(favourite_win < 20.0 && favourite_win > 0.0);
        // 400 points apart: expected score is 10/11
        assert!((expected_score(1000.0, 600.0) - 10.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn in_progress_has_no_delta() {
        assert_eq!(rating_delta(800.0, 800.0, GameState::InProgress), None);
    }
}

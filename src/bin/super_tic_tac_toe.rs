//! Round-robin between random bots, configured through `STTT_*` environment variables.
//!
//! See [`Configuration`] for the recognized variables.

use std::thread;

use super_tic_tac_toe::{logger::init_logger, prelude::*};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Configuration::from_env();
    if config.log() {
        init_logger()?;
    }
    info!(?config);

    let mut roster = match config.seed() {
        Some(seed) => Roster::with_seed(seed),
        None => Roster::new(),
    };

    if config.live() {
        return live(config, &mut roster);
    }

    let mut tournament = Tournament::new(roster.random_bots(config.players()));
    if config.verbose() {
        println!(
            "Running {} games between {} players...",
            tournament.pairings().len(),
            config.players()
        );
    }
    let results = tournament.play()?;
    if config.verbose() {
        for result in &results {
            // green match, default results
            println!("\x1b[32m[{} VS {}]: \x1b[39m{} in {} moves", result.x, result.o, result.state, result.moves);
        }
    }

    println!("Standings:");
    for (rank, (player, record)) in tournament.standings().into_iter().enumerate() {
        println!(
            "{:>2}. {:<12} {:>7.1}  {record}",
            rank + 1,
            player.name(),
            player.rating
        );
    }
    Ok(())
}

/// One game, printed after every move with the configured pause in between.
fn live(config: Configuration, roster: &mut Roster) -> anyhow::Result<()> {
    let mut x = roster.random_bot();
    let mut o = roster.random_bot();
    let title = format!("{} ({:.0}) VS {} ({:.0})", x.name(), x.rating, o.name(), o.rating);

    let mut game = Game::new(&mut x, &mut o);
    while game.state() == GameState::InProgress {
        let mover = game.to_move();
        game.play_one_turn()?;
        // clear screen, cursor home
        print!("\x1b[2J\x1b[H");
        println!("{title}");
        if let Some(last) = game.last_move() {
            println!("{mover} played {last}");
        }
        println!("\nResults:\n{}", outcomes_text(game.board()));
        println!("Board:\n{}", game.board());
        if !config.move_delay().is_zero() {
            thread::sleep(config.move_delay());
        }
    }
    let state = game.state();
    drop(game);

    println!("{state}");
    println!("{}: {:.1}, {}: {:.1}", x.name(), x.rating, o.name(), o.rating);
    Ok(())
}

fn outcomes_text(board: &Board) -> String {
    board
        .outcomes()
        .rows()
        .iter()
        .map(|row| row.iter().map(Cell::to_string).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

//! Standalone game loop for local testing/demo.
//!
//! This module provides an interactive loop for playing one maze in the terminal.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::maze::{MAZE_COLS, MAZE_ROWS};
use crate::game::state::MazeState;
use crate::game::systems::{print_maze, print_player_state};
use crate::game::types::{Direction, MoveOutcome};

/// A line of terminal input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoCommand {
    Move(Direction),
    Regenerate,
    Quit,
    Unknown,
}

/// Parse a line: arrow-key escape sequences, `w/a/s/d`, direction names, `n`, `q`.
pub fn parse_command(line: &str) -> DemoCommand {
    match line.trim() {
        "\x1b[A" | "w" => DemoCommand::Move(Direction::Up),
        "\x1b[C" | "d" => DemoCommand::Move(Direction::Right),
        "\x1b[B" | "s" => DemoCommand::Move(Direction::Down),
        "\x1b[D" | "a" => DemoCommand::Move(Direction::Left),
        "n" => DemoCommand::Regenerate,
        "q" => DemoCommand::Quit,
        other => other
            .parse::<Direction>()
            .map(DemoCommand::Move)
            .unwrap_or(DemoCommand::Unknown),
    }
}

/// Run the maze in the terminal until the player quits or stdin closes.
pub fn run_game_loop() -> io::Result<()> {
    let mut rng = StdRng::from_os_rng();
    let mut state = MazeState::generate(MAZE_COLS, MAZE_ROWS, &mut rng)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let mut started = Instant::now();

    println!("Blueprint Escape! Reach X from @.");
    print_maze(&state);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Direction (arrows/wasd, n = new maze, q = quit), then Enter: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        // The terminal has no timer; the clock follows wall time between inputs.
        let elapsed = started.elapsed().as_secs();
        while state.elapsed_secs < elapsed && state.tick() {}

        match parse_command(&line) {
            DemoCommand::Move(direction) => match state.apply_move(direction) {
                MoveOutcome::Blocked => println!("Bump! There is a wall {direction}."),
                MoveOutcome::Solved => {
                    print_maze(&state);
                    println!("Mission complete in {}s! Press n for the next level.", state.elapsed_secs);
                    info!("[Demo] Maze solved in {}s", state.elapsed_secs);
                    continue;
                }
                MoveOutcome::Ignored => println!("Already solved. Press n for the next level."),
                MoveOutcome::Moved => {}
            },
            DemoCommand::Regenerate => {
                state
                    .regenerate(&mut rng)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
                started = Instant::now();
            }
            DemoCommand::Quit => break,
            DemoCommand::Unknown => {
                println!("Unknown command: {:?}", line.trim());
                continue;
            }
        }

        print_player_state(&state);
        print_maze(&state);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arrow_sequences_and_keys() {
        assert_eq!(parse_command("\x1b[A\n"), DemoCommand::Move(Direction::Up));
        assert_eq!(parse_command("\x1b[D"), DemoCommand::Move(Direction::Left));
        assert_eq!(parse_command("s"), DemoCommand::Move(Direction::Down));
        assert_eq!(parse_command("Right"), DemoCommand::Move(Direction::Right));
        assert_eq!(parse_command("n"), DemoCommand::Regenerate);
        assert_eq!(parse_command(" q "), DemoCommand::Quit);
        assert_eq!(parse_command("jump"), DemoCommand::Unknown);
    }
}

//! Maze rendering system (terminal).
//!
//! This module turns a maze into text for the demo loop and for debugging.

use crate::game::types::{Direction, Position};
use crate::game::state::MazeState;

/// Render the maze as ASCII art. `@` is the agent, `X` the goal.
pub fn render_ascii(state: &MazeState) -> String {
    let grid = &state.grid;
    let mut out = String::new();

    for y in 0..grid.height() {
        // Top edge of this row.
        for x in 0..grid.width() {
            out.push('+');
            out.push_str(if grid.has_wall(Position::new(x, y), Direction::Up) { "---" } else { "   " });
        }
        out.push_str("+\n");

        // Cell bodies, with left walls.
        for x in 0..grid.width() {
            let pos = Position::new(x, y);
            out.push(if grid.has_wall(pos, Direction::Left) { '|' } else { ' ' });
            let symbol = if pos == state.player {
                " @ "
            } else if pos == state.goal {
                " X "
            } else {
                "   "
            };
            out.push_str(symbol);
        }
        let last = Position::new(grid.width() - 1, y);
        out.push(if grid.has_wall(last, Direction::Right) { '|' } else { ' ' });
        out.push('\n');
    }

    // Bottom edge of the last row.
    for x in 0..grid.width() {
        out.push('+');
        let pos = Position::new(x, grid.height() - 1);
        out.push_str(if grid.has_wall(pos, Direction::Down) { "---" } else { "   " });
    }
    out.push_str("+\n");
    out
}

/// Print the maze to the terminal.
pub fn print_maze(state: &MazeState) {
    print!("{}", render_ascii(state));
}

/// Print the agent's position and the clock.
pub fn print_player_state(state: &MazeState) {
    println!("--- Agent ---");
    println!("Position: ({}, {})", state.player.x, state.player.y);
    println!("Goal: ({}, {})", state.goal.x, state.goal.y);
    if let Some(steps) = state.remaining_steps() {
        println!("Steps to goal: {}", steps);
    }
    println!("Time: {}s", state.elapsed_secs);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::MazeState;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_render_two_by_one() {
        let state = MazeState::generate(2, 1, &mut StdRng::seed_from_u64(3)).unwrap();
        let expected = "\
+---+---+
| @   X |
+---+---+
";
        assert_eq!(render_ascii(&state), expected);
    }

    #[test]
    fn test_render_dimensions() {
        let state = MazeState::generate(5, 4, &mut StdRng::seed_from_u64(9)).unwrap();
        let text = render_ascii(&state);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4 * 2 + 1);
        assert!(lines.iter().all(|l| l.len() == 5 * 4 + 1));
        assert_eq!(text.matches('@').count(), 1);
        assert_eq!(text.matches('X').count(), 1);
    }
}

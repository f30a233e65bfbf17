//! Agent movement system.
//!
//! This module handles moving the agent through carved passages.

use crate::game::types::{Direction, MoveOutcome};
use crate::game::state::MazeState;
use crate::game::systems::rules::apply_goal_rule;

/// Move the agent one cell in the given direction.
///
/// Hitting a wall is not an error: the agent stays put and `Blocked` is returned.
/// Once the maze is solved every move is ignored.
pub fn move_player(state: &mut MazeState, direction: Direction) -> MoveOutcome {
    if state.is_solved() {
        return MoveOutcome::Ignored;
    }
    if state.grid.has_wall(state.player, direction) {
        return MoveOutcome::Blocked;
    }

    // A clear wall only exists between two in-bounds cells.
    let Some(next) = state.grid.neighbor(state.player, direction) else {
        return MoveOutcome::Blocked;
    };
    state.player = next;

    if apply_goal_rule(state) {
        MoveOutcome::Solved
    } else {
        MoveOutcome::Moved
    }
}

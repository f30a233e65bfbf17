use crate::game::types::MazeStatus;
use crate::game::state::MazeState;

/// Mark the maze solved when the agent stands on the goal.
/// Returns true only on the transition from active to solved.
pub fn apply_goal_rule(state: &mut MazeState) -> bool {
    if state.status == MazeStatus::Active && state.player == state.goal {
        state.status = MazeStatus::Solved;
        return true;
    }
    false
}

/// Advance the elapsed-time counter by one tick unless the maze is solved.
pub fn advance_clock(state: &mut MazeState) -> bool {
    if state.status == MazeStatus::Solved {
        return false;
    }
    state.elapsed_secs += 1;
    true
}

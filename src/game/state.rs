use serde::{Serialize, Deserialize};
use rand::Rng;

use crate::game::types::{Direction, MazeError, MazeStatus, MoveOutcome, Position};
use crate::game::grid::Grid;
use crate::game::generator::carve_maze;
use crate::game::systems::{move_player, apply_goal_rule, advance_clock};

/// One maze instance: grid, agent, goal and clock are created together and
/// replaced together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeState {
    pub grid: Grid,
    pub player: Position,
    pub goal: Position,
    pub status: MazeStatus,
    pub elapsed_secs: u64,
}

impl MazeState {
    /// Generate a new perfect maze of the given size.
    pub fn generate<R: Rng>(width: usize, height: usize, rng: &mut R) -> Result<Self, MazeError> {
        let mut grid = Grid::new(width, height)?;
        carve_maze(&mut grid, rng);

        let mut state = MazeState {
            grid,
            player: Position::ORIGIN,
            goal: Position::new(width - 1, height - 1),
            status: MazeStatus::Active,
            elapsed_secs: 0,
        };
        // A 1x1 maze starts on its goal.
        apply_goal_rule(&mut state);
        Ok(state)
    }

    /// Replace this maze with a fresh one of the same size.
    pub fn regenerate<R: Rng>(&mut self, rng: &mut R) -> Result<(), MazeError> {
        *self = Self::generate(self.grid.width(), self.grid.height(), rng)?;
        Ok(())
    }

    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        move_player(self, direction)
    }

    /// One elapsed-time tick. Returns true if the counter advanced.
    pub fn tick(&mut self) -> bool {
        advance_clock(self)
    }

    pub fn is_solved(&self) -> bool {
        self.status == MazeStatus::Solved
    }

    /// Steps left on the unique path from the agent to the goal.
    pub fn remaining_steps(&self) -> Option<usize> {
        self.grid.path_length(self.player, self.goal)
    }
}

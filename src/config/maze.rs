/// Maze configuration constants.
/// 
/// This module defines the maze dimensions and the cadence of the elapsed-time tick.
pub const TICK_INTERVAL_SECS: u64 = 1; // Duration of one elapsed-time tick in seconds.

/// Number of columns in a generated maze.
pub const MAZE_COLS: usize = 15;

/// Number of rows in a generated maze.
pub const MAZE_ROWS: usize = 15;

/// Maximum number of maze sessions hosted at the same time.
pub const MAX_SESSIONS: usize = 256;

/// Seconds without subscribers or commands after which a maze session stops.
pub const IDLE_TIMEOUT_SECS: u64 = 300;

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// One of the four moves an agent can make. The discriminant is the index of
/// the matching wall in `Cell::walls` (top, right, bottom, left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn wall_index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised at the input boundary when a direction value is outside the four-element set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid direction '{0}', expected one of up, right, down, left")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts direction names in any case and the browser key names (`ArrowUp`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = trimmed.strip_prefix("Arrow").unwrap_or(trimmed);
        match name.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "right" => Ok(Direction::Right),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid maze dimensions {width}x{height}, both must be at least 1")]
    InvalidDimensions { width: usize, height: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub pos: Position,
    /// Only meaningful while carving.
    #[serde(skip)]
    pub visited: bool,
    /// Top, right, bottom, left. `true` means impassable.
    pub walls: [bool; 4],
}

impl Cell {
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            visited: false,
            walls: [true; 4],
        }
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction.wall_index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MazeStatus {
    Active,
    Solved,
}

/// Result of a `move` trigger. Informational only, none of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The agent stepped into the neighbouring cell.
    Moved,
    /// A wall was in the way; nothing changed.
    Blocked,
    /// The agent stepped onto the goal.
    Solved,
    /// The maze was already solved; nothing changed.
    Ignored,
}

impl MoveOutcome {
    pub fn changed_state(self) -> bool {
        matches!(self, MoveOutcome::Moved | MoveOutcome::Solved)
    }
}

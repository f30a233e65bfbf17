use actix::prelude::*;
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use super::session::MazeWsSession;
use crate::game::state::MazeState;
use crate::game::types::{Cell, Direction, MazeStatus, MoveOutcome, Position};

/// Read-only view of one hosted maze, as sent to presentation layers.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MazeSnapshot {
    pub session_id: Uuid,
    pub level: u32,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Cell>,
    pub player: Position,
    pub goal: Position,
    pub status: MazeStatus,
    pub solved: bool,
    pub elapsed_secs: u64,
}

impl MazeSnapshot {
    pub fn new(session_id: Uuid, level: u32, state: &MazeState) -> Self {
        Self {
            session_id,
            level,
            width: state.grid.width(),
            height: state.grid.height(),
            cells: state.grid.cells().to_vec(),
            player: state.player,
            goal: state.goal,
            status: state.status,
            solved: state.is_solved(),
            elapsed_secs: state.elapsed_secs,
        }
    }
}

/// A trigger already validated at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeCommand {
    Move(Direction),
    Regenerate,
}

/// Outcome of a command together with the state it left behind.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CommandResult {
    pub outcome: Option<MoveOutcome>,
    pub state: MazeSnapshot,
}

/// Command sent over HTTP; the caller waits for the result.
#[derive(Message)]
#[rtype(result = "CommandResult")]
pub struct ApplyCommand(pub MazeCommand);

/// Command sent from a WebSocket; the result is pushed back as a `MazeStateUpdate`.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ProcessClientMessage {
    pub command: MazeCommand,
    pub connection_id: Uuid,
    pub addr: Addr<MazeWsSession>,
}

#[derive(Message)]
#[rtype(result = "MazeSnapshot")]
pub struct GetSnapshot;

#[derive(Message)]
#[rtype(result = "()")]
pub struct Subscribe {
    pub connection_id: Uuid,
    pub addr: Addr<MazeWsSession>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Unsubscribe {
    pub connection_id: Uuid,
}

/// Stop the session and its clock.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Shutdown;

#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct MazeStateUpdate {
    pub state: MazeSnapshot,
    pub outcome: Option<MoveOutcome>,
}

/// Sent to subscribers when their session is gone.
#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct SessionClosed {
    pub session_id: Uuid,
}

// Client -> server
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "action", content = "data")]
pub enum ClientWsMessage {
    /// Direction is kept raw so a bad value can be reported as `INVALID_DIRECTION`.
    Move(String),
    Regenerate,
    Ping,
}

// Server -> client
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    State {
        outcome: Option<MoveOutcome>,
        state: MazeSnapshot,
    },
    Closed {
        session_id: Uuid,
    },
    Pong,
}

impl From<MazeStateUpdate> for ServerWsMessage {
    fn from(update: MazeStateUpdate) -> Self {
        ServerWsMessage::State { outcome: update.outcome, state: update.state }
    }
}

// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the address of the maze session manager.
//! Used to share state between HTTP/WebSocket handlers and the actor system.

use actix::Addr;
use crate::server::maze_session::server::MazeSessionManager;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the maze session manager actor (creates, finds and closes mazes).
    pub session_manager: Addr<MazeSessionManager>,
}

impl AppState {
    /// Create a new AppState with the given manager address.
    pub fn new(session_manager: Addr<MazeSessionManager>) -> Self {
        AppState { session_manager }
    }
}

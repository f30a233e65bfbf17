// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing
//! - Maze session hosting (one actor per maze, with its clock and subscribers)
//! - Error responses and WebSocket flood protection

pub mod state;
pub mod router;
pub mod maze_session;
pub mod error;
pub mod ws_error;
pub mod anti_spam;
pub mod ws_actor_utils;

//! Maze session module: hosted maze instances, their clock, and their HTTP/WebSocket endpoints.

pub mod server;
pub mod session;
pub mod messages;
pub mod handlers;


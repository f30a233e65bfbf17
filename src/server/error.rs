//! Service-level errors.
//!
//! Every variant maps to a stable error code and an HTTP status, and is rendered
//! with the same JSON shape on HTTP and WebSocket.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;
use uuid::Uuid;

use crate::game::types::{MazeError, ParseDirectionError};
use crate::server::ws_error::http_error_response;

#[derive(Debug, Error)]
pub enum MazeServiceError {
    #[error("maze session {0} not found")]
    SessionNotFound(Uuid),
    #[error("too many maze sessions (limit {0})")]
    TooManySessions(usize),
    #[error("invalid session id '{0}'")]
    InvalidId(String),
    #[error(transparent)]
    InvalidDirection(#[from] ParseDirectionError),
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error("maze session unavailable: {0}")]
    Mailbox(#[from] actix::MailboxError),
}

impl MazeServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            MazeServiceError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            MazeServiceError::TooManySessions(_) => "TOO_MANY_SESSIONS",
            MazeServiceError::InvalidId(_) => "INVALID_ID",
            MazeServiceError::InvalidDirection(_) => "INVALID_DIRECTION",
            MazeServiceError::Maze(_) => "INVALID_MAZE",
            MazeServiceError::Mailbox(_) => "SESSION_UNAVAILABLE",
        }
    }
}

impl ResponseError for MazeServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            MazeServiceError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            MazeServiceError::TooManySessions(_) => StatusCode::SERVICE_UNAVAILABLE,
            MazeServiceError::InvalidId(_)
            | MazeServiceError::InvalidDirection(_)
            | MazeServiceError::Maze(_) => StatusCode::BAD_REQUEST,
            MazeServiceError::Mailbox(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        http_error_response(self.code(), &self.to_string(), None, self.status_code())
    }
}

/// Parse a session id taken from a URL path.
pub fn parse_session_id(raw: &str) -> Result<Uuid, MazeServiceError> {
    Uuid::parse_str(raw).map_err(|_| MazeServiceError::InvalidId(raw.to_string()))
}

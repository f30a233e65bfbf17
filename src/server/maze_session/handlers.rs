//! REST endpoints for maze sessions.
//!
//! These mirror the WebSocket commands for clients that poll instead of subscribing.

use actix::Addr;
use actix_web::{web, HttpResponse};
use log::debug;
use serde::{Serialize, Deserialize};

use crate::game::types::Direction;
use crate::server::error::{parse_session_id, MazeServiceError};
use crate::server::maze_session::messages::{ApplyCommand, GetSnapshot, MazeCommand};
use crate::server::maze_session::server::{CloseMaze, CreateMaze, GetMazeSession, MazeSession};
use crate::server::state::AppState;

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct CreateMazeRequest {
    /// Fixed seed for a reproducible maze sequence.
    pub seed: Option<u64>,
}

async fn lookup(data: &AppState, raw_id: &str) -> Result<Addr<MazeSession>, MazeServiceError> {
    let session_id = parse_session_id(raw_id)?;
    data.session_manager.send(GetMazeSession { session_id }).await?
}

/// `POST /maze`
pub async fn create_maze(
    data: web::Data<AppState>,
    body: Option<web::Json<CreateMazeRequest>>,
) -> Result<HttpResponse, MazeServiceError> {
    let seed = body.and_then(|b| b.into_inner().seed);
    let (_, session) = data.session_manager.send(CreateMaze { seed }).await??;
    let snapshot = session.send(GetSnapshot).await?;
    Ok(HttpResponse::Created().json(snapshot))
}

/// `GET /maze/{session_id}`
pub async fn get_maze(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, MazeServiceError> {
    let session = lookup(&data, &path).await?;
    let snapshot = session.send(GetSnapshot).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

/// `POST /maze/{session_id}/move/{direction}`
pub async fn move_maze(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, MazeServiceError> {
    let (raw_id, raw_direction) = path.into_inner();
    // Validate the direction before touching the session.
    let direction: Direction = raw_direction.parse()?;
    let session = lookup(&data, &raw_id).await?;
    let result = session.send(ApplyCommand(MazeCommand::Move(direction))).await?;
    debug!("[MazeHttp] Move {} on {} -> {:?}", direction, raw_id, result.outcome);
    Ok(HttpResponse::Ok().json(result))
}

/// `POST /maze/{session_id}/regenerate`
pub async fn regenerate_maze(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, MazeServiceError> {
    let session = lookup(&data, &path).await?;
    let result = session.send(ApplyCommand(MazeCommand::Regenerate)).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// `DELETE /maze/{session_id}`
pub async fn delete_maze(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, MazeServiceError> {
    let session_id = parse_session_id(&path)?;
    data.session_manager.send(CloseMaze { session_id }).await??;
    Ok(HttpResponse::NoContent().finish())
}

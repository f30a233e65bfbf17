//! HTTP and WebSocket routing configuration.
//!
//! REST endpoints drive a maze directly; the WebSocket endpoint subscribes to
//! live updates, including the once-per-second clock.

use actix_web::web;
use crate::server::maze_session::handlers::{
    create_maze, delete_maze, get_maze, move_maze, regenerate_maze,
};
use crate::server::maze_session::session::ws_maze;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/maze")
            .route(web::post().to(create_maze))
    )
    .service(
        web::resource("/maze/{session_id}")
            .route(web::get().to(get_maze))
            .route(web::delete().to(delete_maze))
    )
    .service(
        web::resource("/maze/{session_id}/move/{direction}")
            .route(web::post().to(move_maze))
    )
    .service(
        web::resource("/maze/{session_id}/regenerate")
            .route(web::post().to(regenerate_maze))
    )
    .service(
        web::resource("/ws/maze/{session_id}")
            .to(ws_maze)
    );
}

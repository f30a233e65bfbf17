//! Main entry point for the maze backend.
//!
//! Initializes logging and the actor system, then launches the HTTP server with
//! REST and WebSocket endpoints for maze sessions. Run with `--demo` to play a
//! maze in the terminal instead.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;
use server::maze_session::server::MazeSessionManager;

pub mod config;
mod server;
mod game;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    if std::env::args().skip(1).any(|arg| arg == "--demo") {
        return game::demo::run_game_loop();
    }

    // Start the MazeSessionManager actor (owns every hosted maze).
    let session_manager = MazeSessionManager::new().start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(session_manager));

    let (host, port) = config::server::bind_address();
    info!("[Main] Listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .wrap(actix_web::middleware::Logger::default())
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((host, port))?
    .run()
    .await
}

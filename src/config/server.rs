/// HTTP server configuration.
/// 
/// Defaults can be overridden with the `MAZE_HOST` and `MAZE_PORT` environment variables.
use log::warn;

/// Default interface the HTTP server binds to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port the HTTP server listens on.
pub const DEFAULT_PORT: u16 = 8080;

/// Resolve the bind address from the environment, falling back to the defaults.
pub fn bind_address() -> (String, u16) {
    let host = std::env::var("MAZE_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = match std::env::var("MAZE_PORT") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("[Config] Ignoring invalid MAZE_PORT={raw}, using {DEFAULT_PORT}");
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    };
    (host, port)
}

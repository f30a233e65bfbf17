/// Main configuration module.
/// 
/// Re-exports submodules for maze, server and anti-spam configuration.
pub mod anti_spam;
pub mod maze;
pub mod server;

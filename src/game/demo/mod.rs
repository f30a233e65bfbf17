// Demo module for the maze. Provides an interactive terminal loop for playing
// a single maze locally.
pub mod game_loop;

pub use game_loop::run_game_loop;

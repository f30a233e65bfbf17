//! Maze core: grid model, carving, movement and the elapsed-time clock.

pub mod types;
pub mod grid;
pub mod generator;
pub mod state;
pub mod systems;
pub mod demo;

#[cfg(test)]
mod tests;

//! Maze carving.
//!
//! Randomized depth-first search with an explicit stack of cell indices.
//! Each step either carves into an unvisited neighbour of the cell on top of the
//! stack or pops that cell (backtrack). Carving only ever reaches unvisited cells,
//! so the passages form a spanning tree: one simple path between any two cells.

use log::debug;
use rand::Rng;

use crate::game::grid::Grid;
use crate::game::types::{Direction, Position};

/// Carve a perfect maze into a freshly created (fully walled, unvisited) grid,
/// starting from the origin. Returns the number of wall pairs carved.
pub fn carve_maze<R: Rng>(grid: &mut Grid, rng: &mut R) -> usize {
    let mut carved = 0;
    let mut stack: Vec<usize> = Vec::with_capacity(grid.len());

    let Some(origin) = grid.index(Position::ORIGIN) else {
        return 0;
    };
    grid.mark_visited(origin);
    stack.push(origin);

    while let Some(&top) = stack.last() {
        let current = grid.cell_at(top).pos;
        let candidates = unvisited_neighbors(grid, current);

        if candidates.is_empty() {
            stack.pop();
            continue;
        }

        let direction = candidates[rng.random_range(0..candidates.len())];
        if let Some(next) = grid.carve(current, direction) {
            if let Some(next_idx) = grid.index(next) {
                grid.mark_visited(next_idx);
                stack.push(next_idx);
                carved += 1;
            }
        }
    }

    debug_assert_eq!(grid.carved_edges(), carved);
    debug_assert!(grid.walls_are_paired());
    debug!(
        "[Generator] Carved {}x{} maze with {} passages",
        grid.width(),
        grid.height(),
        carved
    );
    carved
}

/// Directions from `pos` leading to in-bounds cells not yet visited, in
/// up, right, down, left order.
fn unvisited_neighbors(grid: &Grid, pos: Position) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|d| {
            grid.neighbor(pos, *d)
                .and_then(|n| grid.cell(n))
                .is_some_and(|cell| !cell.visited)
        })
        .collect()
}

//! Maze grid: a flat arena of cells addressed by `x + y * width`.
//!
//! Walls are only ever cleared through [`Grid::carve`], which clears both sides of
//! a shared edge together, so two neighbours always agree on the wall between them.

use std::collections::VecDeque;

use serde::{Serialize, Deserialize};

use crate::game::types::{Cell, Direction, MazeError, Position};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a fully walled, unvisited grid.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::new(Position { x, y })))
            .collect();
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.x + pos.y * self.width)
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub(crate) fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub(crate) fn mark_visited(&mut self, index: usize) {
        self.cells[index].visited = true;
    }

    /// The in-bounds neighbour of `pos` in `direction`, if any.
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        let next = match direction {
            Direction::Up => Position { x: pos.x, y: pos.y.checked_sub(1)? },
            Direction::Right => Position { x: pos.x + 1, y: pos.y },
            Direction::Down => Position { x: pos.x, y: pos.y + 1 },
            Direction::Left => Position { x: pos.x.checked_sub(1)?, y: pos.y },
        };
        self.contains(next).then_some(next)
    }

    /// True when movement from `pos` in `direction` is blocked. Out-of-bounds
    /// positions count as fully walled.
    pub fn has_wall(&self, pos: Position, direction: Direction) -> bool {
        self.cell(pos).map_or(true, |cell| cell.has_wall(direction))
    }

    /// Clear the wall pair between `from` and its neighbour in `direction`.
    /// Returns the neighbour, or `None` when it would fall outside the grid.
    pub fn carve(&mut self, from: Position, direction: Direction) -> Option<Position> {
        let to = self.neighbor(from, direction)?;
        let (a, b) = (self.index(from)?, self.index(to)?);
        self.cells[a].walls[direction.wall_index()] = false;
        self.cells[b].walls[direction.opposite().wall_index()] = false;
        Some(to)
    }

    /// Number of cleared wall pairs. A perfect maze has exactly `len() - 1`.
    pub fn carved_edges(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                // Count each shared edge once, from its left/top cell.
                [Direction::Right, Direction::Down]
                    .iter()
                    .filter(|d| self.neighbor(cell.pos, **d).is_some() && !cell.has_wall(**d))
                    .count()
            })
            .sum()
    }

    /// True when every pair of neighbours agrees on the wall between them.
    pub fn walls_are_paired(&self) -> bool {
        self.cells.iter().all(|cell| {
            Direction::ALL.iter().all(|d| match self.neighbor(cell.pos, *d) {
                Some(n) => self.has_wall(n, d.opposite()) == cell.has_wall(*d),
                None => true,
            })
        })
    }

    /// Breadth-first distances through carved passages from `start`.
    /// Unreachable cells are `None`.
    pub fn distances_from(&self, start: Position) -> Vec<Option<usize>> {
        let mut dist = vec![None; self.cells.len()];
        let Some(start_idx) = self.index(start) else {
            return dist;
        };
        dist[start_idx] = Some(0);
        let mut queue = VecDeque::from([start]);

        while let Some(pos) = queue.pop_front() {
            let here = dist[pos.x + pos.y * self.width].unwrap_or(0);
            for d in Direction::ALL {
                if self.has_wall(pos, d) {
                    continue;
                }
                if let Some(next) = self.neighbor(pos, d) {
                    let idx = next.x + next.y * self.width;
                    if dist[idx].is_none() {
                        dist[idx] = Some(here + 1);
                        queue.push_back(next);
                    }
                }
            }
        }
        dist
    }

    /// Number of steps on the unique path between two cells, if connected.
    pub fn path_length(&self, from: Position, to: Position) -> Option<usize> {
        let idx = self.index(to)?;
        self.distances_from(from)[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_generation_size() {
        let grid = Grid::new(10, 7).unwrap();
        assert_eq!(grid.len(), 70);
        assert_eq!(grid.cell(Position::new(9, 6)).unwrap().pos, Position::new(9, 6));
        assert!(grid.cell(Position::new(10, 0)).is_none());
        assert_eq!(grid.carved_edges(), 0);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 5).unwrap_err(),
            MazeError::InvalidDimensions { width: 0, height: 5 }
        );
        assert!(Grid::new(3, 0).is_err());
    }

    #[test]
    fn test_index_is_row_major() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.index(Position::new(0, 0)), Some(0));
        assert_eq!(grid.index(Position::new(3, 0)), Some(3));
        assert_eq!(grid.index(Position::new(1, 2)), Some(9));
        assert_eq!(grid.index(Position::new(4, 2)), None);
    }

    #[test]
    fn test_neighbor_is_bounds_checked() {
        let grid = Grid::new(3, 3).unwrap();
        let origin = Position::ORIGIN;
        assert_eq!(grid.neighbor(origin, Direction::Up), None);
        assert_eq!(grid.neighbor(origin, Direction::Left), None);
        assert_eq!(grid.neighbor(origin, Direction::Right), Some(Position::new(1, 0)));
        assert_eq!(grid.neighbor(origin, Direction::Down), Some(Position::new(0, 1)));
        assert_eq!(grid.neighbor(Position::new(2, 2), Direction::Right), None);
    }

    #[test]
    fn test_carve_clears_both_sides() {
        let mut grid = Grid::new(3, 3).unwrap();
        let center = Position::new(1, 1);

        for d in Direction::ALL {
            let n = grid.carve(center, d).unwrap();
            assert!(!grid.has_wall(center, d));
            assert!(!grid.has_wall(n, d.opposite()));
        }
        assert!(grid.walls_are_paired());
        assert_eq!(grid.carved_edges(), 4);
    }

    #[test]
    fn test_carve_out_of_bounds_is_rejected() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert_eq!(grid.carve(Position::ORIGIN, Direction::Up), None);
        assert!(grid.has_wall(Position::ORIGIN, Direction::Up));
        assert_eq!(grid.carved_edges(), 0);
    }

    #[test]
    fn test_distances_follow_passages() {
        let mut grid = Grid::new(3, 1).unwrap();
        grid.carve(Position::ORIGIN, Direction::Right);
        let dist = grid.distances_from(Position::ORIGIN);
        assert_eq!(dist, vec![Some(0), Some(1), None]);
        assert_eq!(grid.path_length(Position::ORIGIN, Position::new(2, 0)), None);

        grid.carve(Position::new(1, 0), Direction::Right);
        assert_eq!(grid.path_length(Position::ORIGIN, Position::new(2, 0)), Some(2));
    }
}

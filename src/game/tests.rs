use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::game::state::MazeState;
use crate::game::types::{Direction, MazeStatus, MoveOutcome, Position};

fn maze(width: usize, height: usize, seed: u64) -> MazeState {
    MazeState::generate(width, height, &mut StdRng::seed_from_u64(seed)).unwrap()
}

/// Directions to walk from the agent to the goal along carved passages.
fn solution(state: &MazeState) -> Vec<Direction> {
    let dist = state.grid.distances_from(state.goal);
    let mut pos = state.player;
    let mut path = Vec::new();
    while pos != state.goal {
        let here = dist[state.grid.index(pos).unwrap()].unwrap();
        let step = Direction::ALL
            .into_iter()
            .find(|d| {
                !state.grid.has_wall(pos, *d)
                    && state
                        .grid
                        .neighbor(pos, *d)
                        .and_then(|n| dist[state.grid.index(n).unwrap()])
                        == Some(here - 1)
            })
            .unwrap();
        pos = state.grid.neighbor(pos, step).unwrap();
        path.push(step);
    }
    path
}

#[test]
fn test_generated_maze_is_spanning_tree() {
    for seed in 0..20 {
        let state = maze(15, 15, seed);
        let dist = state.grid.distances_from(Position::ORIGIN);
        assert!(dist.iter().all(Option::is_some), "seed {seed} left unreachable cells");
        assert_eq!(state.grid.carved_edges(), state.grid.len() - 1);
    }
}

#[test]
fn test_non_square_mazes_are_connected() {
    for (w, h) in [(1, 8), (8, 1), (3, 11), (20, 4)] {
        let state = maze(w, h, 5);
        assert_eq!(state.grid.carved_edges(), w * h - 1);
        assert!(state.remaining_steps().is_some());
    }
}

#[test]
fn test_walls_stay_paired_after_moves() {
    let mut state = maze(10, 10, 11);
    assert!(state.grid.walls_are_paired());
    for (i, d) in Direction::ALL.iter().cycle().take(200).enumerate() {
        state.apply_move(*d);
        if i % 7 == 0 {
            state.apply_move(d.opposite());
        }
        assert!(state.grid.walls_are_paired());
    }
}

#[test]
fn test_move_into_wall_keeps_position() {
    let mut state = maze(8, 8, 21);
    for y in 0..8 {
        for x in 0..8 {
            let pos = Position::new(x, y);
            for d in Direction::ALL {
                if !state.grid.has_wall(pos, d) {
                    continue;
                }
                state.player = pos;
                state.status = MazeStatus::Active;
                assert_eq!(state.apply_move(d), MoveOutcome::Blocked);
                assert_eq!(state.player, pos);
            }
        }
    }
}

#[test]
fn test_move_through_passage_reaches_neighbor() {
    let mut state = maze(8, 8, 22);
    for y in 0..8 {
        for x in 0..8 {
            let pos = Position::new(x, y);
            for d in Direction::ALL {
                if state.grid.has_wall(pos, d) {
                    continue;
                }
                state.player = pos;
                state.status = MazeStatus::Active;
                let outcome = state.apply_move(d);
                let expected = state.grid.neighbor(pos, d).unwrap();
                assert_eq!(state.player, expected);
                let expected_outcome = if expected == state.goal { MoveOutcome::Solved } else { MoveOutcome::Moved };
                assert_eq!(outcome, expected_outcome);
            }
        }
    }
}

#[test]
fn test_reaching_goal_solves_and_freezes() {
    let mut state = maze(15, 15, 3);
    assert_eq!(state.status, MazeStatus::Active);
    assert!(state.tick());
    assert!(state.tick());

    let path = solution(&state);
    let (last, rest) = path.split_last().unwrap();
    for d in rest {
        assert_eq!(state.apply_move(*d), MoveOutcome::Moved);
    }
    assert_eq!(state.apply_move(*last), MoveOutcome::Solved);
    assert!(state.is_solved());
    assert_eq!(state.player, state.goal);

    for d in Direction::ALL {
        assert_eq!(state.apply_move(d), MoveOutcome::Ignored);
        assert_eq!(state.player, state.goal);
    }
    assert!(!state.tick());
    assert_eq!(state.elapsed_secs, 2);
}

#[test]
fn test_regenerate_resets_solved_maze() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut state = MazeState::generate(6, 6, &mut rng).unwrap();
    state.tick();
    for d in solution(&state) {
        state.apply_move(d);
    }
    assert!(state.is_solved());

    state.regenerate(&mut rng).unwrap();
    assert_eq!(state.status, MazeStatus::Active);
    assert_eq!(state.player, Position::ORIGIN);
    assert_eq!(state.goal, Position::new(5, 5));
    assert_eq!(state.elapsed_secs, 0);
    assert_eq!(state.grid.carved_edges(), 35);
}

#[test]
fn test_two_by_one_maze() {
    for seed in 0..10 {
        let mut state = maze(2, 1, seed);
        assert_eq!(state.goal, Position::new(1, 0));
        for d in [Direction::Up, Direction::Down, Direction::Left] {
            assert_eq!(state.apply_move(d), MoveOutcome::Blocked);
            assert_eq!(state.player, Position::ORIGIN);
        }
        assert_eq!(state.apply_move(Direction::Right), MoveOutcome::Solved);
        assert!(state.is_solved());
    }
}

#[test]
fn test_one_by_one_maze_is_solved_immediately() {
    let mut state = maze(1, 1, 0);
    assert!(state.is_solved());
    assert_eq!(state.grid.carved_edges(), 0);
    assert_eq!(state.player, state.goal);
    assert!(!state.tick());
    assert_eq!(state.elapsed_secs, 0);
}

#[test]
fn test_zero_sized_maze_is_rejected() {
    assert!(MazeState::generate(0, 0, &mut StdRng::seed_from_u64(0)).is_err());
}

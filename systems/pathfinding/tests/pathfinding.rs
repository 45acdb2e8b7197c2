use std::collections::VecDeque;

use proptest::prelude::*;
use retro_tactics_core::{CellCoord, BOARD_SIZE};
use retro_tactics_system_pathfinding::{find_path, OccupancyGrid};

fn breadth_first_steps(grid: &OccupancyGrid, start: CellCoord, goal: CellCoord) -> Option<usize> {
    let mut seen = vec![false; (BOARD_SIZE * BOARD_SIZE) as usize];
    let mut queue = VecDeque::from([(start, 0usize)]);
    seen[(start.row() * BOARD_SIZE + start.column()) as usize] = true;

    while let Some((cell, steps)) = queue.pop_front() {
        if cell == goal {
            return Some(steps);
        }
        for dr in -1i32..=1 {
            for dc in -1i32..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let row = cell.row() as i32 + dr;
                let column = cell.column() as i32 + dc;
                if row < 0 || column < 0 || row >= BOARD_SIZE as i32 || column >= BOARD_SIZE as i32 {
                    continue;
                }
                let next = CellCoord::new(row as u32, column as u32);
                let slot = (next.row() * BOARD_SIZE + next.column()) as usize;
                if seen[slot] || grid.is_blocked(next) {
                    continue;
                }
                seen[slot] = true;
                queue.push_back((next, steps + 1));
            }
        }
    }
    None
}

fn assert_king_steps(path: &[CellCoord], grid: &OccupancyGrid) {
    for pair in path.windows(2) {
        let rows = pair[0].row().abs_diff(pair[1].row());
        let columns = pair[0].column().abs_diff(pair[1].column());
        assert!(rows <= 1 && columns <= 1 && rows + columns > 0);
    }
    for waypoint in &path[1..] {
        assert!(!grid.is_blocked(*waypoint));
    }
}

#[test]
fn detours_around_a_wall_with_a_single_gap() {
    let mut grid = OccupancyGrid::new();
    for row in 0..7 {
        grid.block(CellCoord::new(row, 4));
    }

    let start = CellCoord::new(0, 0);
    let goal = CellCoord::new(0, 7);
    let path = find_path(&grid, start, goal).expect("gap at the bottom");

    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    assert!(path.contains(&CellCoord::new(7, 4)));
    assert_eq!(path.len() - 1, breadth_first_steps(&grid, start, goal).expect("reachable"));
    assert_king_steps(&path, &grid);
}

#[test]
fn fully_enclosed_goal_has_no_path() {
    let mut grid = OccupancyGrid::new();
    let goal = CellCoord::new(4, 4);
    for row in 3..=5 {
        for column in 3..=5 {
            if row != 4 || column != 4 {
                grid.block(CellCoord::new(row, column));
            }
        }
    }

    assert_eq!(find_path(&grid, CellCoord::new(0, 0), goal), None);
}

#[test]
fn repeated_searches_return_identical_paths() {
    let mut grid = OccupancyGrid::new();
    grid.block(CellCoord::new(3, 3));
    grid.block(CellCoord::new(3, 4));

    let first = find_path(&grid, CellCoord::new(0, 3), CellCoord::new(6, 4));
    let second = find_path(&grid, CellCoord::new(0, 3), CellCoord::new(6, 4));

    assert!(first.is_some());
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn paths_are_as_short_as_breadth_first_search(
        walls in proptest::collection::vec((0u32..8, 0u32..8), 0..24),
        start in (0u32..8, 0u32..8),
        goal in (0u32..8, 0u32..8),
    ) {
        let start = CellCoord::new(start.0, start.1);
        let goal = CellCoord::new(goal.0, goal.1);
        let mut grid = OccupancyGrid::new();
        for (row, column) in walls {
            grid.block(CellCoord::new(row, column));
        }
        grid.unblock(start);

        let expected = breadth_first_steps(&grid, start, goal);
        match find_path(&grid, start, goal) {
            Some(path) => {
                prop_assert_eq!(Some(path.len() - 1), expected);
                prop_assert_eq!(path.first(), Some(&start));
                prop_assert_eq!(path.last(), Some(&goal));
                assert_king_steps(&path, &grid);
            }
            None => prop_assert_eq!(expected, None),
        }
    }
}

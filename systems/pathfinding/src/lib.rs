#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shortest-path search over the board's king-move graph.
//!
//! Paths are computed with A* using unit step costs and the Chebyshev
//! distance as heuristic. The heuristic is admissible and consistent for
//! 8-way movement, so the first time the goal leaves the open set its path is
//! a shortest one. Ties are broken by f-score, then h-score, then insertion
//! order, which keeps the result reproducible across runs.

use std::{cmp::Reverse, collections::BinaryHeap};

use retro_tactics_core::{geometry, CellCoord, CellIndex, BOARD_SIZE, CELL_COUNT};

const CELLS: usize = CELL_COUNT as usize;

/// Offsets visited around every expanded cell, in a fixed order.
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Traversability of every board cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    blocked: [bool; CELLS],
}

impl OccupancyGrid {
    /// Creates a grid where every cell is traversable.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocked: [false; CELLS],
        }
    }

    /// Builds the grid an approaching character sees: every occupied cell is
    /// blocked except the mover's own cell and the cell of its target.
    #[must_use]
    pub fn for_approach<I>(occupied: I, start: CellIndex, goal: CellIndex) -> Self
    where
        I: IntoIterator<Item = CellIndex>,
    {
        let mut grid = Self::new();
        for cell in occupied {
            grid.block(geometry::coord_of(cell));
        }
        grid.unblock(geometry::coord_of(start));
        grid.unblock(geometry::coord_of(goal));
        grid
    }

    /// Marks a cell as impassable. Off-board coordinates are ignored.
    pub fn block(&mut self, coord: CellCoord) {
        if let Some(slot) = slot(coord) {
            self.blocked[slot] = true;
        }
    }

    /// Marks a cell as traversable again. Off-board coordinates are ignored.
    pub fn unblock(&mut self, coord: CellCoord) {
        if let Some(slot) = slot(coord) {
            self.blocked[slot] = false;
        }
    }

    /// Whether the coordinate is off the board or marked impassable.
    #[must_use]
    pub fn is_blocked(&self, coord: CellCoord) -> bool {
        slot(coord).map_or(true, |slot| self.blocked[slot])
    }
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds a shortest 8-way path from `start` to `goal`.
///
/// The returned path includes both endpoints. `start` is always allowed to be
/// occupied by the mover; `None` is returned when the goal is blocked, off the
/// board, or unreachable.
#[must_use]
pub fn find_path(
    grid: &OccupancyGrid,
    start: CellCoord,
    goal: CellCoord,
) -> Option<Vec<CellCoord>> {
    let start_slot = slot(start)?;
    let goal_slot = slot(goal)?;
    if start_slot == goal_slot {
        return Some(vec![start]);
    }
    if grid.blocked[goal_slot] {
        return None;
    }

    let mut g_scores = [u32::MAX; CELLS];
    let mut came_from: [Option<usize>; CELLS] = [None; CELLS];
    let mut closed = [false; CELLS];
    let mut open = BinaryHeap::new();
    let mut sequence: u64 = 0;

    g_scores[start_slot] = 0;
    let h = heuristic(start, goal);
    open.push(Reverse((h, h, sequence, start_slot)));

    while let Some(Reverse((_, _, _, current))) = open.pop() {
        if current == goal_slot {
            return Some(reconstruct_path(&came_from, current));
        }
        if closed[current] {
            continue;
        }
        closed[current] = true;

        let current_coord = coord(current);
        let next_g = g_scores[current].saturating_add(1);

        for neighbour in neighbours(current_coord) {
            let Some(neighbour_slot) = slot(neighbour) else {
                continue;
            };
            if grid.blocked[neighbour_slot] || closed[neighbour_slot] {
                continue;
            }
            if next_g >= g_scores[neighbour_slot] {
                continue;
            }

            g_scores[neighbour_slot] = next_g;
            came_from[neighbour_slot] = Some(current);
            sequence += 1;
            let h = heuristic(neighbour, goal);
            open.push(Reverse((next_g + h, h, sequence, neighbour_slot)));
        }
    }

    None
}

fn reconstruct_path(came_from: &[Option<usize>; CELLS], mut current: usize) -> Vec<CellCoord> {
    let mut path = vec![coord(current)];
    while let Some(previous) = came_from[current] {
        path.push(coord(previous));
        current = previous;
    }
    path.reverse();
    path
}

fn heuristic(from: CellCoord, to: CellCoord) -> u32 {
    from.row()
        .abs_diff(to.row())
        .max(from.column().abs_diff(to.column()))
}

fn neighbours(cell: CellCoord) -> impl Iterator<Item = CellCoord> {
    NEIGHBOUR_OFFSETS.into_iter().filter_map(move |(dr, dc)| {
        let row = cell.row().checked_add_signed(dr)?;
        let column = cell.column().checked_add_signed(dc)?;
        if row >= BOARD_SIZE || column >= BOARD_SIZE {
            return None;
        }
        Some(CellCoord::new(row, column))
    })
}

fn slot(coord: CellCoord) -> Option<usize> {
    geometry::index_of(coord).and_then(|cell| usize::try_from(cell.get()).ok())
}

fn coord(slot: usize) -> CellCoord {
    let value = u32::try_from(slot).unwrap_or(0);
    CellCoord::new(value / BOARD_SIZE, value % BOARD_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_equal_to_goal_is_a_single_waypoint() {
        let grid = OccupancyGrid::new();
        let cell = CellCoord::new(4, 4);

        assert_eq!(find_path(&grid, cell, cell), Some(vec![cell]));
    }

    #[test]
    fn diagonal_path_uses_king_moves() {
        let grid = OccupancyGrid::new();
        let path = find_path(&grid, CellCoord::new(0, 0), CellCoord::new(7, 7)).expect("path");

        assert_eq!(path.len(), 8);
        for (step, waypoint) in path.iter().enumerate() {
            let step = u32::try_from(step).expect("small");
            assert_eq!(*waypoint, CellCoord::new(step, step));
        }
    }

    #[test]
    fn blocked_goal_is_unreachable() {
        let mut grid = OccupancyGrid::new();
        grid.block(CellCoord::new(2, 2));

        assert_eq!(find_path(&grid, CellCoord::new(0, 0), CellCoord::new(2, 2)), None);
    }

    #[test]
    fn off_board_coordinates_count_as_blocked() {
        let grid = OccupancyGrid::new();

        assert!(grid.is_blocked(CellCoord::new(8, 0)));
        assert_eq!(find_path(&grid, CellCoord::new(0, 0), CellCoord::new(0, 9)), None);
    }

    #[test]
    fn unblock_restores_traversal() {
        let mut grid = OccupancyGrid::new();
        let cell = CellCoord::new(3, 5);
        grid.block(cell);
        assert!(grid.is_blocked(cell));
        grid.unblock(cell);
        assert!(!grid.is_blocked(cell));
    }

    #[test]
    fn approach_grid_frees_start_and_goal() {
        let occupied = [0, 9, 18, 27]
            .into_iter()
            .map(|value| CellIndex::new(value).expect("cell on board"));
        let start = CellIndex::new(0).expect("cell on board");
        let goal = CellIndex::new(27).expect("cell on board");
        let grid = OccupancyGrid::for_approach(occupied, start, goal);

        assert!(!grid.is_blocked(CellCoord::new(0, 0)));
        assert!(grid.is_blocked(CellCoord::new(1, 1)));
        assert!(grid.is_blocked(CellCoord::new(2, 2)));
        assert!(!grid.is_blocked(CellCoord::new(3, 3)));
    }
}

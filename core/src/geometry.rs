//! Board geometry: the index/coordinate bijection and Chebyshev range queries.
//!
//! Every other crate converts between [`CellIndex`] and [`CellCoord`] through
//! this module so the row-major layout is defined exactly once.

use crate::{CellCoord, CellIndex, BOARD_SIZE};

/// Converts a linear cell index into its row and column.
#[must_use]
pub const fn coord_of(index: CellIndex) -> CellCoord {
    CellCoord::new(index.get() / BOARD_SIZE, index.get() % BOARD_SIZE)
}

/// Converts a coordinate back into a linear cell index.
///
/// Returns `None` when the coordinate lies outside the board.
#[must_use]
pub const fn index_of(coord: CellCoord) -> Option<CellIndex> {
    if coord.row() >= BOARD_SIZE || coord.column() >= BOARD_SIZE {
        return None;
    }
    CellIndex::new(coord.row() * BOARD_SIZE + coord.column())
}

/// Number of king steps separating two cells.
#[must_use]
pub fn chebyshev_distance(from: CellIndex, to: CellIndex) -> u32 {
    let from = coord_of(from);
    let to = coord_of(to);
    from.row()
        .abs_diff(to.row())
        .max(from.column().abs_diff(to.column()))
}

/// Reports whether `target` lies within `radius` steps of `origin`.
///
/// The origin itself is never within range, matching [`range_of`].
#[must_use]
pub fn within_range(origin: CellIndex, target: CellIndex, radius: u32) -> bool {
    let distance = chebyshev_distance(origin, target);
    distance >= 1 && distance <= radius
}

/// Enumerates every on-board cell at Chebyshev distance `1..=radius`.
///
/// The square of side `2 * radius + 1` centred on `index` is clipped to the
/// board and the centre is discarded. Cells are returned in ascending index
/// order; callers treat the result as a set.
#[must_use]
pub fn range_of(index: CellIndex, radius: u32) -> Vec<CellIndex> {
    if radius == 0 {
        return Vec::new();
    }

    let origin = coord_of(index);
    let first_row = origin.row().saturating_sub(radius);
    let last_row = origin.row().saturating_add(radius).min(BOARD_SIZE - 1);
    let first_column = origin.column().saturating_sub(radius);
    let last_column = origin.column().saturating_add(radius).min(BOARD_SIZE - 1);

    let mut cells = Vec::new();
    for row in first_row..=last_row {
        for column in first_column..=last_column {
            let coord = CellCoord::new(row, column);
            if coord == origin {
                continue;
            }
            if let Some(cell) = index_of(coord) {
                cells.push(cell);
            }
        }
    }
    cells
}

/// Start cells for the player roster on a board `size` cells wide.
///
/// The two leftmost columns, walked row by row: `0, 1, size, size + 1, ...`
/// until `2 * size` cells are collected.
#[must_use]
pub fn player_start_cells(size: u32) -> Vec<CellIndex> {
    start_cells(size, 0)
}

/// Start cells for the AI roster: the mirror of [`player_start_cells`]
/// along the two rightmost columns.
#[must_use]
pub fn ai_start_cells(size: u32) -> Vec<CellIndex> {
    start_cells(size, size.saturating_sub(2))
}

fn start_cells(size: u32, first_column: u32) -> Vec<CellIndex> {
    let wanted = usize::try_from(size.saturating_mul(2)).unwrap_or(0);
    let mut cells = Vec::with_capacity(wanted);
    let mut offset = first_column;
    while cells.len() < wanted {
        for value in [offset, offset + 1] {
            if let Some(cell) = CellIndex::new(value) {
                cells.push(cell);
            }
        }
        offset += size;
        if offset >= size.saturating_mul(size) {
            break;
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cell(value: u32) -> CellIndex {
        CellIndex::new(value).expect("cell on board")
    }

    #[test]
    fn index_and_coord_are_inverse_for_every_cell() {
        for index in CellIndex::all() {
            let coord = coord_of(index);
            assert_eq!(index_of(coord), Some(index));
            assert_eq!(coord.row(), index.get() / 8);
            assert_eq!(coord.column(), index.get() % 8);
        }
    }

    #[test]
    fn off_board_coordinates_have_no_index() {
        assert_eq!(index_of(CellCoord::new(8, 0)), None);
        assert_eq!(index_of(CellCoord::new(0, 8)), None);
    }

    #[test]
    fn corner_has_three_neighbours() {
        let neighbours = range_of(cell(0), 1);
        assert_eq!(neighbours, vec![cell(1), cell(8), cell(9)]);
    }

    #[test]
    fn centre_has_eight_neighbours() {
        let centre = index_of(CellCoord::new(3, 3)).expect("centre on board");
        assert_eq!(centre.get(), 27);
        assert_eq!(range_of(centre, 1).len(), 8);
    }

    #[test]
    fn zero_radius_is_empty() {
        assert!(range_of(cell(27), 0).is_empty());
    }

    #[test]
    fn range_reaches_cell_zero() {
        assert!(range_of(cell(9), 1).contains(&cell(0)));
        assert!(within_range(cell(9), cell(0), 1));
    }

    #[test]
    fn large_radius_covers_whole_board_but_origin() {
        let cells = range_of(cell(36), 7);
        assert_eq!(cells.len(), 63);
        assert!(!cells.contains(&cell(36)));
    }

    #[test]
    fn start_pools_follow_the_outer_columns() {
        let player = player_start_cells(BOARD_SIZE);
        let ai = ai_start_cells(BOARD_SIZE);

        assert_eq!(player.len(), 16);
        assert_eq!(ai.len(), 16);
        assert_eq!(&player[..4], &[cell(0), cell(1), cell(8), cell(9)]);
        assert_eq!(&ai[..4], &[cell(6), cell(7), cell(14), cell(15)]);
        assert!(player.iter().all(|cell| coord_of(*cell).column() < 2));
        assert!(ai.iter().all(|cell| coord_of(*cell).column() >= 6));
    }

    proptest! {
        #[test]
        fn range_never_contains_origin_or_strays(index in 0u32..64, radius in 0u32..9) {
            let origin = cell(index);
            let cells = range_of(origin, radius);
            prop_assert!(!cells.contains(&origin));
            for candidate in &cells {
                let coord = coord_of(*candidate);
                prop_assert!(coord.row() < 8 && coord.column() < 8);
                prop_assert!(within_range(origin, *candidate, radius));
            }
        }

        #[test]
        fn range_agrees_with_distance(origin in 0u32..64, target in 0u32..64, radius in 0u32..9) {
            let origin = cell(origin);
            let target = cell(target);
            let listed = range_of(origin, radius).contains(&target);
            prop_assert_eq!(listed, within_range(origin, target, radius));
        }
    }
}

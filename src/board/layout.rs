//! Serpentine path layout.
//!
//! The path snakes across a grid: odd rows run left to right, even rows
//! right to left, so consecutive cells are always neighbours. Rows and
//! columns are 1-based.

use serde::{Deserialize, Serialize};

use crate::core::MAX_BOARD_CELLS;

/// Row/column of a cell on the grid, both 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub column: usize,
}

impl GridPos {
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Grid coordinates of every path index, in path order.
///
/// ```
/// use rust_quizboard::board::{serpentine_path, GridPos};
///
/// let path = serpentine_path(2, 3);
/// assert_eq!(path[2], GridPos::new(1, 3));
/// assert_eq!(path[3], GridPos::new(2, 3));
/// assert_eq!(path[5], GridPos::new(2, 1));
/// ```
#[must_use]
pub fn serpentine_path(rows: usize, columns: usize) -> Vec<GridPos> {
    let mut path = Vec::with_capacity(rows.saturating_mul(columns).min(MAX_BOARD_CELLS));
    for row in 1..=rows {
        if row % 2 == 1 {
            path.extend((1..=columns).map(|column| GridPos::new(row, column)));
        } else {
            path.extend((1..=columns).rev().map(|column| GridPos::new(row, column)));
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_grid_length() {
        let path = serpentine_path(6, 8);
        assert_eq!(path.len(), 48);
        assert_eq!(path[0], GridPos::new(1, 1));
        assert_eq!(path[7], GridPos::new(1, 8));
        assert_eq!(path[8], GridPos::new(2, 8));
        assert_eq!(path[47], GridPos::new(6, 1));
    }

    #[test]
    fn test_consecutive_cells_are_adjacent() {
        let path = serpentine_path(5, 7);
        for pair in path.windows(2) {
            let dr = pair[0].row.abs_diff(pair[1].row);
            let dc = pair[0].column.abs_diff(pair[1].column);
            assert_eq!(dr + dc, 1, "{:?} -> {:?}", pair[0], pair[1]);
        }
    }
}

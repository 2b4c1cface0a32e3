//! Grid geometry: dimensions, coordinate/index mapping, neighbor enumeration

use super::EngineError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Fixed rectangular grid addressed by row-major cell index.
///
/// Pure geometry: the model knows nothing about liveness. The grid is
/// bounded, not toroidal, so neighbor enumeration never wraps across a
/// row or column edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridModel {
    num_columns: usize,
    num_rows: usize,
}

impl GridModel {
    /// Create a grid model with positive dimensions
    pub fn new(num_columns: usize, num_rows: usize) -> Result<Self, EngineError> {
        if num_columns == 0 || num_rows == 0 {
            return Err(EngineError::InvalidDimensions {
                num_columns,
                num_rows,
            });
        }
        Ok(Self {
            num_columns,
            num_rows,
        })
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn total_cells(&self) -> usize {
        self.num_columns * self.num_rows
    }

    /// Convert 2D coordinates to a row-major cell index
    #[inline]
    pub fn index_of(&self, row: usize, column: usize) -> usize {
        row * self.num_columns + column
    }

    #[inline]
    pub fn row_of(&self, index: usize) -> usize {
        index / self.num_columns
    }

    #[inline]
    pub fn column_of(&self, index: usize) -> usize {
        index % self.num_columns
    }

    /// In-bounds Moore neighborhood of a cell, up to 8 indices.
    ///
    /// Edge cells get a truncated neighborhood; the rightmost column's right
    /// neighbor is excluded rather than wrapped to the next row.
    ///
    /// Panics if `index` is outside the grid.
    pub fn neighbors_of(&self, index: usize) -> Vec<usize> {
        self.assert_in_bounds(index);

        let row = self.row_of(index) as isize;
        let column = self.column_of(index) as isize;

        (-1isize..=1)
            .cartesian_product(-1isize..=1)
            .filter(|&offset| offset != (0, 0))
            .filter_map(|(row_offset, column_offset)| {
                self.checked_index(row + row_offset, column + column_offset)
            })
            .collect()
    }

    /// In-bounds orthogonal (up/down/left/right) neighbors of a cell.
    ///
    /// Used by cell drift, which moves cells in "normal" space only — no
    /// diagonals, no wrapping.
    ///
    /// Panics if `index` is outside the grid.
    pub fn orthogonal_neighbors_of(&self, index: usize) -> Vec<usize> {
        self.assert_in_bounds(index);

        let row = self.row_of(index) as isize;
        let column = self.column_of(index) as isize;

        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .iter()
            .filter_map(|&(row_offset, column_offset)| {
                self.checked_index(row + row_offset, column + column_offset)
            })
            .collect()
    }

    fn checked_index(&self, row: isize, column: isize) -> Option<usize> {
        let in_bounds = row >= 0
            && row < self.num_rows as isize
            && column >= 0
            && column < self.num_columns as isize;
        in_bounds.then(|| self.index_of(row as usize, column as usize))
    }

    fn assert_in_bounds(&self, index: usize) {
        assert!(
            index < self.total_cells(),
            "cell index {} out of range for {}x{} grid",
            index,
            self.num_columns,
            self.num_rows
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_dimensions() {
        assert!(GridModel::new(0, 5).is_err());
        assert!(GridModel::new(5, 0).is_err());
        assert!(GridModel::new(1, 1).is_ok());
    }

    #[test]
    fn test_index_round_trip() {
        let grid = GridModel::new(4, 3).unwrap();
        let index = grid.index_of(2, 1);
        assert_eq!(index, 9);
        assert_eq!(grid.row_of(index), 2);
        assert_eq!(grid.column_of(index), 1);
    }

    #[test]
    fn test_interior_cell_has_eight_neighbors() {
        let grid = GridModel::new(3, 3).unwrap();
        let mut neighbors = grid.neighbors_of(4);
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec![0, 1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn test_corner_cell_has_three_neighbors() {
        let grid = GridModel::new(3, 3).unwrap();
        let mut neighbors = grid.neighbors_of(0);
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec![1, 3, 4]);
    }

    #[test]
    fn test_row_edge_does_not_wrap() {
        // Rightmost cell of the first row on a 4-wide grid. Index 4 (start
        // of the next row) is adjacent numerically but not geometrically.
        let grid = GridModel::new(4, 3).unwrap();
        let neighbors = grid.neighbors_of(3);
        assert!(!neighbors.contains(&4));
        let mut sorted = neighbors;
        sorted.sort_unstable();
        assert_eq!(sorted, vec![2, 6, 7]);
    }

    #[test]
    fn test_orthogonal_neighbors_exclude_diagonals() {
        let grid = GridModel::new(3, 3).unwrap();
        let mut neighbors = grid.orthogonal_neighbors_of(4);
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec![1, 3, 5, 7]);

        let mut corner = grid.orthogonal_neighbors_of(0);
        corner.sort_unstable();
        assert_eq!(corner, vec![1, 3]);
    }

    #[test]
    fn test_single_cell_grid_has_no_neighbors() {
        let grid = GridModel::new(1, 1).unwrap();
        assert!(grid.neighbors_of(0).is_empty());
        assert!(grid.orthogonal_neighbors_of(0).is_empty());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_index_panics() {
        let grid = GridModel::new(2, 2).unwrap();
        grid.neighbors_of(4);
    }
}

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::types::saturate;
use crate::*;

/// Match-3 board.
pub type Board = Grid<Cell>;

/// Fixed-size row-major grid shared by both games.
///
/// Accessors taking coordinates never panic: out-of-range positions read as `None` and
/// writes to them are ignored, so boundary scans need no special casing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    cells: Array2<T>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }
}

impl<T: Copy> Grid<T> {
    pub fn from_elem(size: Coord2, value: T) -> Self {
        Self {
            cells: Array2::from_elem(size.to_nd_index(), value),
        }
    }

    pub fn from_fn(size: Coord2, mut f: impl FnMut(Coord2) -> T) -> Self {
        Self {
            cells: Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
                f((row as Coord, col as Coord))
            }),
        }
    }

    /// Builds a grid from explicit rows, which must be non-empty and of equal length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if height == 0 || width == 0 || height > Coord::MAX.into() || width > Coord::MAX.into() {
            return Err(GameError::InvalidBoardShape);
        }

        let mut flat = Vec::with_capacity(height * width);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GameError::InvalidBoardShape);
            }
            flat.extend_from_slice(row);
        }

        let cells = Array2::from_shape_vec((height, width), flat)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { cells })
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (saturate(rows), saturate(cols))
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn in_bounds(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.in_bounds(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<T> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn set(&mut self, coords: Coord2, value: T) -> bool {
        match self.cells.get_mut(coords.to_nd_index()) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Exchanges two cells; a no-op returning `false` unless both are in bounds.
    pub fn swap(&mut self, a: Coord2, b: Coord2) -> bool {
        if !self.in_bounds(a) || !self.in_bounds(b) {
            return false;
        }
        self.cells.swap(a.to_nd_index(), b.to_nd_index());
        true
    }

    /// All coordinates in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<T> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.cells.iter().copied()
    }

    pub(crate) fn as_slice_mut(&mut self) -> Option<&mut [T]> {
        self.cells.as_slice_mut()
    }

    pub fn as_array(&self) -> &Array2<T> {
        &self.cells
    }
}

impl<T: Copy + PartialEq> Grid<T> {
    pub fn position(&self, value: T) -> Option<Coord2> {
        self.iter_coords().find(|&coords| self[coords] == value)
    }
}

impl Grid<Cell> {
    /// Board of plain tiles from rows of kinds.
    pub fn from_kinds<R: AsRef<[Kind]>>(rows: &[R]) -> Result<Self> {
        let rows: Vec<Vec<Cell>> = rows
            .iter()
            .map(|row| row.as_ref().iter().map(|&kind| Cell::Tile(kind)).collect())
            .collect();
        Self::from_rows(&rows)
    }

    pub fn empty_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_empty())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }
}

impl<T> Index<Coord2> for Grid<T> {
    type Output = T;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_access_is_a_no_op() {
        let mut grid: Grid<u8> = Grid::new((3, 3));

        assert_eq!(grid.get((3, 0)), None);
        assert!(!grid.set((0, 3), 7));
        assert!(!grid.swap((0, 0), (5, 5)));
        assert!(grid.iter().all(|value| value == 0));
    }

    #[test]
    fn swap_twice_restores_grid() {
        let mut grid = Grid::from_rows(&[[1u8, 2], [3, 4]]).unwrap();
        let original = grid.clone();

        assert!(grid.swap((0, 0), (0, 1)));
        assert_eq!(grid[(0, 0)], 2);
        assert!(grid.swap((0, 0), (0, 1)));
        assert_eq!(grid, original);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let rows: [&[u8]; 2] = [&[1, 2, 3], &[4, 5]];
        assert_eq!(Grid::from_rows(&rows), Err(GameError::InvalidBoardShape));
        assert_eq!(
            Grid::<u8>::from_rows::<&[u8]>(&[]),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn iter_coords_is_row_major() {
        let grid: Grid<u8> = Grid::new((2, 3));
        let coords: Vec<_> = grid.iter_coords().collect();
        assert_eq!(coords, [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }
}

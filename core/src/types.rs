use ndarray::Array2;

/// Single coordinate axis used for board sides and positions.
pub type Coord = u8;

/// Count type used for cell totals and cleared-tile tallies.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`, row 0 at the top.
pub type Coord2 = (Coord, Coord);

/// Tile kind, an index into the host's tile palette.
pub type Kind = u8;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// True iff `a` and `b` differ by exactly one step along exactly one axis.
pub const fn is_adjacent(a: Coord2, b: Coord2) -> bool {
    let dr = a.0.abs_diff(b.0);
    let dc = a.1.abs_diff(b.1);
    (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let size = (saturate(rows), saturate(cols));
        NeighborIter::new(index, size)
    }
}

pub(crate) fn saturate(len: usize) -> Coord {
    len.try_into().unwrap_or(Coord::MAX)
}

/// Up, down, left, right.
const DISPLACEMENTS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub(crate) fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (dr, dc) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(dr.try_into().ok()?)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(dc.try_into().ok()?)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

/// Orthogonal (4-connected) neighbours of a cell that lie inside the board.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn adjacency_requires_single_axis_step() {
        assert!(is_adjacent((3, 3), (3, 4)));
        assert!(is_adjacent((3, 3), (2, 3)));
        assert!(!is_adjacent((3, 3), (4, 4)));
        assert!(!is_adjacent((3, 3), (3, 3)));
        assert!(!is_adjacent((3, 3), (3, 5)));
    }

    #[test]
    fn corner_has_two_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (4, 4)).collect();
        assert_eq!(neighbors, [(1, 0), (0, 1)]);
    }

    #[test]
    fn interior_has_four_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((2, 2), (4, 4)).collect();
        assert_eq!(neighbors, [(1, 2), (3, 2), (2, 1), (2, 3)]);
    }
}

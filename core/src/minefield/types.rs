/// Single coordinate axis used for board width, height, and cell coordinates.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Linear cell index, `x + y * width`.
pub type Position = CellCount;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Turns board coordinates into the `[x, y]` index used by the `ndarray` grids.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        let (x, y) = self;
        [usize::from(x), usize::from(y)]
    }
}

/// Cell count of a `a` by `b` board, clamped to [`CellCount::MAX`].
pub const fn mult(a: Coord, b: Coord) -> CellCount {
    (a as CellCount).saturating_mul(b as CellCount)
}

/// Converts `(x, y)` into a linear position on a board `width` cells wide.
pub const fn to_position((x, y): Coord2, width: Coord) -> Position {
    x as Position + (y as Position) * (width as Position)
}

/// Converts a linear position back into `(x, y)`.
///
/// The caller must make sure `position` lies on the board, otherwise `y` is truncated.
pub const fn to_coords(position: Position, width: Coord) -> Coord2 {
    let width = width as Position;
    ((position % width) as Coord, (position / width) as Coord)
}

// row above, same row, row below
const NEIGHBOR_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Steps from `(x, y)` by `(dx, dy)`, or `None` when that leaves a `width` by `height` board.
fn offset_within((x, y): Coord2, (dx, dy): (i8, i8), (width, height): Coord2) -> Option<Coord2> {
    let x = x.checked_add_signed(dx).filter(|&x| x < width)?;
    let y = y.checked_add_signed(dy).filter(|&y| y < height)?;
    Some((x, y))
}

/// Cells touching `center` horizontally, vertically or diagonally.
///
/// Cells past the board edge are skipped, the board does not wrap around.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    next_offset: usize,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            next_offset: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = NEIGHBOR_OFFSETS.get(self.next_offset) {
            self.next_offset += 1;
            if let Some(neighbor) = offset_within(self.center, offset, self.bounds) {
                return Some(neighbor);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors_and_no_wraparound() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (8, 8)).collect();

        assert_eq!(neighbors, [(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((3, 4), (8, 8)).count(), 8);
        assert_eq!(NeighborIter::new((7, 4), (8, 8)).count(), 5);
    }

    #[test]
    fn neighbor_relation_is_symmetric() {
        let bounds = (5, 4);
        for ax in 0..bounds.0 {
            for ay in 0..bounds.1 {
                for b in NeighborIter::new((ax, ay), bounds) {
                    assert!(
                        NeighborIter::new(b, bounds).any(|c| c == (ax, ay)),
                        "{:?} lists {:?} but not the other way around",
                        (ax, ay),
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn position_conversion_matches_row_major_layout() {
        assert_eq!(to_position((0, 0), 8), 0);
        assert_eq!(to_position((7, 0), 8), 7);
        assert_eq!(to_position((0, 1), 8), 8);
        assert_eq!(to_coords(63, 8), (7, 7));
        assert_eq!(to_coords(3, 2), (1, 1));
    }
}

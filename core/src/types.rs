use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Single board axis. Boards are clamped well below `u8::MAX` per side.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Zero-based `(row, col)` coordinates.
pub type Coord2 = (Coord, Coord);

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

pub const fn cell_count(rows: Coord, cols: Coord) -> CellCount {
    let rows = rows as CellCount;
    let cols = cols as CellCount;
    rows.saturating_mul(cols)
}

const NEIGHBOR_DELTAS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in
/// bounds.
fn offset(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let row = coords.0.checked_add_signed(delta.0)?;
    let col = coords.1.checked_add_signed(delta.1)?;
    (row < bounds.0 && col < bounds.1).then_some((row, col))
}

/// Iterates the up-to-8 in-bounds neighbors of `center`.
pub fn iter_neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    NEIGHBOR_DELTAS
        .iter()
        .filter_map(move |&delta| offset(center, delta, bounds))
}

pub trait GridExt {
    fn bounds(&self) -> Coord2;

    fn in_bounds(&self, coords: Coord2) -> bool {
        let (rows, cols) = self.bounds();
        coords.0 < rows && coords.1 < cols
    }

    fn iter_neighbors(&self, center: Coord2) -> impl Iterator<Item = Coord2> {
        iter_neighbors(center, self.bounds())
    }
}

impl<T> GridExt for Array2<T> {
    fn bounds(&self) -> Coord2 {
        let dim = self.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }
}

/// The eight directions the ship marker can travel, each an independent pair
/// of row/column deltas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    pub const fn deltas(self) -> (i8, i8) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::UpLeft => (-1, -1),
            Self::UpRight => (-1, 1),
            Self::DownLeft => (1, -1),
            Self::DownRight => (1, 1),
        }
    }

    /// Shifts `coords` by `stride` cells in this direction. Each axis clamps
    /// to the board independently, so moving against a wall slides along it
    /// rather than failing.
    pub fn shifted(self, coords: Coord2, stride: Coord, bounds: Coord2) -> Coord2 {
        let (row_delta, col_delta) = self.deltas();
        (
            clamp_axis(coords.0, row_delta, stride, bounds.0),
            clamp_axis(coords.1, col_delta, stride, bounds.1),
        )
    }
}

fn clamp_axis(pos: Coord, delta: i8, stride: Coord, len: Coord) -> Coord {
    let target = i32::from(pos) + i32::from(delta) * i32::from(stride);
    target.clamp(0, i32::from(len) - 1) as Coord
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_cell_has_three_neighbors() {
        let neighbors: Vec<_> = iter_neighbors((0, 0), (5, 5)).collect();
        assert_eq!(neighbors, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        assert_eq!(iter_neighbors((2, 2), (5, 5)).count(), 8);
    }

    #[test]
    fn edge_cell_has_five_neighbors() {
        assert_eq!(iter_neighbors((0, 2), (5, 5)).count(), 5);
    }

    #[test]
    fn shift_clamps_each_axis_independently() {
        // one cell from the right wall: the column clamps, the row still moves
        assert_eq!(Direction::DownRight.shifted((1, 3), 2, (5, 5)), (3, 4));
        assert_eq!(Direction::UpLeft.shifted((0, 0), 2, (5, 5)), (0, 0));
        assert_eq!(Direction::Up.shifted((1, 2), 2, (5, 5)), (0, 2));
    }

    #[test]
    fn every_direction_stays_in_bounds() {
        for direction in Direction::ALL {
            for stride in [1, 2] {
                let (row, col) = direction.shifted((0, 4), stride, (5, 5));
                assert!(row < 5 && col < 5);
            }
        }
    }
}

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{CellCount, Coord, Coord2, GameConfig, GameError, GridExt, Result, ToNdIndex};

/// Finished mine placement: which cells hold mines and, for every cell, how
/// many of its 8-neighbors do. Adjacency counts are maintained incrementally
/// as mines are placed; the value stored at a mined cell is not meaningful.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mines: Array2<bool>,
    adjacency: Array2<u8>,
    mine_count: CellCount,
}

impl MineLayout {
    pub(crate) fn empty(size: Coord2) -> Self {
        Self {
            mines: Array2::default(size.to_nd_index()),
            adjacency: Array2::default(size.to_nd_index()),
            mine_count: 0,
        }
    }

    /// Builds a layout with mines pinned to exact cells, for scripted games
    /// and tests.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut layout = Self::empty(size);
        for &coords in mine_coords {
            if !layout.mines.in_bounds(coords) {
                return Err(GameError::InvalidCoords);
            }
            layout.place_mine(coords);
        }
        Ok(layout)
    }

    /// Places a mine and bumps the adjacency count of every in-bounds
    /// neighbor. Returns `false` when the cell already holds one.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        if self.mines[coords.to_nd_index()] {
            return false;
        }
        self.mines[coords.to_nd_index()] = true;
        self.mine_count += 1;
        for pos in self.mines.iter_neighbors(coords) {
            self.adjacency[pos.to_nd_index()] += 1;
        }
        true
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        self.mines.bounds()
    }

    pub fn total_cells(&self) -> CellCount {
        self.mines.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mines[coords.to_nd_index()]
    }

    /// Number of mines adjacent to a non-mine cell.
    pub fn adjacent_mines(&self, coords: Coord2) -> u8 {
        self.adjacency[coords.to_nd_index()]
    }

    pub(crate) fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mines
            .indexed_iter()
            .filter(|&(_, &mined)| mined)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iter_neighbors;

    #[test]
    fn adjacency_matches_brute_force_count() {
        let layout =
            MineLayout::from_mine_coords((5, 5), &[(0, 0), (2, 2), (2, 3), (4, 1)]).unwrap();

        for row in 0..5 {
            for col in 0..5 {
                if layout.contains_mine((row, col)) {
                    continue;
                }
                let expected = iter_neighbors((row, col), (5, 5))
                    .filter(|&pos| layout.contains_mine(pos))
                    .count() as u8;
                assert_eq!(layout.adjacent_mines((row, col)), expected);
            }
        }
    }

    #[test]
    fn duplicate_mine_coords_are_placed_once() {
        let layout = MineLayout::from_mine_coords((5, 5), &[(1, 1), (1, 1)]).unwrap();
        assert_eq!(layout.mine_count(), 1);
        assert_eq!(layout.adjacent_mines((0, 0)), 1);
    }

    #[test]
    fn out_of_bounds_mine_is_rejected() {
        assert_eq!(
            MineLayout::from_mine_coords((5, 5), &[(5, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn safe_cell_count_excludes_mines() {
        let layout = MineLayout::from_mine_coords((5, 5), &[(0, 0), (4, 4)]).unwrap();
        assert_eq!(layout.total_cells(), 25);
        assert_eq!(layout.safe_cell_count(), 23);
    }
}

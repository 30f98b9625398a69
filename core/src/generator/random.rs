use rand::prelude::*;

use super::*;
use crate::{Coord2, MineLayout};

/// Rejection-sampling placement: uniform random cells, re-rolled when the
/// sample already holds a mine or lands inside the 3x3 safe zone around the
/// first revealed cell. The safe zone guarantees the first move never loses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RejectionLayoutGenerator {
    seed: u64,
    safe_origin: Coord2,
}

impl RejectionLayoutGenerator {
    pub fn new(seed: u64, safe_origin: Coord2) -> Self {
        Self { seed, safe_origin }
    }

    fn in_safe_zone(&self, (row, col): Coord2) -> bool {
        row.abs_diff(self.safe_origin.0) <= 1 && col.abs_diff(self.safe_origin.1) <= 1
    }
}

impl LayoutGenerator for RejectionLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        let (rows, cols) = config.size;

        // A validated config already keeps the count under this bound; an
        // unchecked one must still not spin the sampling loop forever.
        let usable = config.total_cells().saturating_sub(SAFE_ZONE_CELLS);
        let mines = if config.mines > usable {
            log::warn!(
                "mine count {} exceeds usable cells {}, clamping",
                config.mines,
                usable
            );
            usable
        } else {
            config.mines
        };

        let mut layout = MineLayout::empty(config.size);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed = 0;
        while placed < mines {
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            if self.in_safe_zone(coords) {
                continue;
            }
            if layout.place_mine(coords) {
                placed += 1;
            }
        }
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameConfig, iter_neighbors};

    fn generate(seed: u64, origin: Coord2, config: GameConfig) -> MineLayout {
        RejectionLayoutGenerator::new(seed, origin).generate(config)
    }

    #[test]
    fn places_exactly_the_requested_mine_count() {
        let config = GameConfig::new((9, 9), 10);
        let layout = generate(7, (4, 4), config);

        let mut mines = 0;
        for row in 0..9 {
            for col in 0..9 {
                if layout.contains_mine((row, col)) {
                    mines += 1;
                }
            }
        }
        assert_eq!(mines, 10);
        assert_eq!(layout.mine_count(), 10);
    }

    #[test]
    fn safe_zone_never_contains_a_mine() {
        for seed in 0..32 {
            let layout = generate(seed, (4, 4), GameConfig::new((9, 9), 10));
            assert!(!layout.contains_mine((4, 4)));
            for pos in iter_neighbors((4, 4), (9, 9)) {
                assert!(!layout.contains_mine(pos), "mine in safe zone, seed {seed}");
            }
        }
    }

    #[test]
    fn clipped_safe_zone_at_a_corner_is_respected() {
        let layout = generate(3, (0, 0), GameConfig::new((5, 5), 16));
        assert!(!layout.contains_mine((0, 0)));
        for pos in iter_neighbors((0, 0), (5, 5)) {
            assert!(!layout.contains_mine(pos));
        }
        assert_eq!(layout.mine_count(), 16);
    }

    #[test]
    fn generation_is_deterministic_under_a_seed() {
        let config = GameConfig::new((9, 9), 10);
        let first = generate(42, (4, 4), config);
        let second = generate(42, (4, 4), config);
        assert_eq!(first, second);
    }

    #[test]
    fn adjacency_counts_match_the_placed_mines() {
        let layout = generate(11, (4, 4), GameConfig::new((9, 9), 10));
        for row in 0..9 {
            for col in 0..9 {
                if layout.contains_mine((row, col)) {
                    continue;
                }
                let expected = iter_neighbors((row, col), (9, 9))
                    .filter(|&pos| layout.contains_mine(pos))
                    .count() as u8;
                assert_eq!(layout.adjacent_mines((row, col)), expected);
            }
        }
    }

    #[test]
    fn unchecked_overfull_config_is_clamped_instead_of_looping() {
        // 25 cells minus the 9-cell safe zone leaves room for 16 mines
        let config = GameConfig::new_unchecked((5, 5), 25);
        let layout = generate(1, (2, 2), config);
        assert_eq!(layout.mine_count(), 16);
    }
}

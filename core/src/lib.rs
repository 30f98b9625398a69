//! Board engine for soukai, a Minesweeper variant where a player-controlled
//! ship sails across the field and reveals cells by moving onto them.
//!
//! The crate is presentation-agnostic: a front end renders the read-only
//! views exposed by [`GameSession`] and feeds player input back through
//! [`GameSession::reveal`], [`GameSession::toggle_flag`] and the marker
//! movement operations.

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod layout;
mod types;

pub const MIN_AXIS: Coord = 5;
pub const MAX_AXIS: Coord = 50;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board size as `(rows, cols)`.
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps everything into a playable range: `5..=50` per axis, at most
    /// 80% mine density, and enough mine-free cells for the 3x3 first-move
    /// safe zone so that placement always terminates.
    pub fn new((rows, cols): Coord2, mines: CellCount) -> Self {
        let clamped_rows = rows.clamp(MIN_AXIS, MAX_AXIS);
        let clamped_cols = cols.clamp(MIN_AXIS, MAX_AXIS);
        let total = cell_count(clamped_rows, clamped_cols);
        let max_mines = (total * 4 / 5).min(total - SAFE_ZONE_CELLS);
        let clamped_mines = mines.clamp(1, max_mines);

        if (clamped_rows, clamped_cols, clamped_mines) != (rows, cols, mines) {
            log::warn!(
                "game config clamped: {}x{} with {} mines -> {}x{} with {} mines",
                rows,
                cols,
                mines,
                clamped_rows,
                clamped_cols,
                clamped_mines
            );
        }
        Self::new_unchecked((clamped_rows, clamped_cols), clamped_mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.size.0, self.size.1)
    }
}

/// Preset board configurations offered by the front end.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::new_unchecked((9, 9), 10),
            Self::Intermediate => GameConfig::new_unchecked((16, 16), 40),
            Self::Expert => GameConfig::new_unchecked((30, 16), 99),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_within_range_is_untouched() {
        let config = GameConfig::new((9, 9), 10);
        assert_eq!(config.size, (9, 9));
        assert_eq!(config.mines, 10);
    }

    #[test]
    fn config_axes_clamp_to_their_range() {
        assert_eq!(GameConfig::new((3, 60), 10).size, (5, 50));
        assert_eq!(GameConfig::new((0, 0), 1).size, (5, 5));
    }

    #[test]
    fn mine_count_clamps_to_density_and_safe_zone() {
        // 5x5: the 80% cap (20) exceeds what the safe zone leaves (16)
        assert_eq!(GameConfig::new((5, 5), 5000).mines, 16);
        // 10x10: the 80% cap wins
        assert_eq!(GameConfig::new((10, 10), 5000).mines, 80);
        assert_eq!(GameConfig::new((10, 10), 0).mines, 1);
    }

    #[test]
    fn presets_survive_validation_unchanged() {
        for difficulty in [
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Expert,
        ] {
            let preset = difficulty.config();
            assert_eq!(GameConfig::new(preset.size, preset.mines), preset);
        }
    }
}

use crate::{CellCount, GameConfig, MineLayout};

pub use random::*;

mod random;

/// Upper bound on the size of the first-move safe zone: the revealed cell
/// plus its 8-neighborhood.
pub const SAFE_ZONE_CELLS: CellCount = 9;

/// Strategy seam for mine placement. Injected into sessions so generation is
/// deterministic under a fixed seed and fully scriptable in tests.
pub trait LayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

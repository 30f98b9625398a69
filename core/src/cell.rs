use serde::{Deserialize, Serialize};

/// Player-visible state of a single board cell. Unrevealed cells carry no
/// mine or adjacency information, so nothing about the layout can leak
/// through this type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    /// An uncovered mine. Only reachable once the session is lost.
    Mine,
}

impl Cell {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_) | Self::Mine)
    }

    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

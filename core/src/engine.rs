use core::num::Saturating;
use std::collections::{BTreeSet, VecDeque};

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Created but nothing revealed yet; mines are not placed.
    #[default]
    Pending,
    Active,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_started(self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Result of a marker move or jump.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Session not navigable, or the clamped target equals the current
    /// position; nothing happened, no reveal was attempted.
    NoChange,
    /// The marker moved; the inner value is what revealing the target did
    /// (`RevealOutcome::NoChange` when it was flagged or already revealed).
    Moved(RevealOutcome),
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Moved(_))
    }
}

/// One game from creation to win or loss.
///
/// Mine placement is deferred to the first reveal so the first move can
/// never lose; until then the session holds no [`MineLayout`]. Invalid
/// player input (out-of-bounds coordinates, acting on a revealed or flagged
/// cell, acting after the game ended) is silently ignored rather than
/// reported as an error.
///
/// A new game replaces the session wholesale; the elapsed-time clock lives
/// inside it, so no timer state can outlive the session that started it.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    seed: u64,
    layout: Option<MineLayout>,
    board: Array2<Cell>,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    state: SessionState,
    marker: Option<Coord2>,
    triggered_mine: Option<Coord2>,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl GameSession {
    /// Starts a session over a validated config. `seed` drives mine
    /// placement once the first cell is revealed.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            board: Array2::default(config.size.to_nd_index()),
            config,
            seed,
            layout: None,
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            state: SessionState::default(),
            marker: None,
            triggered_mine: None,
            started_at: None,
            ended_at: None,
        }
    }

    /// Session over a pre-built layout; placement on first reveal is
    /// skipped. This is how tests and puzzle setups pin mines to known
    /// cells. The first-move safe-zone guarantee does not apply.
    pub fn with_layout(layout: MineLayout, seed: u64) -> Self {
        let config = layout.game_config();
        let mut session = Self::new(config, seed);
        session.layout = Some(layout);
        session
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Board size as `(rows, cols)`.
    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.state.is_started()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn is_won(&self) -> bool {
        self.state == SessionState::Won
    }

    pub fn total_mines(&self) -> CellCount {
        self.layout
            .as_ref()
            .map_or(self.config.mines, MineLayout::mine_count)
    }

    /// Mines minus flags; goes negative when the player overflags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.total_mines()) - i32::from(self.flagged_count.0)
    }

    pub fn marker(&self) -> Option<Coord2> {
        self.marker
    }

    /// The mine whose reveal lost the game, if any.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board[coords.to_nd_index()]
    }

    /// Whether a mine sits at `coords`. Intended for post-game display
    /// (misflag rendering); always `false` before placement.
    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.layout
            .as_ref()
            .is_some_and(|layout| layout.contains_mine(coords))
    }

    /// Whole seconds between the first reveal and `now`, frozen at the
    /// moment the session ended. The 1 Hz tick that redraws this value
    /// belongs to the front end.
    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        match self.started_at {
            Some(started) => self
                .ended_at
                .unwrap_or(now)
                .saturating_duration_since(started)
                .as_secs(),
            None => 0,
        }
    }

    /// Reveals a cell, cascading through connected zero-adjacency regions.
    ///
    /// The first effective reveal of a session places the mines (with this
    /// cell as the safe origin), drops the marker here, and starts the
    /// clock.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.state.is_over() || !self.board.in_bounds(coords) {
            return RevealOutcome::NoChange;
        }
        if self.board[coords.to_nd_index()] != Cell::Hidden {
            return RevealOutcome::NoChange;
        }

        if !self.state.is_started() {
            self.begin(coords);
        }
        self.reveal_hidden_cell(coords)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if self.state.is_over() || !self.board.in_bounds(coords) {
            return MarkOutcome::NoChange;
        }

        match self.board[coords.to_nd_index()] {
            Cell::Hidden => {
                self.board[coords.to_nd_index()] = Cell::Flagged;
                self.flagged_count += 1;
                MarkOutcome::Changed
            }
            Cell::Flagged => {
                self.board[coords.to_nd_index()] = Cell::Hidden;
                self.flagged_count -= 1;
                MarkOutcome::Changed
            }
            Cell::Revealed(_) | Cell::Mine => MarkOutcome::NoChange,
        }
    }

    /// Moves the marker one cell and reveals the destination.
    pub fn move_marker(&mut self, direction: Direction) -> MoveOutcome {
        self.shift_marker(direction, 1)
    }

    /// Two-cell teleport. Each axis clamps independently, and the
    /// intermediate cell is neither checked nor revealed.
    pub fn jump_marker(&mut self, direction: Direction) -> MoveOutcome {
        self.shift_marker(direction, 2)
    }

    fn shift_marker(&mut self, direction: Direction, stride: Coord) -> MoveOutcome {
        if self.state != SessionState::Active {
            return MoveOutcome::NoChange;
        }
        let Some(current) = self.marker else {
            return MoveOutcome::NoChange;
        };

        let target = direction.shifted(current, stride, self.config.size);
        if target == current {
            return MoveOutcome::NoChange;
        }

        self.marker = Some(target);
        MoveOutcome::Moved(self.reveal(target))
    }

    fn begin(&mut self, origin: Coord2) {
        if self.layout.is_none() {
            let layout = RejectionLayoutGenerator::new(self.seed, origin).generate(self.config);
            self.layout = Some(layout);
        }
        self.state = SessionState::Active;
        self.marker = Some(origin);
        self.started_at = Some(Instant::now());
    }

    fn reveal_hidden_cell(&mut self, coords: Coord2) -> RevealOutcome {
        // begin() has run by now, so a layout is always present
        let layout = self.layout.as_ref().expect("layout placed on first reveal");

        if layout.contains_mine(coords) {
            self.board[coords.to_nd_index()] = Cell::Mine;
            self.triggered_mine = Some(coords);
            self.finish(false);
            return RevealOutcome::HitMine;
        }

        let safe_cells = layout.safe_cell_count();
        let adjacent = layout.adjacent_mines(coords);
        self.board[coords.to_nd_index()] = Cell::Revealed(adjacent);
        self.revealed_count += 1;

        if adjacent == 0 {
            self.flood_fill_from(coords);
        }

        if self.revealed_count.0 == safe_cells {
            self.finish(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Worklist flood fill over the connected zero-adjacency region plus its
    /// bordering numbered cells. Flagged cells are skipped, which naturally
    /// bounds the cascade; an explicit queue keeps large boards off the call
    /// stack.
    fn flood_fill_from(&mut self, origin: Coord2) {
        let Self {
            layout,
            board,
            revealed_count,
            ..
        } = self;
        let layout = layout.as_ref().expect("layout placed on first reveal");
        let bounds = layout.size();

        let mut visited = BTreeSet::from([origin]);
        let mut worklist: VecDeque<Coord2> = iter_neighbors(origin, bounds)
            .filter(|&pos| board[pos.to_nd_index()] == Cell::Hidden)
            .collect();

        while let Some(coords) = worklist.pop_front() {
            if !visited.insert(coords) {
                continue;
            }
            if board[coords.to_nd_index()] != Cell::Hidden {
                continue;
            }

            // zero-adjacency cells never border a mine, so everything
            // reachable here is safe to open
            let adjacent = layout.adjacent_mines(coords);
            board[coords.to_nd_index()] = Cell::Revealed(adjacent);
            *revealed_count += 1;

            if adjacent == 0 {
                worklist.extend(
                    iter_neighbors(coords, bounds)
                        .filter(|&pos| board[pos.to_nd_index()] == Cell::Hidden)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    fn finish(&mut self, won: bool) {
        if self.state.is_over() {
            return;
        }
        self.state = if won {
            SessionState::Won
        } else {
            SessionState::Lost
        };
        self.ended_at = Some(Instant::now());

        if !won {
            self.expose_mines();
        }
        log::debug!("session over, won: {won}");
    }

    /// Uncovers every mine so the terminal board is fully visible; flags
    /// sitting on mines are overridden.
    fn expose_mines(&mut self) {
        let Self { layout, board, .. } = self;
        if let Some(layout) = layout.as_ref() {
            for coords in layout.iter_mines() {
                board[coords.to_nd_index()] = Cell::Mine;
            }
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Whether the elapsed-time counter should be advancing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClockState {
    /// Waiting for the first reveal
    Idle,
    Running,
    /// Frozen after the game ended
    Stopped,
}

impl ClockState {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Identifies one session so late ticks aimed at a replaced session can be told apart.
pub type SessionId = u64;

/// One game from the fresh board to a win or a loss.
///
/// Mines are laid out on the first reveal so that it can never hit one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    id: SessionId,
    config: GameConfig,
    seed: u64,
    board: Board,
    status: GameStatus,
    elapsed_secs: u32,
    flag_count: CellCount,
    first_click_pending: bool,
}

impl GameSession {
    pub fn new(id: SessionId, config: GameConfig, seed: u64) -> Self {
        log::debug!(
            "New session {}: {}x{} with {} mines",
            id,
            config.rows(),
            config.cols(),
            config.mines
        );
        Self {
            id,
            config,
            seed,
            board: Board::new(config.size),
            status: GameStatus::Playing,
            elapsed_secs: 0,
            flag_count: 0,
            first_click_pending: true,
        }
    }

    /// Fresh session with the same configuration.
    pub fn restart(&self, id: SessionId, seed: u64) -> Self {
        Self::new(id, self.config, seed)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    pub fn is_first_click_pending(&self) -> bool {
        self.first_click_pending
    }

    /// Mines not accounted for by flags, negative when the player placed more flags than there are mines.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flag_count)
    }

    pub fn cell_view(&self, coords: Coord2) -> CellView {
        self.board.get(coords).map_or(CellView::Hidden, Cell::view)
    }

    pub fn clock(&self) -> ClockState {
        if self.status.is_finished() {
            ClockState::Stopped
        } else if self.first_click_pending {
            ClockState::Idle
        } else {
            ClockState::Running
        }
    }

    /// Advances the elapsed-time counter by one second if the clock is running.
    pub fn tick(&mut self) -> bool {
        if self.clock().is_running() {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
            true
        } else {
            false
        }
    }

    pub fn handle_reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let placer = RandomMinePlacer::new(self.seed);
        self.handle_reveal_with(coords, placer)
    }

    /// Same as [`Self::handle_reveal`], with the mine layout of the first reveal decided by `placer`.
    pub fn handle_reveal_with(&mut self, coords: Coord2, placer: impl MinePlacer) -> RevealOutcome {
        if self.status.is_finished() {
            return RevealOutcome::NoChange;
        }
        let Some(cell) = self.board.get(coords) else {
            return RevealOutcome::NoChange;
        };
        if cell.is_flagged {
            return RevealOutcome::NoChange;
        }

        if self.first_click_pending {
            placer.place_mines(&mut self.board, coords, self.config.mines);
            self.board.compute_neighbor_counts();
            self.first_click_pending = false;
        }

        if self.board[coords].is_mine {
            log::debug!("Session {} hit a mine at {:?}", self.id, coords);
            self.board.reveal_all_mines();
            self.status = GameStatus::Lost;
            return RevealOutcome::HitMine;
        }

        if self.board.reveal(coords) == 0 {
            return RevealOutcome::NoChange;
        }

        if self.board.revealed_safe_count() == self.config.safe_cells() {
            log::debug!("Session {} won in {}s", self.id, self.elapsed_secs);
            self.status = GameStatus::Won;
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if self.status.is_finished() {
            return MarkOutcome::NoChange;
        }

        let outcome = self.board.toggle_flag(coords);
        self.flag_count = self
            .flag_count
            .saturating_add_signed(outcome.flag_delta().into());
        outcome
    }
}

use serde::{Deserialize, Serialize};

use crate::*;

/// Session mode deciding which commands are accepted.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineMode {
    Setup,
    Play,
    Won,
}

impl EngineMode {
    pub const fn is_setup(self) -> bool {
        matches!(self, Self::Setup)
    }

    pub const fn is_play(self) -> bool {
        matches!(self, Self::Play)
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for EngineMode {
    fn default() -> Self {
        Self::Setup
    }
}

/// The whole puzzle session: board, mode, selection, and both snapshots.
///
/// Commands either return a rejection (`Err` for misuse, `Ok(NoChange)` for a
/// legal call without effect) or replace the board with a fresh copy; the
/// previous board value is never mutated in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEngine {
    board: Board,
    mode: EngineMode,
    selection: Option<Coord2>,
    play_enabled: bool,
    starting: Board,
    stored: Option<Board>,
}

impl GameEngine {
    /// Empty board in Setup mode, ready for authoring.
    pub fn new(config: GameConfig) -> Self {
        let board = Board::empty(config.size);
        Self {
            starting: board.clone(),
            board,
            mode: EngineMode::Setup,
            selection: None,
            play_enabled: false,
            stored: None,
        }
    }

    /// Adopts an authored board, entering Play when it holds any shards.
    pub fn from_board(board: Board) -> Result<Self> {
        if board.has_frozen_cells() {
            return Err(GameError::FrozenBoard);
        }
        if board.selected_count() > 1 {
            return Err(GameError::InvalidSelection);
        }

        let playable = board.shard_count() > 0;
        let engine = Self {
            starting: board.clone(),
            selection: board.selected_coords(),
            mode: if playable {
                EngineMode::Play
            } else {
                EngineMode::Setup
            },
            play_enabled: playable,
            board,
            stored: None,
        };
        engine.debug_check_invariants();
        Ok(engine)
    }

    /// The built-in starter layout with its centre shard selected.
    pub fn starter() -> Self {
        Self::from_board(Board::starter()).expect("starter layout is well formed")
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> EngineMode {
        self.mode
    }

    pub fn selection(&self) -> Option<Coord2> {
        self.selection
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn config(&self) -> GameConfig {
        self.board.game_config()
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board[coords]
    }

    /// Whether the board currently qualifies for entering Play.
    pub fn play_enabled(&self) -> bool {
        self.play_enabled
    }

    pub fn has_stored(&self) -> bool {
        self.stored.is_some()
    }

    /// Toggles a cell between empty and shard while authoring.
    pub fn place(&mut self, coords: Coord2) -> Result<ToggleOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_mode(EngineMode::Setup)?;

        let mut next = self.board.clone();
        next[coords] = match next[coords] {
            Cell::Empty => Cell::Shard,
            _ => Cell::Empty,
        };
        self.board = next;
        self.play_enabled = self.board.shard_count() > 0;
        self.debug_check_invariants();
        Ok(ToggleOutcome::Changed)
    }

    /// Moves the selection marker onto the target cell.
    ///
    /// Any previous selection is cleared first; selecting an empty cell is
    /// legal and leaves the marker resting on it.
    pub fn select(&mut self, coords: Coord2) -> Result<ToggleOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_mode(EngineMode::Play)?;

        let mut next = self.board.normalized();
        next[coords] = next[coords].negated();
        self.board = next;
        self.selection = Some(coords);
        self.debug_check_invariants();
        Ok(ToggleOutcome::Changed)
    }

    /// Shifts the selected row or column one step, pulling the selection along.
    ///
    /// Legal only while the boundary cell in the shove direction is empty, so
    /// no shard is ever pushed off the grid. A fully connected result freezes
    /// the whole board.
    pub fn shove(&mut self, direction: Direction) -> Result<MoveOutcome> {
        self.check_mode(EngineMode::Play)?;
        let Some(selection) = self.selection else {
            return Ok(MoveOutcome::NoChange);
        };

        let (rows, cols) = self.board.size();
        let (sel_row, sel_col) = selection;
        let boundary = match direction {
            Direction::Up => (0, sel_col),
            Direction::Down => (rows - 1, sel_col),
            Direction::Left => (sel_row, 0),
            Direction::Right => (sel_row, cols - 1),
        };
        if self.board[boundary] != Cell::Empty {
            return Ok(MoveOutcome::NoChange);
        }

        let mut next = self.board.clone();
        match direction {
            Direction::Up => {
                for row in 0..rows - 1 {
                    next[(row, sel_col)] = next[(row + 1, sel_col)];
                }
                next[(rows - 1, sel_col)] = Cell::Empty;
            }
            Direction::Down => {
                for row in (1..rows).rev() {
                    next[(row, sel_col)] = next[(row - 1, sel_col)];
                }
                next[(0, sel_col)] = Cell::Empty;
            }
            Direction::Left => {
                for col in 0..cols - 1 {
                    next[(sel_row, col)] = next[(sel_row, col + 1)];
                }
                next[(sel_row, cols - 1)] = Cell::Empty;
            }
            Direction::Right => {
                for col in (1..cols).rev() {
                    next[(sel_row, col)] = next[(sel_row, col - 1)];
                }
                next[(sel_row, 0)] = Cell::Empty;
            }
        }

        self.board = next;
        // Only a selection resting on an empty boundary cell can step off the
        // grid; the marker is dropped rather than left pointing at a stranger.
        self.selection = direction.step(selection, (rows, cols));

        let outcome = if is_fully_connected(&self.board) {
            self.freeze();
            MoveOutcome::Won
        } else {
            MoveOutcome::Moved
        };
        self.debug_check_invariants();
        Ok(outcome)
    }

    /// Steps the selection marker onto the 4-adjacent neighbor.
    ///
    /// Occupancy never changes here, and no win check runs: freezing is
    /// triggered by shove-class moves only.
    pub fn swap_adjacent(&mut self, direction: Direction) -> Result<MoveOutcome> {
        self.check_mode(EngineMode::Play)?;
        let Some(selection) = self.selection else {
            return Ok(MoveOutcome::NoChange);
        };
        let Some(neighbor) = direction.step(selection, self.board.size()) else {
            return Ok(MoveOutcome::NoChange);
        };

        let mut next = self.board.clone();
        next[selection] = next[selection].negated();
        next[neighbor] = next[neighbor].negated();
        self.board = next;
        self.selection = Some(neighbor);
        self.debug_check_invariants();
        Ok(MoveOutcome::Moved)
    }

    /// Switches between authoring and play.
    ///
    /// Entering Play requires at least one shard on the board; the win check
    /// itself only runs on shoves, so an already-contiguous board still
    /// enters Play and freezes on its first legal shove.
    pub fn toggle_mode(&mut self) -> Result<ToggleOutcome> {
        self.check_not_won()?;

        if self.mode.is_play() {
            self.board = self.board.normalized();
            self.selection = None;
            self.mode = EngineMode::Setup;
        } else {
            if self.board.shard_count() == 0 {
                self.play_enabled = false;
                return Ok(ToggleOutcome::NoChange);
            }
            let next = self.board.normalized();
            if is_fully_connected(&next) {
                log::debug!("Entering play on a contiguous board, first shove will freeze it");
            }
            self.starting = next.clone();
            self.board = next;
            self.selection = None;
            self.play_enabled = true;
            self.mode = EngineMode::Play;
        }
        self.debug_check_invariants();
        Ok(ToggleOutcome::Changed)
    }

    /// Clears the board back to an all-empty authoring session.
    ///
    /// The starting and stored snapshots are left alone.
    pub fn reset(&mut self) {
        self.board = Board::empty(self.board.size());
        self.mode = EngineMode::Setup;
        self.selection = None;
        self.play_enabled = false;
        self.debug_check_invariants();
    }

    /// Returns to the recorded starting board and plays it again.
    pub fn restart(&mut self) -> ToggleOutcome {
        if self.mode.is_setup() {
            return ToggleOutcome::NoChange;
        }

        let board = self.starting.clone();
        self.selection = board.selected_coords();
        self.board = board;
        self.mode = EngineMode::Play;
        self.play_enabled = true;
        self.debug_check_invariants();
        ToggleOutcome::Changed
    }

    /// Replaces the board from a generator and adopts it as the new start.
    pub fn randomize<G: BoardGenerator>(&mut self, generator: G) -> ToggleOutcome {
        let board = generator.generate(self.config());
        self.starting = board.clone();

        if board.shard_count() == 0 {
            log::warn!("Generated board is empty, staying in setup");
            self.board = board;
            self.mode = EngineMode::Setup;
            self.selection = None;
            self.play_enabled = false;
        } else {
            self.selection = board.selected_coords();
            self.board = board;
            self.mode = EngineMode::Play;
            self.play_enabled = true;
        }
        self.debug_check_invariants();
        ToggleOutcome::Changed
    }

    /// Loads the built-in starter layout and plays it.
    ///
    /// Board dimensions are fixed per session, so this only applies to
    /// sessions of the starter's own size.
    pub fn load_starter(&mut self) -> ToggleOutcome {
        let board = Board::starter();
        if board.size() != self.board.size() {
            return ToggleOutcome::NoChange;
        }

        self.starting = board.clone();
        self.selection = board.selected_coords();
        self.board = board;
        self.mode = EngineMode::Play;
        self.play_enabled = true;
        self.debug_check_invariants();
        ToggleOutcome::Changed
    }

    /// Copies the current board into the single snapshot slot.
    ///
    /// Rejected while frozen shards are on the board.
    pub fn store(&mut self) -> ToggleOutcome {
        if self.board.has_frozen_shards() {
            return ToggleOutcome::NoChange;
        }
        self.stored = Some(self.board.clone());
        ToggleOutcome::Changed
    }

    /// Brings the stored snapshot back as the live board.
    ///
    /// In Setup the recalled board is normalized and the mode stays Setup.
    /// Otherwise an empty recalled board falls back to Setup, any other lands
    /// in Play with the selection re-derived from the recalled tokens; a won
    /// state never survives a recall.
    pub fn recall(&mut self) -> ToggleOutcome {
        let Some(stored) = &self.stored else {
            return ToggleOutcome::NoChange;
        };

        if self.mode.is_setup() {
            self.board = stored.normalized();
            self.play_enabled = self.board.shard_count() > 0;
        } else {
            let board = stored.clone();
            if board.shard_count() == 0 {
                self.board = board;
                self.mode = EngineMode::Setup;
                self.selection = None;
                self.play_enabled = false;
            } else {
                self.selection = board.selected_coords();
                self.board = board;
                self.mode = EngineMode::Play;
                self.play_enabled = true;
            }
        }
        self.debug_check_invariants();
        ToggleOutcome::Changed
    }

    pub fn clear_store(&mut self) -> ToggleOutcome {
        if self.stored.take().is_some() {
            ToggleOutcome::Changed
        } else {
            ToggleOutcome::NoChange
        }
    }

    fn freeze(&mut self) {
        self.board = self.board.frozen();
        self.mode = EngineMode::Won;
        self.selection = None;
        self.play_enabled = false;
    }

    fn check_mode(&self, expected: EngineMode) -> Result<()> {
        if self.mode == expected {
            Ok(())
        } else if self.mode.is_won() {
            Err(GameError::AlreadyEnded)
        } else {
            Err(GameError::WrongMode)
        }
    }

    fn check_not_won(&self) -> Result<()> {
        if self.mode.is_won() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    // The selection coordinate and the on-board marker must agree after every
    // command, and frozen cells exist exactly while the game is won.
    fn debug_check_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            assert!(self.board.selected_count() <= 1);
            assert_eq!(self.mode.is_won(), self.board.has_frozen_cells());
            if self.mode.is_won() {
                assert!(self.board.is_frozen());
            }
            if !self.mode.is_play() {
                assert!(self.selection.is_none());
            }
            match self.selection {
                Some(coords) => {
                    assert!(self.board.validate_coords(coords).is_ok());
                    match self.board.selected_coords() {
                        Some(marked) => assert_eq!(marked, coords),
                        None => assert_eq!(self.board[coords], Cell::Empty),
                    }
                }
                None => assert!(self.board.selected_coords().is_none()),
            }
        }
    }
}

#![no_std]

extern crate alloc;

use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod analysis;
mod cell;
mod engine;
mod error;
mod generator;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2) -> Self {
        Self { size }
    }

    pub fn new((rows, cols): Coord2) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        Self::new_unchecked((rows, cols))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Rectangular grid of cells.
///
/// Every engine operation reads one board and produces a fresh copy, so a
/// previously returned board or snapshot never aliases the live grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    pub fn empty(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn from_cells(cells: Array2<Cell>) -> Self {
        Self { cells }
    }

    /// Builds a board from signed tokens, one slice per row.
    pub fn from_tokens(rows: &[&[i8]]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if height == 0 || width == 0 || height > Coord::MAX as usize || width > Coord::MAX as usize
        {
            return Err(GameError::InvalidBoardShape);
        }

        let mut cells: Array2<Cell> = Array2::default([height, width]);
        for (row, tokens) in rows.iter().enumerate() {
            if tokens.len() != width {
                return Err(GameError::InvalidBoardShape);
            }
            for (col, &token) in tokens.iter().enumerate() {
                cells[[row, col]] = Cell::from_token(token).ok_or(GameError::InvalidToken)?;
            }
        }

        Ok(Self { cells })
    }

    /// The built-in starter layout, with the selection resting on the centre shard.
    pub fn starter() -> Self {
        const TOKENS: [[i8; 7]; 7] = [
            [0, 0, 1, 0, 1, 0, 0],
            [0, 1, 0, 1, 0, 1, 0],
            [0, 0, 0, 0, 0, 0, 0],
            [1, 0, 0, -1, 0, 0, 1],
            [0, 0, 0, 0, 0, 0, 0],
            [0, 1, 0, 1, 0, 1, 0],
            [0, 0, 1, 0, 1, 0, 0],
        ];

        let cells = Array2::from_shape_fn([7, 7], |(row, col)| {
            Cell::from_token(TOKENS[row][col]).expect("starter tokens are well formed")
        });
        Self { cells }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig { size: self.size() }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    /// Number of occupied cells, selected and frozen shards included.
    pub fn shard_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_occupied())
            .count()
            .try_into()
            .unwrap()
    }

    pub fn has_frozen_cells(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_frozen())
    }

    pub fn has_frozen_shards(&self) -> bool {
        self.cells.iter().any(|&cell| cell == Cell::FrozenShard)
    }

    pub fn is_frozen(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_frozen())
    }

    /// Coordinates of the cell carrying the selection marker, if any.
    pub fn selected_coords(&self) -> Option<Coord2> {
        self.cells.indexed_iter().find_map(|((row, col), &cell)| {
            (cell == Cell::SelectedShard)
                .then(|| (row.try_into().unwrap(), col.try_into().unwrap()))
        })
    }

    pub fn selected_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::SelectedShard)
            .count()
            .try_into()
            .unwrap()
    }

    /// Copy with every selection marker cleared back to its unselected form.
    pub fn normalized(&self) -> Self {
        Self {
            cells: self.cells.mapv(Cell::normalized),
        }
    }

    /// Copy with every cell rewritten to its terminal frozen form.
    pub fn frozen(&self) -> Self {
        Self {
            cells: self.cells.mapv(Cell::frozen),
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

/// Outcome of an authoring or bookkeeping command.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ToggleOutcome {
    NoChange,
    Changed,
}

impl ToggleOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of a play-mode move.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    NoChange,
    Moved,
    Won,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            NoChange => false,
            Moved => true,
            Won => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_degenerate_sizes() {
        let config = GameConfig::new((0, 5));

        assert_eq!(config.size, (1, 5));
        assert_eq!(config.total_cells(), 5);
    }

    #[test]
    fn from_tokens_rejects_jagged_rows() {
        let result = Board::from_tokens(&[&[0, 1], &[0]]);

        assert_eq!(result, Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn from_tokens_rejects_unknown_tokens() {
        let result = Board::from_tokens(&[&[0, 2]]);

        assert_eq!(result, Err(GameError::InvalidToken));
    }

    #[test]
    fn starter_layout_counts() {
        let board = Board::starter();

        assert_eq!(board.size(), (7, 7));
        assert_eq!(board.shard_count(), 13);
        assert_eq!(board.selected_coords(), Some((3, 3)));
        assert!(!board.has_frozen_cells());
    }

    #[test]
    fn normalized_and_frozen_are_grid_wide() {
        let board = Board::from_tokens(&[&[1, -1], &[0, 1]]).unwrap();

        let normalized = board.normalized();
        assert_eq!(normalized.selected_count(), 0);
        assert_eq!(normalized.shard_count(), board.shard_count());

        let frozen = board.frozen();
        assert!(frozen.is_frozen());
        assert!(frozen.has_frozen_shards());
        assert_eq!(frozen.shard_count(), board.shard_count());
    }
}

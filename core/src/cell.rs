use serde::{Deserialize, Serialize};

/// Semantic state of a single board cell.
///
/// Cells carry a signed token encoding: the sign marks the selection and the
/// two frozen states are the terminal rewrite of a finished board.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Shard,
    SelectedShard,
    FrozenEmpty,
    FrozenShard,
}

impl Cell {
    pub const fn token(self) -> i8 {
        match self {
            Self::Empty => 0,
            Self::Shard => 1,
            Self::SelectedShard => -1,
            Self::FrozenEmpty => 3,
            Self::FrozenShard => 4,
        }
    }

    pub const fn from_token(token: i8) -> Option<Self> {
        match token {
            0 => Some(Self::Empty),
            1 => Some(Self::Shard),
            -1 => Some(Self::SelectedShard),
            3 => Some(Self::FrozenEmpty),
            4 => Some(Self::FrozenShard),
            _ => None,
        }
    }

    /// Whether the cell holds a shard, selected or frozen included.
    pub const fn is_occupied(self) -> bool {
        matches!(self, Self::Shard | Self::SelectedShard | Self::FrozenShard)
    }

    pub const fn is_frozen(self) -> bool {
        matches!(self, Self::FrozenEmpty | Self::FrozenShard)
    }

    /// Unselected magnitude of the token.
    pub const fn normalized(self) -> Self {
        match self {
            Self::SelectedShard => Self::Shard,
            other => other,
        }
    }

    /// Toggles the selection marker; empty and frozen cells are unaffected.
    pub const fn negated(self) -> Self {
        match self {
            Self::Shard => Self::SelectedShard,
            Self::SelectedShard => Self::Shard,
            other => other,
        }
    }

    /// Terminal rewrite applied grid-wide when the board wins.
    pub const fn frozen(self) -> Self {
        if self.is_occupied() {
            Self::FrozenShard
        } else {
            Self::FrozenEmpty
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_encoding_round_trips() {
        for cell in [
            Cell::Empty,
            Cell::Shard,
            Cell::SelectedShard,
            Cell::FrozenEmpty,
            Cell::FrozenShard,
        ] {
            assert_eq!(Cell::from_token(cell.token()), Some(cell));
        }

        assert_eq!(Cell::from_token(2), None);
        assert_eq!(Cell::from_token(-3), None);
        assert_eq!(Cell::from_token(5), None);
    }

    #[test]
    fn normalized_clears_only_the_selection() {
        assert_eq!(Cell::SelectedShard.normalized(), Cell::Shard);
        assert_eq!(Cell::Shard.normalized(), Cell::Shard);
        assert_eq!(Cell::Empty.normalized(), Cell::Empty);
        assert_eq!(Cell::FrozenShard.normalized(), Cell::FrozenShard);
    }

    #[test]
    fn frozen_rewrite_tracks_occupancy() {
        assert_eq!(Cell::Empty.frozen(), Cell::FrozenEmpty);
        assert_eq!(Cell::Shard.frozen(), Cell::FrozenShard);
        assert_eq!(Cell::SelectedShard.frozen(), Cell::FrozenShard);
        assert_eq!(Cell::FrozenEmpty.frozen(), Cell::FrozenEmpty);
        assert_eq!(Cell::FrozenShard.frozen(), Cell::FrozenShard);
    }
}

use rand::prelude::*;

use crate::*;

/// Source of freshly authored boards, pluggable into [`GameEngine::randomize`].
///
/// Implementations must produce a board of exactly `config.size`, holding no
/// frozen cells and at most one selected shard.
pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Board;
}

/// Fills every cell with an unbiased empty-or-shard draw from a seeded RNG.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut board = Board::empty(config.size);

        let (rows, cols) = config.size;
        for row in 0..rows {
            for col in 0..cols {
                if rng.random_bool(0.5) {
                    board[(row, col)] = Cell::Shard;
                }
            }
        }

        if board.shard_count() == 0 {
            log::warn!("Generated board has no shards, play cannot start on it");
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_generates_the_same_board() {
        let config = GameConfig::new((7, 7));

        let first = RandomBoardGenerator::new(42).generate(config);
        let second = RandomBoardGenerator::new(42).generate(config);

        assert_eq!(first, second);
        assert_eq!(first.size(), (7, 7));
    }

    #[test]
    fn generated_cells_are_empty_or_plain_shards() {
        let config = GameConfig::new((5, 9));
        let board = RandomBoardGenerator::new(7).generate(config);

        let (rows, cols) = board.size();
        for row in 0..rows {
            for col in 0..cols {
                assert!(matches!(board[(row, col)], Cell::Empty | Cell::Shard));
            }
        }
    }
}

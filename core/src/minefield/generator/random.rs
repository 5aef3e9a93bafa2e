use alloc::vec::Vec;

use super::*;

/// Places mines uniformly at random, sampling positions without replacement.
///
/// The same seed always yields the same layout for a given configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::{SeedableRng, rngs::SmallRng, seq::index};

        let config = config.validate()?;
        let total_cells = usize::from(config.total_cells());

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let positions: Vec<Position> = index::sample(&mut rng, total_cells, config.mines.into())
            .into_iter()
            .map(|index| index as Position)
            .collect();
        log::debug!(
            "Placed {} mines on a {}x{} board, seed: {}",
            positions.len(),
            config.size.0,
            config.size.1,
            self.seed
        );

        let layout = MineLayout::from_mine_positions(config.size, &positions)?;

        // double check mine count
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        Ok(layout)
    }
}

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::*;

/// Uniformly random placement outside the safe zone.
///
/// Eligible cells are collected up front and partially shuffled, so the mine
/// count is checked before sampling and generation always terminates.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, board: &mut Board, mines: CellCount, safe_zone: SafeZone) -> Result<()> {
        let mut eligible = board.eligible_cells(safe_zone);
        // board size is bounded by `CellCount`
        let available = eligible.len() as CellCount;
        if mines > available {
            log::warn!(
                "Cannot place {} mines outside safe zone {:?}, only {} cells eligible",
                mines,
                safe_zone,
                available
            );
            return Err(ConfigError::NotEnoughSafeCells {
                mines,
                eligible: available,
            }
            .into());
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (chosen, _) = eligible.partial_shuffle(&mut rng, mines.into());
        for &coords in chosen.iter() {
            board.place_mine(coords);
        }

        log::debug!(
            "Placed {} mines on {:?} board, seed {}, safe zone {:?}",
            mines,
            board.size(),
            self.seed,
            safe_zone
        );
        Ok(())
    }
}

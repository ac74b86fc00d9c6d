use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy for placing mines on an empty board.
///
/// Implementations only set `is_mine`; callers follow up with
/// [`Board::compute_adjacency`]. On error the board must be left untouched.
pub trait MineGenerator {
    fn generate(self, board: &mut Board, mines: CellCount, safe_zone: SafeZone) -> Result<()>;
}

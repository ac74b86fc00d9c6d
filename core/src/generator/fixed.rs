use super::*;

/// Places a caller-supplied list of mines, for replays and puzzles.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator<'a> {
    mines: &'a [Coord2],
}

impl<'a> FixedMineGenerator<'a> {
    pub fn new(mines: &'a [Coord2]) -> Self {
        Self { mines }
    }

    /// Checks the layout against a board without touching it.
    pub fn validate(&self, board: &Board, expected: CellCount) -> Result<()> {
        let actual = CellCount::try_from(self.mines.len()).unwrap_or(CellCount::MAX);
        if actual != expected {
            return Err(ConfigError::LayoutMismatch { expected, actual }.into());
        }

        let mut seen = vec![false; board.total_cells().into()];
        for &coords in self.mines {
            board.validate_coords(coords)?;
            let index = linear_index(coords, board.cols());
            if seen[index] {
                return Err(ConfigError::DuplicateMine { coords }.into());
            }
            seen[index] = true;
        }

        Ok(())
    }
}

impl MineGenerator for FixedMineGenerator<'_> {
    fn generate(self, board: &mut Board, mines: CellCount, safe_zone: SafeZone) -> Result<()> {
        self.validate(board, mines)?;

        if let Some(&coords) = self.mines.iter().find(|&&c| safe_zone.contains(c)) {
            log::warn!("Fixed layout puts a mine at {:?}, inside {:?}", coords, safe_zone);
            return Err(ConfigError::MineInSafeZone { coords }.into());
        }

        for &coords in self.mines {
            board.place_mine(coords);
        }
        Ok(())
    }
}

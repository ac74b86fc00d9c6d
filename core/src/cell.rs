use serde::{Deserialize, Serialize};

/// One grid unit as stored by the engine.
///
/// A cell is never both `revealed` and `flagged`. `adjacent_mines` is only
/// meaningful for non-mine cells once mines have been placed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn is_unrevealed(self) -> bool {
        !self.revealed
    }

    /// Player-visible state of this cell.
    pub const fn view(self) -> CellView {
        match (self.revealed, self.flagged, self.is_mine) {
            (true, _, true) => CellView::Mine,
            (true, _, false) => CellView::Revealed(self.adjacent_mines),
            (false, true, _) => CellView::Flagged,
            (false, false, _) => CellView::Hidden,
        }
    }
}

/// What a player is allowed to see of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

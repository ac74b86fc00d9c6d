use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size grid of cells plus running counters.
///
/// Dimensions never change after construction. Mines are placed at most once,
/// through a [`MineGenerator`], after which [`Board::compute_adjacency`] fills
/// in the neighbour counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_safe: CellCount,
    flagged: CellCount,
}

/// Serialized form of a [`Board`]; stored counters are ignored and rebuilt.
#[derive(Deserialize)]
struct BoardData {
    cells: Array2<Cell>,
}

impl TryFrom<BoardData> for Board {
    type Error = GameError;

    fn try_from(data: BoardData) -> Result<Self> {
        let (rows, cols) = data.cells.dim();
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyBoard.into());
        }
        if rows > usize::from(Coord::MAX) || cols > usize::from(Coord::MAX) {
            return Err(ConfigError::InvalidBoardShape.into());
        }

        let mut board = Self {
            cells: data.cells,
            mine_count: 0,
            revealed_safe: 0,
            flagged: 0,
        };
        for coords in board.iter_coords() {
            let cell = board[coords];
            if cell.revealed && cell.flagged {
                return Err(ConfigError::RevealedAndFlagged { coords }.into());
            }
            board.mine_count += CellCount::from(cell.is_mine);
            board.flagged += CellCount::from(cell.flagged);
            board.revealed_safe += CellCount::from(cell.revealed && !cell.is_mine);
        }
        Ok(board)
    }
}

impl Board {
    /// Empty board: no mines, nothing revealed, nothing flagged.
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            mine_count: 0,
            revealed_safe: 0,
            flagged: 0,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // dimensions come from a `Coord2`, so they always fit
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords { coords })
        }
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// All coordinates in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    /// Mine coordinates in row-major order.
    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_coords().filter(|&coords| self[coords].is_mine)
    }

    /// Cells a mine may be placed on, in row-major order.
    pub fn eligible_cells(&self, safe_zone: SafeZone) -> Vec<Coord2> {
        self.iter_coords()
            .filter(|&coords| !safe_zone.contains(coords) && !self[coords].is_mine)
            .collect()
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most eight neighbours
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine)
            .count() as u8
    }

    /// Recomputes `adjacent_mines` for every non-mine cell.
    pub fn compute_adjacency(&mut self) {
        for coords in self.iter_coords() {
            let count = if self[coords].is_mine {
                0
            } else {
                self.adjacent_mine_count(coords)
            };
            self.cell_mut(coords).adjacent_mines = count;
        }
    }

    pub(crate) fn place_mine(&mut self, coords: Coord2) {
        let cell = self.cell_mut(coords);
        if !cell.is_mine {
            cell.is_mine = true;
            self.mine_count += 1;
        }
    }

    /// Marks a hidden, unflagged cell revealed. Returns whether it changed.
    pub(crate) fn reveal(&mut self, coords: Coord2) -> bool {
        let cell = self.cell_mut(coords);
        if cell.revealed || cell.flagged {
            return false;
        }
        cell.revealed = true;
        if !cell.is_mine {
            self.revealed_safe += 1;
        }
        true
    }

    pub(crate) fn set_flag(&mut self, coords: Coord2, flagged: bool) {
        let cell = self.cell_mut(coords);
        if cell.revealed || cell.flagged == flagged {
            return;
        }
        cell.flagged = flagged;
        if flagged {
            self.flagged += 1;
        } else {
            self.flagged -= 1;
        }
    }

    fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates {coords:?}")]
    InvalidCoords { coords: Coord2 },
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
}

/// Reasons a board configuration or mine layout is rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Too many mines: {mines} requested but the board only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Not enough cells outside the safe zone: {mines} mines, {eligible} eligible cells")]
    NotEnoughSafeCells {
        mines: CellCount,
        eligible: CellCount,
    },
    #[error("Mine layout has {actual} mines, configuration expects {expected}")]
    LayoutMismatch {
        expected: CellCount,
        actual: CellCount,
    },
    #[error("Mine layout lists {coords:?} more than once")]
    DuplicateMine { coords: Coord2 },
    #[error("Mine at {coords:?} lies inside the safe zone")]
    MineInSafeZone { coords: Coord2 },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Cell {coords:?} is both revealed and flagged")]
    RevealedAndFlagged { coords: Coord2 },
    #[error("Board holds {mines} mines and {flagged} flags, inconsistent with the session")]
    InconsistentCounters { mines: CellCount, flagged: CellCount },
}

pub type Result<T> = core::result::Result<T, GameError>;

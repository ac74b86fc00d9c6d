use serde::{Deserialize, Serialize};

use crate::*;

/// Condition under which a game counts as won.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinPolicy {
    /// Every safe cell is revealed. Flags are irrelevant.
    #[default]
    SafeCellsRevealed,
    /// Every safe cell is revealed and every mine carries a flag.
    AllMinesFlagged,
}

/// Immutable parameters of one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
    #[serde(default)]
    pub hints: u8,
    #[serde(default)]
    pub safe_radius: Coord,
    #[serde(default)]
    pub win_policy: WinPolicy,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            hints: 0,
            safe_radius: 0,
            win_policy: WinPolicy::SafeCellsRevealed,
        }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub const fn with_hints(self, hints: u8) -> Self {
        Self { hints, ..self }
    }

    pub const fn with_safe_radius(self, safe_radius: Coord) -> Self {
        Self {
            safe_radius,
            ..self
        }
    }

    pub const fn with_win_policy(self, win_policy: WinPolicy) -> Self {
        Self { win_policy, ..self }
    }

    /// Checks dimensions and mine count. The safe zone is checked later, once
    /// the first move fixes its centre.
    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyBoard.into());
        }

        let cells = self.total_cells();
        if self.mines >= cells {
            return Err(ConfigError::TooManyMines {
                mines: self.mines,
                cells,
            }
            .into());
        }

        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// Product presets offered by a difficulty picker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> GameConfig {
        let (size, mines) = match self {
            Self::Easy => ((8, 8), 10),
            Self::Medium => ((10, 12), 15),
            Self::Hard => ((14, 14), 27),
        };
        GameConfig::new_unchecked(size, mines)
            .with_hints(3)
            .with_safe_radius(1)
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_board() {
        assert_eq!(
            GameConfig::new((0, 5), 1),
            Err(GameError::Configuration(ConfigError::EmptyBoard))
        );
    }

    #[test]
    fn rejects_board_full_of_mines() {
        assert_eq!(
            GameConfig::new((2, 2), 4),
            Err(GameError::Configuration(ConfigError::TooManyMines {
                mines: 4,
                cells: 4
            }))
        );
        assert!(GameConfig::new((2, 2), 3).is_ok());
    }

    #[test]
    fn presets_are_valid() {
        for difficulty in Difficulty::ALL {
            let config = GameConfig::from(difficulty);
            assert_eq!(config.validate(), Ok(()));
            assert_eq!(config.hints, 3);
        }
        assert_eq!(Difficulty::Medium.config().size, (10, 12));
        assert_eq!(Difficulty::Hard.config().mines, 27);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"size":[9,9],"mines":10}"#).unwrap();

        assert_eq!(config, GameConfig::new_unchecked((9, 9), 10));
        assert_eq!(config.win_policy, WinPolicy::SafeCellsRevealed);
    }
}

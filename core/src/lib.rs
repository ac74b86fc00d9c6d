//! Single-player minesweeper engine.
//!
//! A [`GameSession`] owns a [`Board`] and applies player [`Action`]s to it.
//! Mines are placed lazily on the first reveal, around a [`SafeZone`] centred
//! on that move, so the first click never loses.
//!
//! ```
//! use minehunt_core::*;
//!
//! let mut session = GameSession::with_seed(Difficulty::Easy.config(), 42)?;
//! let outcome = session.apply(Action::reveal((3, 3)))?;
//!
//! assert!(outcome.has_update());
//! assert_ne!(session.status(), GameStatus::Lost);
//! # Ok::<(), GameError>(())
//! ```

pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod board;
mod cell;
mod config;
mod error;
mod generator;
mod session;
mod types;
mod view;

/// Result of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Result of revealing a cell, directly or through a hint.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Whether this reveal ended the game.
    pub const fn is_final(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

/// Result of [`GameSession::apply`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Reveal(RevealOutcome),
    Mark(MarkOutcome),
}

impl ActionOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Reveal(outcome) => outcome.has_update(),
            Self::Mark(outcome) => outcome.has_update(),
        }
    }
}

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Tool currently selected by the player; decides what a [`GameSession::tap`] does.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Reveal,
    Flag,
}

impl Tool {
    pub const fn action_kind(self) -> ActionKind {
        match self {
            Self::Reveal => ActionKind::Reveal,
            Self::Flag => ActionKind::ToggleFlag,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Reveal,
    ToggleFlag,
}

/// A player intent aimed at one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub coords: Coord2,
}

impl Action {
    pub const fn new(kind: ActionKind, coords: Coord2) -> Self {
        Self { kind, coords }
    }

    pub const fn reveal(coords: Coord2) -> Self {
        Self::new(ActionKind::Reveal, coords)
    }

    pub const fn toggle_flag(coords: Coord2) -> Self {
        Self::new(ActionKind::ToggleFlag, coords)
    }
}

/// Where the mines come from once the first move is made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MineSource {
    Random { seed: u64 },
    Fixed(Vec<Coord2>),
}

impl MineSource {
    /// Source for the next game after a reset.
    fn next(&self) -> Self {
        match self {
            Self::Random { seed } => Self::Random {
                seed: SmallRng::seed_from_u64(*seed).random(),
            },
            Self::Fixed(mines) => Self::Fixed(mines.clone()),
        }
    }
}

/// One game from first move to win or loss.
///
/// All mutation goes through [`apply`](Self::apply), [`use_hint`](Self::use_hint)
/// and [`reveal_all_mines`](Self::reveal_all_mines). Every change bumps
/// [`version`](Self::version), so a cloned session is a cheap snapshot to diff
/// against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SessionData")]
pub struct GameSession {
    config: GameConfig,
    mine_source: MineSource,
    board: Board,
    flags_remaining: CellCount,
    hints_remaining: u8,
    status: GameStatus,
    first_move_taken: bool,
    selected_tool: Tool,
    triggered_mine: Option<Coord2>,
    version: u64,
}

/// Serialized form of a [`GameSession`]; `flags_remaining` is derived from
/// the board rather than trusted.
#[derive(Deserialize)]
struct SessionData {
    config: GameConfig,
    mine_source: MineSource,
    board: Board,
    hints_remaining: u8,
    status: GameStatus,
    first_move_taken: bool,
    selected_tool: Tool,
    triggered_mine: Option<Coord2>,
    version: u64,
}

impl TryFrom<SessionData> for GameSession {
    type Error = GameError;

    fn try_from(data: SessionData) -> Result<Self> {
        let config = data.config;
        config.validate()?;
        if data.board.size() != config.size {
            return Err(ConfigError::InvalidBoardShape.into());
        }

        let mines = data.board.mine_count();
        let flagged = data.board.flagged_count();
        let placed_mines = if data.first_move_taken { config.mines } else { 0 };
        let untouched = data.first_move_taken || data.board.revealed_safe_count() == 0;
        if mines != placed_mines || flagged > config.mines || !untouched {
            return Err(ConfigError::InconsistentCounters { mines, flagged }.into());
        }

        if let Some(coords) = data.triggered_mine {
            data.board.validate_coords(coords)?;
        }

        Ok(Self {
            config,
            mine_source: data.mine_source,
            board: data.board,
            flags_remaining: config.mines - flagged,
            hints_remaining: data.hints_remaining,
            status: data.status,
            first_move_taken: data.first_move_taken,
            selected_tool: data.selected_tool,
            triggered_mine: data.triggered_mine,
            version: data.version,
        })
    }
}

impl GameSession {
    /// Session with a random seed drawn from the thread RNG.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_seed(config, rand::random())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::from_source(config, MineSource::Random { seed })
    }

    /// Session whose mines are exactly `mines`, placed on the first move.
    ///
    /// The layout must match `config.mines`; whether it respects the safe zone
    /// is only known once the first move is made.
    pub fn with_layout(config: GameConfig, mines: &[Coord2]) -> Result<Self> {
        config.validate()?;
        FixedMineGenerator::new(mines).validate(&Board::new(config.size), config.mines)?;
        Self::from_source(config, MineSource::Fixed(mines.to_vec()))
    }

    fn from_source(config: GameConfig, mine_source: MineSource) -> Result<Self> {
        config.validate()?;
        Ok(Self::fresh(config, mine_source))
    }

    fn fresh(config: GameConfig, mine_source: MineSource) -> Self {
        log::debug!(
            "Starting {:?} session with {} mines and {} hints",
            config.size,
            config.mines,
            config.hints
        );
        Self {
            config,
            mine_source,
            board: Board::new(config.size),
            flags_remaining: config.mines,
            hints_remaining: config.hints,
            status: GameStatus::InProgress,
            first_move_taken: false,
            selected_tool: Tool::default(),
            triggered_mine: None,
            version: 0,
        }
    }

    /// Brand-new session with the same configuration. Random sessions get a
    /// fresh seed derived from the current one.
    pub fn reset(&self) -> Self {
        log::debug!("Resetting session after {:?}", self.status);
        Self::fresh(self.config, self.mine_source.next())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mine_source(&self) -> &MineSource {
        &self.mine_source
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.flags_remaining
    }

    pub fn hints_remaining(&self) -> u8 {
        self.hints_remaining
    }

    pub fn first_move_taken(&self) -> bool {
        self.first_move_taken
    }

    pub fn selected_tool(&self) -> Tool {
        self.selected_tool
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.board.revealed_safe_count()
    }

    /// Safe cells the player still has to reveal.
    pub fn safe_cells_left(&self) -> CellCount {
        self.config.safe_cells() - self.board.revealed_safe_count()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.board[coords])
    }

    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        Ok(self.cell_at(coords)?.view())
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.selected_tool = tool;
    }

    /// Applies the selected tool to `coords`.
    pub fn tap(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        self.apply(Action::new(self.selected_tool.action_kind(), coords))
    }

    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome> {
        Ok(match action.kind {
            ActionKind::Reveal => ActionOutcome::Reveal(self.reveal(action.coords)?),
            ActionKind::ToggleFlag => ActionOutcome::Mark(self.toggle_flag(action.coords)?),
        })
    }

    /// Like [`apply`](Self::apply), but leaves `self` alone and returns the
    /// resulting session.
    pub fn applied(&self, action: Action) -> Result<(Self, ActionOutcome)> {
        let mut next = self.clone();
        let outcome = next.apply(action)?;
        Ok((next, outcome))
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.status.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = self.board[coords];
        if cell.revealed || cell.flagged {
            return Ok(RevealOutcome::NoChange);
        }

        self.ensure_mines_placed(coords)?;
        Ok(self.open(coords))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.status.is_finished() || self.board[coords].revealed {
            return Ok(MarkOutcome::NoChange);
        }

        if self.board[coords].flagged {
            self.board.set_flag(coords, false);
            self.flags_remaining += 1;
        } else if self.flags_remaining > 0 {
            self.board.set_flag(coords, true);
            self.flags_remaining -= 1;
        } else {
            return Ok(MarkOutcome::NoChange);
        }
        self.version += 1;

        if self.config.win_policy == WinPolicy::AllMinesFlagged {
            self.check_win();
        }
        Ok(MarkOutcome::Changed)
    }

    /// Reveals the lowest row-major safe cell that is still hidden.
    ///
    /// A wrongly flagged target loses its flag first. Does nothing when no
    /// hints are left, the game is over, or no hidden safe cell remains.
    pub fn use_hint(&mut self) -> Result<RevealOutcome> {
        if self.status.is_finished() || self.hints_remaining == 0 {
            return Ok(RevealOutcome::NoChange);
        }

        let Some(target) = self.hint_target() else {
            return Ok(RevealOutcome::NoChange);
        };

        self.ensure_mines_placed(target)?;
        if self.board[target].flagged {
            self.board.set_flag(target, false);
            self.flags_remaining += 1;
        }
        self.hints_remaining -= 1;
        log::debug!(
            "Hint reveals {:?}, {} hints left",
            target,
            self.hints_remaining
        );

        Ok(self.open(target))
    }

    /// Order in which mines should be shown after the game ends: the
    /// triggered mine first, then the rest in row-major order. Flagged mines
    /// keep their flag and are left out. Empty while the game is running.
    pub fn mine_reveal_order(&self) -> Vec<Coord2> {
        if !self.status.is_finished() {
            return Vec::new();
        }

        let triggered = self.triggered_mine;
        triggered
            .into_iter()
            .chain(
                self.board
                    .iter_mines()
                    .filter(|&coords| Some(coords) != triggered && !self.board[coords].flagged),
            )
            .collect()
    }

    /// Marks every mine from [`mine_reveal_order`](Self::mine_reveal_order)
    /// revealed and returns that order for the caller to animate.
    ///
    /// Flagged mines are not in the list and keep showing as
    /// [`CellView::Flagged`], so the terminal board is not fully revealed.
    pub fn reveal_all_mines(&mut self) -> Vec<Coord2> {
        let order = self.mine_reveal_order();
        let mut updated = false;
        for &coords in &order {
            updated |= self.board.reveal(coords);
        }
        if updated {
            self.version += 1;
        }
        order
    }

    fn hint_target(&self) -> Option<Coord2> {
        // a fixed layout is known before it is placed
        let pending: &[Coord2] = match (&self.mine_source, self.first_move_taken) {
            (MineSource::Fixed(mines), false) => mines.as_slice(),
            _ => &[],
        };

        self.board.iter_coords().find(|&coords| {
            let cell = self.board[coords];
            cell.is_unrevealed() && !cell.is_mine && !pending.contains(&coords)
        })
    }

    /// Places mines around `safe_center` on the first move. The session is
    /// left untouched if placement fails.
    fn ensure_mines_placed(&mut self, safe_center: Coord2) -> Result<()> {
        if self.first_move_taken {
            return Ok(());
        }

        let safe_zone = SafeZone::new(safe_center, self.config.safe_radius);
        let mut board = self.board.clone();
        match &self.mine_source {
            MineSource::Random { seed } => {
                RandomMineGenerator::new(*seed).generate(&mut board, self.config.mines, safe_zone)?
            }
            MineSource::Fixed(mines) => {
                FixedMineGenerator::new(mines).generate(&mut board, self.config.mines, safe_zone)?
            }
        }
        board.compute_adjacency();

        self.board = board;
        self.first_move_taken = true;
        Ok(())
    }

    /// Reveals a hidden, unflagged cell, flooding through zero cells.
    fn open(&mut self, coords: Coord2) -> RevealOutcome {
        self.version += 1;

        if self.board[coords].is_mine {
            self.board.reveal(coords);
            self.triggered_mine = Some(coords);
            self.end_game(GameStatus::Lost);
            return RevealOutcome::HitMine;
        }

        let opened = self.flood_reveal(coords);
        log::trace!("Revealed {} cells from {:?}", opened, coords);

        if self.check_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn flood_reveal(&mut self, start: Coord2) -> usize {
        let mut opened = 0;
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            let cell = self.board[coords];
            if cell.is_mine || !self.board.reveal(coords) {
                continue;
            }
            opened += 1;

            if cell.adjacent_mines == 0 {
                to_visit.extend(self.board.iter_neighbors(coords).filter(|&pos| {
                    let neighbor = self.board[pos];
                    !neighbor.revealed && !neighbor.flagged
                }));
            }
        }

        opened
    }

    fn check_win(&mut self) -> bool {
        if !self.first_move_taken || self.status.is_finished() {
            return self.status == GameStatus::Won;
        }

        let safe_cleared = self.board.revealed_safe_count() == self.board.safe_cell_count();
        let won = match self.config.win_policy {
            WinPolicy::SafeCellsRevealed => safe_cleared,
            WinPolicy::AllMinesFlagged => {
                safe_cleared && self.board.iter_mines().all(|coords| self.board[coords].flagged)
            }
        };

        if won {
            self.end_game(GameStatus::Won);
        }
        won
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }

        log::debug!("Game over: {:?} after {} changes", status, self.version);
        self.status = status;
        if status == GameStatus::Won {
            self.triggered_mine = None;
        }
    }
}

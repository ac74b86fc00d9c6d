use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible copy of a session, safe to hand to a renderer.
///
/// Hidden mines are indistinguishable from hidden safe cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub cells: Array2<CellView>,
    pub flags_remaining: CellCount,
    pub hints_remaining: u8,
    pub status: GameStatus,
    pub selected_tool: Tool,
    pub version: u64,
}

impl BoardSnapshot {
    pub fn from_session(session: &GameSession) -> Self {
        let board = session.board();
        let size = board.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), CellView::Hidden);

        for coords in board.iter_coords() {
            cells[coords.to_nd_index()] = board[coords].view();
        }

        Self {
            size,
            cells,
            flags_remaining: session.flags_remaining(),
            hints_remaining: session.hints_remaining(),
            status: session.status(),
            selected_tool: session.selected_tool(),
            version: session.version(),
        }
    }

    pub fn view_at(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn unrevealed_count(&self) -> usize {
        self.cells.iter().filter(|view| view.is_unrevealed()).count()
    }
}

impl From<&GameSession> for BoardSnapshot {
    fn from(session: &GameSession) -> Self {
        Self::from_session(session)
    }
}

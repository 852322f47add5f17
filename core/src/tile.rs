use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::{Coord2, cell_id};

/// Player-visible state stored by the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed(u8),
    Flagged,
}

impl CellState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// Snapshot of a single cell as the screen sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub id: String,
    pub mine: bool,
    pub revealed: bool,
    /// Adjacent pumpkins, only known once revealed.
    pub around: u8,
    pub flagged: bool,
}

impl GridCell {
    pub(crate) fn new(coords: Coord2, state: CellState, mine: bool) -> Self {
        let around = match state {
            CellState::Revealed(count) => count,
            _ => 0,
        };
        Self {
            id: cell_id(coords),
            mine,
            revealed: state.is_revealed(),
            around,
            flagged: state.is_flagged(),
        }
    }
}

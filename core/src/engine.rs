use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum BoardState {
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A grid being played: the fixed mine layout plus what the player has uncovered so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mine_layout: MineLayout,
    cells: Array2<CellState>,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    state: BoardState,
    triggered_mine: Option<Coord2>,
}

impl Board {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        Self {
            mine_layout,
            cells: Array2::default(size.to_nd_index()),
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            state: Default::default(),
            triggered_mine: None,
        }
    }

    /// Shorthand for generating a layout and wrapping it in a fresh board.
    pub fn generate<G: LayoutGenerator>(generator: G, config: GameConfig) -> Self {
        Self::new(generator.generate(config))
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_layout.total_cells()
    }

    /// Cells not revealed yet, including the pumpkin that ended a lost game.
    pub fn available_cells(&self) -> CellCount {
        self.total_cells() - self.revealed_count.0
    }

    pub fn flags_left(&self) -> isize {
        (self.mine_layout.mine_count() as isize) - (self.flagged_count.0 as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.cells[coords.to_nd_index()]
    }

    pub fn cell(&self, coords: Coord2) -> GridCell {
        GridCell::new(
            coords,
            self.cell_at(coords),
            self.mine_layout.contains_mine(coords),
        )
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.mine_layout.contains_mine(coords)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Whether a reveal at `coords` could change anything.
    pub fn can_reveal_at(&self, coords: Coord2) -> bool {
        !self.is_finished() && matches!(self.cell_at(coords), CellState::Hidden)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use CellState::*;
        use FlagOutcome::*;

        let coords = self.mine_layout.validate_coords(coords)?;
        self.check_not_finished()?;

        let slot = &mut self.cells[coords.to_nd_index()];
        Ok(match *slot {
            Hidden => {
                *slot = Flagged;
                self.flagged_count += 1;
                Changed
            }
            Flagged => {
                *slot = Hidden;
                self.flagged_count -= 1;
                Changed
            }
            Revealed(_) => NoChange,
        })
    }

    /// Reveals a single cell and annotates it with its adjacent pumpkin count.
    ///
    /// Flagged and already revealed cells are left untouched.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.mine_layout.validate_coords(coords)?;

        if !matches!(self.cell_at(coords), CellState::Hidden) {
            return Ok(RevealOutcome::NoChange);
        }
        self.check_not_finished()?;

        let around = self.mine_layout.adjacent_mine_count(coords);
        self.cells[coords.to_nd_index()] = CellState::Revealed(around);
        self.revealed_count += 1;

        Ok(if self.mine_layout.contains_mine(coords) {
            self.triggered_mine = Some(coords);
            self.state = BoardState::Lost;
            RevealOutcome::HitMine
        } else if self.revealed_count.0 == self.mine_layout.safe_cell_count() {
            self.state = BoardState::Won;
            RevealOutcome::Won
        } else {
            self.state = BoardState::Active;
            RevealOutcome::Revealed
        })
    }

    /// Row-major snapshot of the whole grid.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = GridCell> + '_> + '_ {
        let (rows, cols) = self.size();
        (0..rows).map(move |row| (0..cols).map(move |col| self.cell((row, col))))
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

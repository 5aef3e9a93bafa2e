use alloc::collections::BTreeSet;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

pub use cell::*;
pub use engine::*;
pub use generator::*;
pub use presenter::*;
pub use types::*;

mod cell;
mod engine;
mod generator;
mod presenter;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// Classic board: 8x8 with ten mines.
    pub const DEFAULT: Self = Self::new_unchecked((8, 8), 10);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(size, mines).validate()
    }

    /// Requires a non-empty board with `0 < mines < width * height`.
    pub fn validate(self) -> Result<Self> {
        let reason = if self.size.0 == 0 || self.size.1 == 0 {
            "board must be at least one cell wide and tall"
        } else if self.mines == 0 {
            "at least one mine is required"
        } else if self.mines >= self.total_cells() {
            "mines must leave at least one safe cell"
        } else {
            return Ok(self);
        };
        Err(GameError::InvalidConfiguration { reason })
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Fixed placement of mines on a board, decided once when the game is created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    size: Coord2,
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_positions(size: Coord2, positions: &[Position]) -> Result<Self> {
        let total_cells = mult(size.0, size.1);
        if total_cells == 0 {
            return Err(GameError::InvalidConfiguration {
                reason: "board must be at least one cell wide and tall",
            });
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        let mut seen = BTreeSet::new();
        for &position in positions {
            if position >= total_cells {
                return Err(GameError::InvalidConfiguration {
                    reason: "mine position lies outside the board",
                });
            }
            if !seen.insert(position) {
                return Err(GameError::InvalidConfiguration {
                    reason: "mine positions must be distinct",
                });
            }
            mine_mask[to_coords(position, size.0).to_nd_index()] = true;
        }

        let layout = Self {
            size,
            mine_mask,
            mine_count: seen.len() as CellCount,
        };
        layout.game_config().validate()?;
        Ok(layout)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size,
            mines: self.mine_count,
        }
    }

    pub fn validate_position(&self, position: Position) -> Result<Coord2> {
        if position < self.total_cells() {
            Ok(self.coords_of(position))
        } else {
            Err(GameError::InvalidMove { position })
        }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn position_of(&self, coords: Coord2) -> Position {
        to_position(coords, self.size.0)
    }

    pub fn coords_of(&self, position: Position) -> Coord2 {
        to_coords(position, self.size.0)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8, always fits
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    /// Mine coordinates in ascending position order.
    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        let (width, height) = self.size;
        (0..height)
            .flat_map(move |y| (0..width).map(move |x| (x, y)))
            .filter(move |&coords| self[coords])
    }

    pub fn mine_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.mine_coords().map(move |coords| self.position_of(coords))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

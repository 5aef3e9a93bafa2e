use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a single cell, stored by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCell {
    #[default]
    Hidden,
    /// Revealed safe cell with its adjacent mine count.
    Revealed(u8),
    /// Mine revealed when the game was lost.
    Exploded,
}

impl EngineCell {
    pub const fn is_revealed(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub const fn adjacent_mine_count(self) -> Option<u8> {
        match self {
            Self::Revealed(count) => Some(count),
            _ => None,
        }
    }
}

/// Snapshot of everything known about one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub position: Position,
    pub x: Coord,
    pub y: Coord,
    pub is_mine: bool,
    pub is_revealed: bool,
    /// Only known once the cell has been revealed.
    pub adjacent_mine_count: Option<u8>,
}

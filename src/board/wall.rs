//! Walls and the edges they block.
//!
//! A wall sits on the edge between its anchor cell and one neighbor:
//! horizontal walls separate the anchor from the cell below it, vertical
//! walls separate the anchor from the cell to its right.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{PlayerId, WallId};
use super::position::GridPosition;

/// Which edge of the anchor cell a wall occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

pub const ALL_ORIENTATIONS: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

impl Orientation {
    /// Returns the single-character protocol abbreviation.
    pub const fn protocol_char(self) -> char {
        match self {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        }
    }

    /// Parses an orientation from its protocol abbreviation.
    pub fn from_protocol_char(c: char) -> Option<Orientation> {
        match c {
            'h' | 'H' => Some(Orientation::Horizontal),
            'v' | 'V' => Some(Orientation::Vertical),
            _ => None,
        }
    }

    /// The cell on the far side of the blocked edge.
    pub const fn far_cell(self, anchor: GridPosition) -> GridPosition {
        match self {
            Orientation::Horizontal => GridPosition::new(anchor.col, anchor.row + 1),
            Orientation::Vertical => GridPosition::new(anchor.col + 1, anchor.row),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "horizontal"),
            Orientation::Vertical => write!(f, "vertical"),
        }
    }
}

/// A wall erected by a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    pub id: WallId,
    pub anchor: GridPosition,
    pub orientation: Orientation,
    pub owner: PlayerId,
    /// Zero-based creation order within the game.
    pub order: u32,
    pub created_at: DateTime<Utc>,
}

impl Wall {
    pub fn new(anchor: GridPosition, orientation: Orientation, owner: PlayerId, order: u32) -> Self {
        Wall {
            id: WallId::new(),
            anchor,
            orientation,
            owner,
            order,
            created_at: Utc::now(),
        }
    }

    /// The two cells separated by this wall.
    pub const fn edge(&self) -> (GridPosition, GridPosition) {
        (self.anchor, self.orientation.far_cell(self.anchor))
    }

    /// Returns true if this wall sits on the edge between `a` and `b`.
    ///
    /// Non-adjacent pairs are never blocked. The check is symmetric.
    pub fn blocks(&self, a: GridPosition, b: GridPosition) -> bool {
        if !a.is_adjacent(b) {
            return false;
        }
        let (near, far) = self.edge();
        (a == near && b == far) || (a == far && b == near)
    }
}

/// Returns true if any wall in `walls` blocks the step from `a` to `b`.
pub fn edge_blocked(walls: &[Wall], a: GridPosition, b: GridPosition) -> bool {
    walls.iter().any(|w| w.blocks(a, b))
}

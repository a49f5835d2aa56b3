//! Move records.
//!
//! A `GameMove` is what a player submits and what the state keeps in its
//! append-only history. Wall building is a separate command and does not
//! produce a move record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{MoveId, PlayerId};
use super::position::GridPosition;

/// What a move does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Put a new piece on an empty cell: `place e5`
    Place { at: GridPosition },

    /// Slide an existing piece up to two cells: `move e5 e3`
    Move { from: GridPosition, to: GridPosition },

    /// Give up the turn: `pass`
    Pass,

    /// Leave the game: `resign`
    Resign,
}

impl MoveKind {
    pub const fn name(&self) -> &'static str {
        match self {
            MoveKind::Place { .. } => "place",
            MoveKind::Move { .. } => "move",
            MoveKind::Pass => "pass",
            MoveKind::Resign => "resign",
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveKind::Place { at } => write!(f, "place {}", at),
            MoveKind::Move { from, to } => write!(f, "move {} {}", from, to),
            MoveKind::Pass => write!(f, "pass"),
            MoveKind::Resign => write!(f, "resign"),
        }
    }
}

/// A move submitted by one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMove {
    pub id: MoveId,
    pub player: PlayerId,
    pub kind: MoveKind,
    /// One-based position in the game's move history.
    pub sequence: u32,
    pub timestamp: DateTime<Utc>,
}

impl GameMove {
    pub fn new(player: PlayerId, kind: MoveKind, sequence: u32) -> Self {
        GameMove {
            id: MoveId::new(),
            player,
            kind,
            sequence,
            timestamp: Utc::now(),
        }
    }

    pub fn place(player: PlayerId, at: GridPosition, sequence: u32) -> Self {
        Self::new(player, MoveKind::Place { at }, sequence)
    }

    pub fn relocate(player: PlayerId, from: GridPosition, to: GridPosition, sequence: u32) -> Self {
        Self::new(player, MoveKind::Move { from, to }, sequence)
    }

    pub fn pass(player: PlayerId, sequence: u32) -> Self {
        Self::new(player, MoveKind::Pass, sequence)
    }

    pub fn resign(player: PlayerId, sequence: u32) -> Self {
        Self::new(player, MoveKind::Resign, sequence)
    }
}

//! Pieces on the board.

use serde::{Deserialize, Serialize};

use super::ids::{PieceId, PlayerId};
use super::position::GridPosition;

/// Furthest a piece may travel in one move, in Manhattan distance.
pub const MAX_MOVE_DISTANCE: u32 = 2;

/// A piece owned by one player.
///
/// Pieces are never edited in place: moving or retiring a piece yields a new
/// record with the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub owner: PlayerId,
    pub position: GridPosition,
    pub active: bool,
    pub move_count: u32,
}

impl Piece {
    /// Creates a fresh active piece that has not moved yet.
    pub fn new(owner: PlayerId, position: GridPosition) -> Self {
        Piece {
            id: PieceId::new(),
            owner,
            position,
            active: true,
            move_count: 0,
        }
    }

    /// Returns this piece relocated to `to` with its move counter bumped.
    pub fn moved_to(self, to: GridPosition) -> Self {
        Piece {
            position: to,
            move_count: self.move_count + 1,
            ..self
        }
    }

    /// Returns this piece taken out of play.
    pub fn deactivated(self) -> Self {
        Piece { active: false, ..self }
    }
}

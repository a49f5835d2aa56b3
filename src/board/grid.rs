//! Piece storage for one board.
//!
//! Only a handful of pieces exist at any time, so the board keeps a flat
//! list and finds pieces by scanning. The cell grid handed to hosts is
//! derived on demand and never stored.

use serde::{Deserialize, Serialize};

use super::ids::{PieceId, PlayerId};
use super::piece::Piece;
use super::position::{BoardSize, GridPosition};

/// Display state of one cell in the derived grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Empty,
    Occupied(PlayerId),
    Highlighted,
}

/// One cell of the derived grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub position: GridPosition,
    pub state: CellState,
}

/// The pieces on a board of fixed size.
///
/// The board itself does not reject two active pieces on one cell; the
/// validators in `rules` guarantee that never happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: BoardSize,
    pieces: Vec<Piece>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(size: BoardSize) -> Self {
        Board { size, pieces: Vec::new() }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Every piece record, active or not, in insertion order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Returns the active piece on `pos`, if any.
    pub fn piece_at(&self, pos: GridPosition) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.active && p.position == pos)
    }

    pub fn is_occupied(&self, pos: GridPosition) -> bool {
        self.piece_at(pos).is_some()
    }

    /// Appends `piece` at `pos`. Does not check occupancy.
    pub fn place(&mut self, piece: Piece, pos: GridPosition) {
        self.pieces.push(Piece { position: pos, ..piece });
    }

    /// Removes and returns the first active piece on `pos`.
    pub fn remove(&mut self, pos: GridPosition) -> Option<Piece> {
        let idx = self.pieces.iter().position(|p| p.active && p.position == pos)?;
        Some(self.pieces.remove(idx))
    }

    /// Returns a copy with piece `id` relocated to `to`.
    ///
    /// If no piece has that id the copy is unchanged.
    pub fn moved(&self, id: PieceId, to: GridPosition) -> Board {
        let mut next = self.clone();
        if let Some(piece) = next.pieces.iter_mut().find(|p| p.id == id) {
            *piece = piece.moved_to(to);
        }
        next
    }

    /// Active pieces, optionally restricted to one owner.
    pub fn active_pieces(&self, owner: Option<PlayerId>) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces
            .iter()
            .filter(move |p| p.active && owner.map_or(true, |o| p.owner == o))
    }

    /// Takes every piece belonging to `owner` out of play. Returns how many were retired.
    pub fn deactivate_owner(&mut self, owner: PlayerId) -> usize {
        let mut count = 0;
        for piece in self.pieces.iter_mut().filter(|p| p.active && p.owner == owner) {
            *piece = piece.deactivated();
            count += 1;
        }
        count
    }

    /// Builds the row-major cell grid, marking `highlights` on empty cells.
    pub fn cells(&self, highlights: &[GridPosition]) -> Vec<Vec<Cell>> {
        let n = self.size.dimension();
        (0..n)
            .map(|row| {
                (0..n)
                    .map(|col| {
                        let position = GridPosition::new(col, row);
                        let state = match self.piece_at(position) {
                            Some(p) => CellState::Occupied(p.owner),
                            None if highlights.contains(&position) => CellState::Highlighted,
                            None => CellState::Empty,
                        };
                        Cell { position, state }
                    })
                    .collect()
            })
            .collect()
    }
}

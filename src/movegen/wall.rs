//! Wall placement generation.
//!
//! A player may only build within one cell (king-move distance) of one of
//! their own active pieces, and never on an edge slot already taken by a
//! wall of the same orientation.

use std::collections::BTreeSet;

use crate::board::{GameState, GridPosition, Orientation, PlayerId, ALL_ORIENTATIONS};

/// Furthest a wall anchor may sit from one of the builder's pieces, in king moves.
pub const WALL_REACH: u32 = 1;

/// Returns true if `anchor` is within reach of one of `player`'s active pieces.
pub fn near_own_piece(state: &GameState, player: PlayerId, anchor: GridPosition) -> bool {
    state
        .board
        .active_pieces(Some(player))
        .any(|p| p.position.chebyshev(anchor) <= WALL_REACH)
}

/// Every wall `player` could legally build, sorted by anchor then orientation.
pub fn legal_walls(state: &GameState, player: PlayerId) -> Vec<(GridPosition, Orientation)> {
    let reach = WALL_REACH as i32;
    let mut anchors = BTreeSet::new();
    for piece in state.board.active_pieces(Some(player)) {
        for dr in -reach..=reach {
            for dc in -reach..=reach {
                let anchor = GridPosition::new(piece.position.col + dc, piece.position.row + dr);
                if anchor.is_valid(state.board_size) {
                    anchors.insert(anchor);
                }
            }
        }
    }

    anchors
        .into_iter()
        .flat_map(|anchor| ALL_ORIENTATIONS.into_iter().map(move |o| (anchor, o)))
        .filter(|&(anchor, o)| state.wall_at(anchor, o).is_none())
        .collect()
}

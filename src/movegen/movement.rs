//! Piece movement geometry.
//!
//! A piece travels at most `MAX_MOVE_DISTANCE` cells. A one-cell move needs
//! its single edge free of walls. A two-cell move needs some empty
//! intermediate cell adjacent to both ends, with neither edge walled off.

use crate::board::{
    edge_blocked, Board, GameState, GridPosition, MoveKind, PlayerId, Wall, MAX_MOVE_DISTANCE,
};

/// Returns true if a piece can travel from `from` to `to` without crossing a wall.
///
/// Does not look at whether `to` itself is occupied; callers check the target.
pub fn path_open(board: &Board, walls: &[Wall], from: GridPosition, to: GridPosition) -> bool {
    match from.manhattan(to) {
        1 => !edge_blocked(walls, from, to),
        2 => from.neighbors(board.size()).any(|mid| {
            mid.is_adjacent(to)
                && !board.is_occupied(mid)
                && !edge_blocked(walls, from, mid)
                && !edge_blocked(walls, mid, to)
        }),
        _ => false,
    }
}

/// All cells the piece on `from` could move to, in row-major order.
///
/// Empty when `from` is off the board.
pub fn reachable_targets(state: &GameState, from: GridPosition) -> Vec<GridPosition> {
    if !from.is_valid(state.board_size) {
        return Vec::new();
    }
    let reach = MAX_MOVE_DISTANCE as i32;
    let mut targets = Vec::new();
    for dr in -reach..=reach {
        for dc in -reach..=reach {
            let to = GridPosition::new(from.col + dc, from.row + dr);
            let distance = from.manhattan(to);
            if distance == 0 || distance > MAX_MOVE_DISTANCE {
                continue;
            }
            if is_reachable(state, from, to) {
                targets.push(to);
            }
        }
    }
    targets
}

/// Returns true if `to` is an empty on-board cell the piece on `from` can reach.
pub fn is_reachable(state: &GameState, from: GridPosition, to: GridPosition) -> bool {
    to.is_valid(state.board_size)
        && !state.board.is_occupied(to)
        && path_open(&state.board, &state.walls, from, to)
}

/// Returns true if the piece on `from` has at least one legal destination.
///
/// Every two-cell destination passes through a reachable one-cell neighbor,
/// so checking the immediate neighbors is enough.
pub fn has_any_move(state: &GameState, from: GridPosition) -> bool {
    from.neighbors(state.board_size).any(|to| is_reachable(state, from, to))
}

/// Every legal relocation for `player`'s active pieces.
pub fn legal_moves(state: &GameState, player: PlayerId) -> Vec<MoveKind> {
    state
        .board
        .active_pieces(Some(player))
        .flat_map(|piece| {
            let from = piece.position;
            reachable_targets(state, from)
                .into_iter()
                .map(move |to| MoveKind::Move { from, to })
        })
        .collect()
}

/// A placement for every empty cell.
pub fn legal_places(state: &GameState) -> Vec<MoveKind> {
    state
        .board_size
        .positions()
        .filter(|&at| !state.board.is_occupied(at))
        .map(|at| MoveKind::Place { at })
        .collect()
}

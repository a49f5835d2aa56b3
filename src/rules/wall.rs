//! Wall building.
//!
//! Walls are built by the player to move, next to one of their own pieces.
//! Whether building ends the turn is a rule switch; by default the builder
//! keeps the turn and only the turn counter advances.

use tracing::debug;

use crate::board::{GameState, GridPosition, Orientation, Wall};
use crate::error::{GameError, Rejection};
use crate::movegen::wall::near_own_piece;

use super::current_actor;
use super::phase::settle;

/// Builds a wall for the current player and returns the resulting snapshot.
pub fn build_wall(
    at: GridPosition,
    orientation: Orientation,
    state: &GameState,
) -> Result<GameState, GameError> {
    let result = resolve(at, orientation, state);
    if let Err(e) = &result {
        debug!(game = %state.id, at = %at, %orientation, error = %e, "wall rejected");
    }
    result
}

fn resolve(
    at: GridPosition,
    orientation: Orientation,
    state: &GameState,
) -> Result<GameState, GameError> {
    let player = current_actor(state)?;

    if !at.is_valid(state.board_size) {
        return Err(Rejection::OutOfBounds(at).into());
    }
    if state.wall_at(at, orientation).is_some() {
        return Err(Rejection::DuplicateWall(at, orientation).into());
    }
    if !near_own_piece(state, player, at) {
        return Err(Rejection::WallTooFar(at).into());
    }

    let mut next = state.clone();
    let order = next.walls.len() as u32;
    next.walls.push(Wall::new(at, orientation, player, order));
    if next.rules.wall_ends_turn {
        next.advance_turn();
    } else {
        next.turn_count += 1;
        next.touch();
    }
    settle(&mut next);
    debug!(game = %next.id, turn = next.turn_count, "wall {} {}", at, orientation.protocol_char());
    Ok(next)
}

//! Place, move, pass, and resign.
//!
//! Each accepted move is appended to the history, hands the turn to the
//! next seat that has not resigned, and bumps the turn counter.

use tracing::debug;

use crate::board::{
    EndReason, GameMove, GameState, GridPosition, MoveKind, Piece, PlayerId, MAX_MOVE_DISTANCE,
};
use crate::error::{GameError, Rejection};
use crate::movegen::movement::path_open;

use super::check_turn;
use super::phase::{finish, settle};

/// Validates `mv` against `state` and returns the resulting snapshot.
///
/// `state` is never modified; on rejection the caller keeps using it.
pub fn apply_move(mv: &GameMove, state: &GameState) -> Result<GameState, GameError> {
    let result = resolve(mv, state);
    if let Err(e) = &result {
        debug!(game = %state.id, player = %mv.player, kind = mv.kind.name(), error = %e, "move rejected");
    }
    result
}

fn resolve(mv: &GameMove, state: &GameState) -> Result<GameState, GameError> {
    check_turn(state, mv.player)?;

    let mut next = match mv.kind {
        MoveKind::Place { at } => place(state, mv.player, at)?,
        MoveKind::Move { from, to } => relocate(state, mv.player, from, to)?,
        MoveKind::Pass => state.clone(),
        MoveKind::Resign => resign(state, mv.player),
    };

    next.moves.push(mv.clone());
    next.advance_turn();
    settle(&mut next);
    debug!(game = %next.id, turn = next.turn_count, "{}", mv.kind);
    Ok(next)
}

fn place(state: &GameState, player: PlayerId, at: GridPosition) -> Result<GameState, GameError> {
    if !at.is_valid(state.board_size) {
        return Err(Rejection::OutOfBounds(at).into());
    }
    if state.board.is_occupied(at) {
        return Err(Rejection::Occupied(at).into());
    }
    let mut next = state.clone();
    next.board.place(Piece::new(player, at), at);
    Ok(next)
}

fn relocate(
    state: &GameState,
    player: PlayerId,
    from: GridPosition,
    to: GridPosition,
) -> Result<GameState, GameError> {
    let piece = match state.board.piece_at(from) {
        Some(p) if p.owner == player => *p,
        _ => return Err(Rejection::NoOwnPiece(from).into()),
    };
    if !to.is_valid(state.board_size) {
        return Err(Rejection::OutOfBounds(to).into());
    }
    if state.board.is_occupied(to) {
        return Err(Rejection::Occupied(to).into());
    }
    let distance = from.manhattan(to);
    if distance > MAX_MOVE_DISTANCE {
        return Err(Rejection::TooFar { distance, max: MAX_MOVE_DISTANCE }.into());
    }
    if !path_open(&state.board, &state.walls, from, to) {
        return Err(Rejection::PathBlocked { from, to }.into());
    }

    let mut next = state.clone();
    next.board = state.board.moved(piece.id, to);
    Ok(next)
}

/// Retires the player's pieces and takes them out of the rotation.
/// The game ends once at most one player is left.
fn resign(state: &GameState, player: PlayerId) -> GameState {
    let mut next = state.clone();
    next.board.deactivate_owner(player);
    if let Some(p) = next.players.iter_mut().find(|p| p.id == player) {
        p.resigned = true;
    }
    if next.remaining_players() <= 1 {
        finish(&mut next, EndReason::Resignation);
    }
    next
}

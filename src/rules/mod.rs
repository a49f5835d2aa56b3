//! State transitions.
//!
//! Every validator takes a snapshot and returns either a new snapshot or a
//! typed rejection. The input is never modified, so a rejected command
//! leaves the caller's state exactly as it was.

pub mod movement;
pub mod phase;
pub mod start;
pub mod wall;

pub use movement::apply_move;
pub use phase::{all_pieces_isolated, begin, end_game, is_game_over, pause, resume};
pub use start::start_game;
pub use wall::build_wall;

use crate::board::{GameState, Phase, PlayerId};
use crate::error::{GameError, Rejection};
use crate::movegen::Action;

/// Returns the id of the player to move, provided the game accepts moves.
pub(crate) fn current_actor(state: &GameState) -> Result<PlayerId, GameError> {
    if state.phase != Phase::Playing {
        return Err(Rejection::WrongPhase(state.phase).into());
    }
    let player = state.current().ok_or(Rejection::NoCurrentPlayer)?;
    if player.resigned {
        return Err(Rejection::PlayerResigned.into());
    }
    Ok(player.id)
}

/// Checks that `player` is the one to move.
pub(crate) fn check_turn(state: &GameState, player: PlayerId) -> Result<(), GameError> {
    if current_actor(state)? != player {
        return Err(Rejection::NotYourTurn.into());
    }
    Ok(())
}

/// Applies an action on behalf of the player to move.
pub fn apply_action(action: &Action, state: &GameState) -> Result<GameState, GameError> {
    match *action {
        Action::Play(kind) => {
            let mv = state
                .move_for_current(kind)
                .ok_or(Rejection::NoCurrentPlayer)?;
            apply_move(&mv, state)
        }
        Action::Wall { at, orientation } => build_wall(at, orientation, state),
    }
}

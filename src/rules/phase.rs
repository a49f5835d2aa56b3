//! Phase sequencing and end-of-game detection.
//!
//! Phase flow:
//! - Setup   -> Playing (once, when the game starts)
//! - Playing -> Paused -> Playing
//! - Playing -> Finished (isolation, resignation, or a host-imposed cap)
//!
//! Finished is terminal.

use tracing::info;

use crate::board::{EndReason, GameState, Phase};
use crate::error::{GameError, Rejection};
use crate::movegen::movement::has_any_move;
use crate::score::record_scores;

/// Moves a freshly built game from setup into play.
pub fn begin(state: &GameState) -> Result<GameState, GameError> {
    transition(state, Phase::Setup, Phase::Playing)
}

/// Suspends a game in progress.
pub fn pause(state: &GameState) -> Result<GameState, GameError> {
    transition(state, Phase::Playing, Phase::Paused)
}

/// Resumes a paused game.
pub fn resume(state: &GameState) -> Result<GameState, GameError> {
    transition(state, Phase::Paused, Phase::Playing)
}

/// Ends a game early for a host-side reason such as a turn cap.
pub fn end_game(state: &GameState, reason: EndReason) -> Result<GameState, GameError> {
    if state.is_finished() {
        return Err(Rejection::WrongPhase(state.phase).into());
    }
    let mut next = state.clone();
    finish(&mut next, reason);
    Ok(next)
}

fn transition(state: &GameState, from: Phase, to: Phase) -> Result<GameState, GameError> {
    if state.phase != from {
        return Err(Rejection::WrongPhase(state.phase).into());
    }
    let mut next = state.clone();
    next.phase = to;
    next.touch();
    Ok(next)
}

/// Returns true if there is at least one active piece and none of them can move.
///
/// An empty board is not considered isolated.
pub fn all_pieces_isolated(state: &GameState) -> bool {
    let mut pieces = state.board.active_pieces(None).peekable();
    if pieces.peek().is_none() {
        return false;
    }
    pieces.all(|p| !has_any_move(state, p.position))
}

/// Returns true if the game has finished or no active piece can move.
pub fn is_game_over(state: &GameState) -> bool {
    state.is_finished() || all_pieces_isolated(state)
}

/// Marks the game finished with `reason` and records the final scores.
pub(crate) fn finish(state: &mut GameState, reason: EndReason) {
    record_scores(state);
    state.phase = Phase::Finished;
    state.end_reason = Some(reason);
    state.touch();
    info!(game = %state.id, reason = reason.name(), turns = state.turn_count, "game finished");
}

/// Runs the end-of-game check after a transition.
pub(crate) fn settle(state: &mut GameState) {
    if state.phase == Phase::Playing && all_pieces_isolated(state) {
        finish(state, EndReason::Isolation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{
        BoardSize, GridPosition, Orientation, Piece, Player, PlayerColor, Rules, Wall,
    };

    fn new_state() -> GameState {
        let players = vec![
            Player::new("Player 1", PlayerColor::Black),
            Player::new("Player 2", PlayerColor::White),
        ];
        GameState::new(BoardSize::Small, players, Rules::default())
    }

    #[test]
    fn setup_to_playing() {
        let state = new_state();
        let playing = begin(&state).unwrap();
        assert_eq!(playing.phase, Phase::Playing);
        assert!(matches!(begin(&playing), Err(GameError::InvalidMove(_))));
    }

    #[test]
    fn pause_and_resume() {
        let playing = begin(&new_state()).unwrap();
        let paused = pause(&playing).unwrap();
        assert_eq!(paused.phase, Phase::Paused);
        assert!(pause(&paused).is_err());
        assert!(resume(&playing).is_err());
        assert_eq!(resume(&paused).unwrap().phase, Phase::Playing);
    }

    #[test]
    fn end_game_is_terminal() {
        let playing = begin(&new_state()).unwrap();
        let over = end_game(&playing, EndReason::MaxTurns).unwrap();
        assert!(over.is_finished());
        assert_eq!(over.end_reason, Some(EndReason::MaxTurns));
        assert!(end_game(&over, EndReason::MaxTurns).is_err());
        assert!(resume(&over).is_err());
    }

    #[test]
    fn empty_board_is_not_over() {
        let playing = begin(&new_state()).unwrap();
        assert!(!all_pieces_isolated(&playing));
        assert!(!is_game_over(&playing));
    }

    #[test]
    fn boxed_in_pieces_end_the_game() {
        let mut state = begin(&new_state()).unwrap();
        let a = state.players[0].id;
        let b = state.players[1].id;
        state.board.place(Piece::new(a, GridPosition::new(0, 0)), GridPosition::new(0, 0));
        state.board.place(Piece::new(b, GridPosition::new(1, 0)), GridPosition::new(1, 0));
        assert!(!all_pieces_isolated(&state));

        // Close (0,0)-(0,1), (1,0)-(1,1), and (1,0)-(2,0).
        for (col, row, o) in [
            (0, 0, Orientation::Horizontal),
            (1, 0, Orientation::Horizontal),
            (1, 0, Orientation::Vertical),
        ] {
            let order = state.walls.len() as u32;
            state.walls.push(Wall::new(GridPosition::new(col, row), o, a, order));
        }
        assert!(all_pieces_isolated(&state));
        assert!(is_game_over(&state));

        settle(&mut state);
        assert_eq!(state.phase, Phase::Finished);
        assert_eq!(state.end_reason, Some(EndReason::Isolation));
        assert_eq!(state.players[0].score, 1);
        assert_eq!(state.players[1].score, 1);
    }
}

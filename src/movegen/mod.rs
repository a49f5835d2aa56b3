//! Legal action generation.
//!
//! Enumerates everything the current player may do in a position: place a
//! piece, move a piece, build a wall, or pass. Also picks uniformly random
//! legal actions for self-play and benchmarks.

pub mod movement;
pub mod wall;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{GameState, GridPosition, MoveKind, Orientation, Phase};

/// One thing a player can do on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// A recorded move: place, move, pass, or resign.
    Play(MoveKind),

    /// Build a wall: `wall e4 h`
    Wall {
        at: GridPosition,
        orientation: Orientation,
    },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Play(kind) => write!(f, "{}", kind),
            Action::Wall { at, orientation } => {
                write!(f, "wall {} {}", at, orientation.protocol_char())
            }
        }
    }
}

/// Every legal action for the player to move.
///
/// Resigning is always possible while playing and is left out.
/// Returns an empty list outside the playing phase.
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    if state.phase != Phase::Playing {
        return Vec::new();
    }
    let player = match state.current() {
        Some(p) if !p.resigned => p.id,
        _ => return Vec::new(),
    };

    let mut actions: Vec<Action> = movement::legal_places(state)
        .into_iter()
        .chain(movement::legal_moves(state, player))
        .map(Action::Play)
        .collect();

    actions.extend(
        wall::legal_walls(state, player)
            .into_iter()
            .map(|(at, orientation)| Action::Wall { at, orientation }),
    );

    actions.push(Action::Play(MoveKind::Pass));
    actions
}

/// Picks a uniformly random legal action, or `None` if there is nothing to do.
pub fn random_action(state: &GameState, rng: &mut impl Rng) -> Option<Action> {
    let legal = legal_actions(state);
    if legal.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..legal.len());
    Some(legal[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardSize, GameSettings};
    use crate::rules::{apply_action, start_game};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn new_game() -> GameState {
        start_game(&GameSettings::new(BoardSize::Small, 2)).unwrap()
    }

    #[test]
    fn empty_board_offers_places_and_pass() {
        let state = new_game();
        let actions = legal_actions(&state);
        assert_eq!(actions.len(), 82);
        assert_eq!(actions.last(), Some(&Action::Play(MoveKind::Pass)));
    }

    #[test]
    fn nothing_to_do_outside_playing() {
        let mut state = new_game();
        state.phase = Phase::Paused;
        assert!(legal_actions(&state).is_empty());
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(random_action(&state, &mut rng), None);
    }

    #[test]
    fn every_generated_action_is_accepted() {
        let mut state = new_game();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..40 {
            if state.is_finished() {
                break;
            }
            for action in legal_actions(&state) {
                assert!(
                    apply_action(&action, &state).is_ok(),
                    "generated illegal action: {}",
                    action
                );
            }
            let action = random_action(&state, &mut rng).unwrap();
            state = apply_action(&action, &state).unwrap();
        }
    }

    #[test]
    fn same_seed_same_actions() {
        let state = new_game();
        let a = random_action(&state, &mut SmallRng::seed_from_u64(99));
        let b = random_action(&state, &mut SmallRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn action_display() {
        let wall = Action::Wall {
            at: GridPosition::new(4, 3),
            orientation: Orientation::Horizontal,
        };
        assert_eq!(wall.to_string(), "wall e4 h");
        assert_eq!(Action::Play(MoveKind::Pass).to_string(), "pass");
    }
}

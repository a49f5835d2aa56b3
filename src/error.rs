//! Error types shared by the validators, the repository port, and the service.

use crate::board::{GameId, GridPosition, Orientation, Phase};

/// Why a move or wall was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("game is {0:?}, moves are only accepted while playing")]
    WrongPhase(Phase),

    #[error("no current player")]
    NoCurrentPlayer,

    #[error("it is not this player's turn")]
    NotYourTurn,

    #[error("player has resigned")]
    PlayerResigned,

    #[error("position {0} is off the board")]
    OutOfBounds(GridPosition),

    #[error("position {0} is occupied")]
    Occupied(GridPosition),

    #[error("no piece of the acting player at {0}")]
    NoOwnPiece(GridPosition),

    #[error("distance {distance} exceeds the maximum of {max}")]
    TooFar { distance: u32, max: u32 },

    #[error("path from {from} to {to} is blocked")]
    PathBlocked { from: GridPosition, to: GridPosition },

    #[error("a {1} wall already stands at {0}")]
    DuplicateWall(GridPosition, Orientation),

    #[error("wall at {0} is not next to any of the player's pieces")]
    WallTooFar(GridPosition),

    #[error("nothing to undo")]
    NothingToUndo,
}

/// Top-level error for every fallible engine operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("invalid move: {0}")]
    InvalidMove(#[from] Rejection),

    #[error("game not found: {0}")]
    GameNotFound(GameId),

    #[error("persistence failure: {0}")]
    PersistenceFailure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_converts_into_invalid_move() {
        let err: GameError = Rejection::Occupied(GridPosition::new(4, 4)).into();
        assert!(matches!(err, GameError::InvalidMove(Rejection::Occupied(_))));
        assert_eq!(err.to_string(), "invalid move: position e5 is occupied");
    }

    #[test]
    fn messages_name_the_problem() {
        let e = Rejection::TooFar { distance: 3, max: 2 };
        assert_eq!(e.to_string(), "distance 3 exceeds the maximum of 2");
        let e = Rejection::DuplicateWall(GridPosition::new(0, 0), Orientation::Vertical);
        assert_eq!(e.to_string(), "a vertical wall already stands at a1");
    }
}

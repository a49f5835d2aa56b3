//! Game service.
//!
//! Ties the pure transitions in `rules` to a repository and a per-game
//! snapshot timeline. Each command loads the current snapshot, runs the
//! matching validator, saves the result, and records it for undo. A
//! rejected command or a failed save leaves both the repository and the
//! timeline untouched.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::board::{
    EndReason, GameId, GameMove, GameSettings, GameState, GridPosition, Orientation, PlayerId,
};
use crate::error::{GameError, Rejection};
use crate::history::Timeline;
use crate::movegen::Action;
use crate::repository::GameRepository;
use crate::rules;
use crate::score::{self, GameResult};

pub struct GameService<R: GameRepository> {
    repo: R,
    timelines: HashMap<GameId, Timeline>,
}

impl<R: GameRepository> GameService<R> {
    pub fn new(repo: R) -> Self {
        GameService {
            repo,
            timelines: HashMap::new(),
        }
    }

    /// Creates a game, persists it, and opens its timeline.
    pub fn start_game(&mut self, settings: &GameSettings) -> Result<GameState, GameError> {
        let state = rules::start_game(settings)?;
        self.repo.save(&state)?;
        self.timelines.insert(state.id, Timeline::new(state.clone()));
        Ok(state)
    }

    /// Returns the latest saved snapshot of a game.
    pub fn load_game(&self, id: GameId) -> Result<GameState, GameError> {
        self.repo.load(id)?.ok_or(GameError::GameNotFound(id))
    }

    pub fn apply_move(&mut self, id: GameId, mv: &GameMove) -> Result<GameState, GameError> {
        let state = self.load_game(id)?;
        let next = rules::apply_move(mv, &state)?;
        self.commit(next)
    }

    pub fn build_wall(
        &mut self,
        id: GameId,
        at: GridPosition,
        orientation: Orientation,
    ) -> Result<GameState, GameError> {
        let state = self.load_game(id)?;
        let next = rules::build_wall(at, orientation, &state)?;
        self.commit(next)
    }

    /// Applies an action for whoever is to move.
    pub fn play(&mut self, id: GameId, action: &Action) -> Result<GameState, GameError> {
        let state = self.load_game(id)?;
        let next = rules::apply_action(action, &state)?;
        self.commit(next)
    }

    pub fn pause(&mut self, id: GameId) -> Result<GameState, GameError> {
        let state = self.load_game(id)?;
        let next = rules::pause(&state)?;
        self.commit(next)
    }

    pub fn resume(&mut self, id: GameId) -> Result<GameState, GameError> {
        let state = self.load_game(id)?;
        let next = rules::resume(&state)?;
        self.commit(next)
    }

    pub fn end_game(&mut self, id: GameId, reason: EndReason) -> Result<GameState, GameError> {
        let state = self.load_game(id)?;
        let next = rules::end_game(&state, reason)?;
        self.commit(next)
    }

    /// Steps a game back to its previous snapshot and saves it.
    pub fn undo(&mut self, id: GameId) -> Result<GameState, GameError> {
        let current = self.load_game(id)?;
        let timeline = self
            .timelines
            .entry(id)
            .or_insert_with(|| Timeline::new(current));
        if !timeline.can_undo() {
            return Err(Rejection::NothingToUndo.into());
        }
        let previous = timeline.snapshots()[timeline.len() - 2].state.clone();
        self.repo.save(&previous)?;
        timeline.undo();
        debug!(game = %id, turn = previous.turn_count, "undo");
        Ok(previous)
    }

    pub fn compute_scores(&self, id: GameId) -> Result<HashMap<PlayerId, u32>, GameError> {
        Ok(score::compute_scores(&self.load_game(id)?))
    }

    pub fn result(&self, id: GameId) -> Result<GameResult, GameError> {
        Ok(score::game_result(&self.load_game(id)?))
    }

    pub fn is_game_over(&self, id: GameId) -> Result<bool, GameError> {
        Ok(rules::is_game_over(&self.load_game(id)?))
    }

    pub fn delete_game(&mut self, id: GameId) -> Result<(), GameError> {
        self.repo.delete(id)?;
        self.timelines.remove(&id);
        Ok(())
    }

    pub fn list_active(&self) -> Result<Vec<GameState>, GameError> {
        self.repo.list_active()
    }

    pub fn list_completed(&self) -> Result<Vec<GameState>, GameError> {
        self.repo.list_completed()
    }

    /// The in-session history of a game, if any command has touched it.
    pub fn timeline(&self, id: GameId) -> Option<&Timeline> {
        self.timelines.get(&id)
    }

    fn commit(&mut self, next: GameState) -> Result<GameState, GameError> {
        self.repo.save(&next)?;
        let version = match self.timelines.get_mut(&next.id) {
            Some(timeline) => timeline.push(next.clone()),
            None => {
                self.timelines.insert(next.id, Timeline::new(next.clone()));
                0
            }
        };
        info!(
            game = %next.id,
            version,
            turn = next.turn_count,
            phase = %next.phase,
            "state saved"
        );
        Ok(next)
    }
}

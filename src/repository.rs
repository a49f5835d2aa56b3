//! Persistence port.
//!
//! The rules never touch storage. The service saves each accepted snapshot
//! through a `GameRepository`; how it is stored is up to the implementation.

use std::collections::HashMap;

use crate::board::{GameId, GameState};
use crate::error::GameError;

pub trait GameRepository {
    /// Stores `state`, replacing any earlier snapshot of the same game.
    fn save(&mut self, state: &GameState) -> Result<(), GameError>;

    fn load(&self, id: GameId) -> Result<Option<GameState>, GameError>;

    /// Removes a game. Deleting an unknown id is `GameNotFound`.
    fn delete(&mut self, id: GameId) -> Result<(), GameError>;

    /// Every stored game, oldest first.
    fn list_all(&self) -> Result<Vec<GameState>, GameError>;

    fn list_active(&self) -> Result<Vec<GameState>, GameError> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|g| !g.is_finished())
            .collect())
    }

    fn list_completed(&self) -> Result<Vec<GameState>, GameError> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|g| g.is_finished())
            .collect())
    }
}

/// Keeps the latest snapshot of each game in memory.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    games: HashMap<GameId, GameState>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl GameRepository for InMemoryRepository {
    fn save(&mut self, state: &GameState) -> Result<(), GameError> {
        self.games.insert(state.id, state.clone());
        Ok(())
    }

    fn load(&self, id: GameId) -> Result<Option<GameState>, GameError> {
        Ok(self.games.get(&id).cloned())
    }

    fn delete(&mut self, id: GameId) -> Result<(), GameError> {
        self.games
            .remove(&id)
            .map(|_| ())
            .ok_or(GameError::GameNotFound(id))
    }

    fn list_all(&self) -> Result<Vec<GameState>, GameError> {
        let mut games: Vec<GameState> = self.games.values().cloned().collect();
        games.sort_by_key(|g| (g.created_at, g.id));
        Ok(games)
    }
}

//! Game settings and rule switches.
//!
//! Settings are supplied by the host when a game starts. Only the board
//! size, player count, seat names, AI seats, and `Rules` affect the engine;
//! the remaining fields are carried through for the host.

use serde::{Deserialize, Serialize};

use super::player::AiDifficulty;
use super::position::BoardSize;
use crate::error::GameError;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Default per-move time limit in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 60;

/// Cosmetic theme, ignored by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTheme {
    Traditional,
    Modern,
    Dark,
}

/// Rule switches that change how transitions behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rules {
    /// When set, building a wall passes the turn to the next player.
    /// Otherwise the builder keeps the turn and only the turn counter moves.
    pub wall_ends_turn: bool,
}

/// Everything the host chooses before a game starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub board_size: BoardSize,
    pub player_count: usize,
    /// Seconds per move; 0 means unlimited. Enforced by the host, not the engine.
    pub time_limit_secs: u32,
    pub ai_difficulty: Option<AiDifficulty>,
    /// Seat indices played by the computer.
    pub ai_players: Vec<usize>,
    /// Optional display names by seat; missing entries fall back to "Player N".
    pub player_names: Vec<String>,
    pub color_theme: ColorTheme,
    pub is_online_mode: bool,
    pub allow_spectators: bool,
    pub rules: Rules,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            board_size: BoardSize::Small,
            player_count: 2,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            ai_difficulty: None,
            ai_players: Vec::new(),
            player_names: Vec::new(),
            color_theme: ColorTheme::Traditional,
            is_online_mode: false,
            allow_spectators: false,
            rules: Rules::default(),
        }
    }
}

impl GameSettings {
    /// Settings for `player_count` players on a board of the given size.
    pub fn new(board_size: BoardSize, player_count: usize) -> Self {
        GameSettings {
            board_size,
            player_count,
            ..Default::default()
        }
    }

    pub fn is_unlimited_time(&self) -> bool {
        self.time_limit_secs == 0
    }

    pub fn is_ai_game(&self) -> bool {
        self.ai_difficulty.is_some() || !self.ai_players.is_empty()
    }

    /// Checks the settings the engine depends on.
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(GameError::InvalidSettings(format!(
                "player count must be between {} and {}, got {}",
                MIN_PLAYERS, MAX_PLAYERS, self.player_count
            )));
        }
        if let Some(&seat) = self.ai_players.iter().find(|&&s| s >= self.player_count) {
            return Err(GameError::InvalidSettings(format!(
                "AI seat {} out of range for {} players",
                seat, self.player_count
            )));
        }
        Ok(())
    }
}

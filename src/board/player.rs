//! Players and their cosmetic attributes.

use serde::{Deserialize, Serialize};

use super::ids::PlayerId;

/// Seat color, assigned in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Black,
    White,
    Blue,
    Green,
}

/// Colors in the order they are handed out to seats.
pub const SEAT_COLORS: [PlayerColor; 4] = [
    PlayerColor::Black,
    PlayerColor::White,
    PlayerColor::Blue,
    PlayerColor::Green,
];

impl PlayerColor {
    /// Returns the single-character abbreviation used on the text board.
    pub const fn protocol_char(self) -> char {
        match self {
            PlayerColor::Black => 'B',
            PlayerColor::White => 'W',
            PlayerColor::Blue => 'U',
            PlayerColor::Green => 'G',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PlayerColor::Black => "black",
            PlayerColor::White => "white",
            PlayerColor::Blue => "blue",
            PlayerColor::Green => "green",
        }
    }
}

/// Strength hint for computer-controlled seats. The engine itself does not play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiDifficulty {
    Easy,
    Medium,
    Hard,
}

impl AiDifficulty {
    pub const fn search_depth(self) -> u32 {
        match self {
            AiDifficulty::Easy => 2,
            AiDifficulty::Medium => 4,
            AiDifficulty::Hard => 6,
        }
    }

    pub fn from_name(s: &str) -> Option<AiDifficulty> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Some(AiDifficulty::Easy),
            "medium" => Some(AiDifficulty::Medium),
            "hard" => Some(AiDifficulty::Hard),
            _ => None,
        }
    }
}

/// A seat at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    pub score: u32,
    pub is_ai: bool,
    pub ai_difficulty: Option<AiDifficulty>,
    /// Resigned players keep their seat but no longer take turns.
    pub resigned: bool,
}

impl Player {
    /// Creates a human player with a fresh id.
    pub fn new(name: impl Into<String>, color: PlayerColor) -> Self {
        Player {
            id: PlayerId::new(),
            name: name.into(),
            color,
            score: 0,
            is_ai: false,
            ai_difficulty: None,
            resigned: false,
        }
    }

    /// Marks this seat as computer-controlled.
    pub fn with_ai(mut self, difficulty: Option<AiDifficulty>) -> Self {
        self.is_ai = true;
        self.ai_difficulty = difficulty;
        self
    }
}

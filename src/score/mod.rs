//! Territory scoring.
//!
//! Scores are computed on demand from a snapshot. `record_scores` stamps
//! them onto the players when a game finishes.

pub mod result;
pub mod territory;

pub use result::{determine_winner, game_result, GameResult, GameStats, PlayerScore};
pub use territory::{compute_scores, player_territory, record_scores, territory_region};

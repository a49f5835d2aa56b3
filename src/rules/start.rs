//! Game creation.

use tracing::info;

use crate::board::{GameSettings, GameState, Player, SEAT_COLORS};
use crate::error::GameError;

use super::phase::begin;

/// Builds a new game from `settings`, ready for the first move.
///
/// Seats are colored black, white, blue, green in turn order. Games start
/// directly in the playing phase since there is no setup action.
pub fn start_game(settings: &GameSettings) -> Result<GameState, GameError> {
    settings.validate()?;

    let players = SEAT_COLORS
        .iter()
        .take(settings.player_count)
        .enumerate()
        .map(|(seat, &color)| {
            let name = settings
                .player_names
                .get(seat)
                .cloned()
                .unwrap_or_else(|| format!("Player {}", seat + 1));
            let player = Player::new(name, color);
            if settings.ai_players.contains(&seat) {
                player.with_ai(settings.ai_difficulty)
            } else {
                player
            }
        })
        .collect();

    let state = begin(&GameState::new(settings.board_size, players, settings.rules))?;
    info!(
        game = %state.id,
        size = %settings.board_size,
        players = settings.player_count,
        "game started"
    );
    Ok(state)
}

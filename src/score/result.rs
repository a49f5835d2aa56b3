//! Final standings and game statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::{EndReason, GameId, GameState, PlayerColor, PlayerId};

use super::territory::compute_scores;

/// One seat's final territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    pub score: u32,
    pub resigned: bool,
}

/// Counters summarising a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub total_turns: u32,
    /// Recorded moves, including passes and resignations.
    pub total_moves: usize,
    pub total_walls: usize,
    pub duration_secs: i64,
}

impl GameStats {
    pub fn from_state(state: &GameState) -> Self {
        GameStats {
            total_turns: state.turn_count,
            total_moves: state.moves.len(),
            total_walls: state.walls.len(),
            duration_secs: (state.updated_at - state.created_at).num_seconds().max(0),
        }
    }
}

/// Outcome of a game, scored at the moment it was computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub game_id: GameId,
    pub winner: Option<PlayerId>,
    /// Seat order.
    pub scores: Vec<PlayerScore>,
    pub stats: GameStats,
    pub end_reason: Option<EndReason>,
    pub finished_at: DateTime<Utc>,
}

impl GameResult {
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    /// Scores from best to worst; ties keep seat order.
    pub fn rankings(&self) -> Vec<&PlayerScore> {
        let mut ranked: Vec<&PlayerScore> = self.scores.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    pub fn score_of(&self, player: PlayerId) -> Option<u32> {
        self.scores.iter().find(|s| s.player == player).map(|s| s.score)
    }
}

/// Picks the winner from final scores.
///
/// A game ended by resignation goes to the last player standing. Otherwise
/// the single highest score among players who have not resigned wins, and
/// a tie at the top is a draw.
pub fn determine_winner(scores: &[PlayerScore], end_reason: Option<EndReason>) -> Option<PlayerId> {
    let standing: Vec<&PlayerScore> = scores.iter().filter(|s| !s.resigned).collect();
    if end_reason == Some(EndReason::Resignation) && standing.len() == 1 {
        return Some(standing[0].player);
    }
    let best = standing.iter().map(|s| s.score).max()?;
    let mut leaders = standing.iter().filter(|s| s.score == best);
    match (leaders.next(), leaders.next()) {
        (Some(leader), None) => Some(leader.player),
        _ => None,
    }
}

/// Scores `state` and packages the result.
pub fn game_result(state: &GameState) -> GameResult {
    let totals = compute_scores(state);
    let scores: Vec<PlayerScore> = state
        .players
        .iter()
        .map(|p| PlayerScore {
            player: p.id,
            name: p.name.clone(),
            color: p.color,
            score: totals.get(&p.id).copied().unwrap_or(0),
            resigned: p.resigned,
        })
        .collect();
    GameResult {
        game_id: state.id,
        winner: determine_winner(&scores, state.end_reason),
        stats: GameStats::from_state(state),
        end_reason: state.end_reason,
        finished_at: state.updated_at,
        scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardSize, GameSettings, GridPosition, MoveKind};
    use crate::rules::{apply_move, start_game};

    fn play(state: &GameState, kind: MoveKind) -> GameState {
        let mv = state.move_for_current(kind).unwrap();
        apply_move(&mv, state).unwrap()
    }

    fn score(player: PlayerId, score: u32, resigned: bool) -> PlayerScore {
        PlayerScore {
            player,
            name: String::new(),
            color: PlayerColor::Black,
            score,
            resigned,
        }
    }

    #[test]
    fn unique_top_score_wins() {
        let (a, b, c) = (PlayerId::new(), PlayerId::new(), PlayerId::new());
        let scores = [score(a, 10, false), score(b, 30, false), score(c, 20, false)];
        assert_eq!(determine_winner(&scores, Some(EndReason::Isolation)), Some(b));
    }

    #[test]
    fn tie_at_top_is_a_draw() {
        let (a, b) = (PlayerId::new(), PlayerId::new());
        let scores = [score(a, 40, false), score(b, 40, false)];
        assert_eq!(determine_winner(&scores, None), None);
    }

    #[test]
    fn last_player_standing_wins_by_resignation() {
        let (a, b) = (PlayerId::new(), PlayerId::new());
        let scores = [score(a, 0, true), score(b, 0, false)];
        assert_eq!(determine_winner(&scores, Some(EndReason::Resignation)), Some(b));
    }

    #[test]
    fn result_of_played_game() {
        let state = start_game(&GameSettings::new(BoardSize::Small, 2)).unwrap();
        let s1 = play(&state, MoveKind::Place { at: GridPosition::new(4, 4) });
        let s2 = play(&s1, MoveKind::Place { at: GridPosition::new(0, 0) });
        let s3 = play(&s2, MoveKind::Pass);

        let result = game_result(&s3);
        assert_eq!(result.game_id, s3.id);
        assert_eq!(result.score_of(s3.players[0].id), Some(80));
        assert_eq!(result.score_of(s3.players[1].id), Some(80));
        assert!(result.is_draw());
        assert_eq!(result.stats.total_turns, 3);
        assert_eq!(result.stats.total_moves, 3);
        assert_eq!(result.stats.total_walls, 0);
    }

    #[test]
    fn rankings_sort_descending() {
        let (a, b, c) = (PlayerId::new(), PlayerId::new(), PlayerId::new());
        let scores = vec![score(a, 5, false), score(b, 50, false), score(c, 5, false)];
        let result = GameResult {
            game_id: GameId::new(),
            winner: determine_winner(&scores, None),
            scores,
            stats: GameStats {
                total_turns: 10,
                total_moves: 8,
                total_walls: 2,
                duration_secs: 125,
            },
            end_reason: Some(EndReason::Isolation),
            finished_at: Utc::now(),
        };
        let order: Vec<_> = result.rankings().iter().map(|s| s.player).collect();
        assert_eq!(order, vec![b, a, c]);
        assert_eq!(result.winner, Some(b));
    }
}

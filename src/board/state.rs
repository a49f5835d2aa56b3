//! Game state representation.
//!
//! A `GameState` is a complete snapshot of one game: board, players, walls,
//! move history, whose turn it is, and the phase. Snapshots are values;
//! every transition in `rules` clones the input and returns a new one, so
//! earlier snapshots stay valid for history and undo.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::grid::Board;
use super::ids::{GameId, PlayerId};
use super::moves::{GameMove, MoveKind};
use super::player::Player;
use super::position::{BoardSize, GridPosition};
use super::settings::Rules;
use super::wall::{Orientation, Wall};

/// The lifecycle stage of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    Playing,
    Paused,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Why a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// No active piece has a legal move left.
    Isolation,
    /// All but at most one player resigned.
    Resignation,
    /// A host-imposed turn cap was reached.
    MaxTurns,
}

impl EndReason {
    pub const fn name(self) -> &'static str {
        match self {
            EndReason::Isolation => "isolation",
            EndReason::Resignation => "resignation",
            EndReason::MaxTurns => "max_turns",
        }
    }
}

/// Complete game snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub id: GameId,
    pub board_size: BoardSize,
    /// Seats in turn order.
    pub players: Vec<Player>,
    /// Index into `players`; always in range.
    pub current_player: usize,
    pub board: Board,
    pub walls: Vec<Wall>,
    /// Append-only move history.
    pub moves: Vec<GameMove>,
    pub turn_count: u32,
    pub phase: Phase,
    pub end_reason: Option<EndReason>,
    pub rules: Rules,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GameState {
    /// Creates a game in the setup phase with an empty board.
    ///
    /// `players` must not be empty.
    pub fn new(board_size: BoardSize, players: Vec<Player>, rules: Rules) -> Self {
        let now = Utc::now();
        GameState {
            id: GameId::new(),
            board_size,
            players,
            current_player: 0,
            board: Board::new(board_size),
            walls: Vec::new(),
            moves: Vec::new(),
            turn_count: 0,
            phase: Phase::Setup,
            end_reason: None,
            rules,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn current(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Players who have not resigned.
    pub fn remaining_players(&self) -> usize {
        self.players.iter().filter(|p| !p.resigned).count()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn wall_at(&self, anchor: GridPosition, orientation: Orientation) -> Option<&Wall> {
        self.walls
            .iter()
            .find(|w| w.anchor == anchor && w.orientation == orientation)
    }

    /// Sequence number the next recorded move should carry.
    pub fn next_sequence(&self) -> u32 {
        self.moves.len() as u32 + 1
    }

    /// Builds a move of `kind` for the player whose turn it is.
    pub fn move_for_current(&self, kind: MoveKind) -> Option<GameMove> {
        self.current()
            .map(|p| GameMove::new(p.id, kind, self.next_sequence()))
    }

    /// Index of the next seat after the current one that has not resigned.
    ///
    /// Falls back to plain rotation when every other seat has resigned.
    pub fn next_player_index(&self) -> usize {
        let n = self.players.len();
        if n == 0 {
            return 0;
        }
        (1..=n)
            .map(|step| (self.current_player + step) % n)
            .find(|&i| !self.players[i].resigned)
            .unwrap_or((self.current_player + 1) % n)
    }

    /// Returns a copy with the turn handed to the next player and the turn counter bumped.
    pub fn next_turn(&self) -> GameState {
        let mut next = self.clone();
        next.advance_turn();
        next
    }

    /// Hands the turn to the next player and bumps the turn counter in place.
    pub fn advance_turn(&mut self) {
        self.current_player = self.next_player_index();
        self.turn_count += 1;
        self.touch();
    }

    /// Refreshes `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::player::{PlayerColor, SEAT_COLORS};

    fn state_with(count: usize) -> GameState {
        let players = SEAT_COLORS[..count]
            .iter()
            .enumerate()
            .map(|(i, &c)| Player::new(format!("Player {}", i + 1), c))
            .collect();
        GameState::new(BoardSize::Medium, players, Rules::default())
    }

    #[test]
    fn phase_display_names() {
        assert_eq!(Phase::Playing.to_string(), "playing");
        assert_eq!(Phase::Finished.to_string(), "finished");
    }

    #[test]
    fn new_state_is_empty() {
        let state = state_with(2);
        assert_eq!(state.phase, Phase::Setup);
        assert_eq!(state.turn_count, 0);
        assert_eq!(state.current_player, 0);
        assert!(state.walls.is_empty());
        assert!(state.moves.is_empty());
        assert_eq!(state.board.pieces().len(), 0);
        assert_eq!(state.current().map(|p| p.color), Some(PlayerColor::Black));
    }

    #[test]
    fn next_turn_rotates_and_leaves_original() {
        let state = state_with(2);
        let one = state.next_turn();
        let two = one.next_turn();

        assert_eq!(one.current_player, 1);
        assert_eq!(one.turn_count, 1);
        assert_eq!(two.current_player, 0);
        assert_eq!(two.turn_count, 2);

        assert_eq!(state.current_player, 0);
        assert_eq!(state.turn_count, 0);
        assert_eq!(two.id, state.id);
        assert_eq!(two.players.len(), state.players.len());
    }

    #[test]
    fn next_player_skips_resigned() {
        let mut state = state_with(4);
        state.players[1].resigned = true;
        state.players[2].resigned = true;
        assert_eq!(state.next_player_index(), 3);
        state.current_player = 3;
        assert_eq!(state.next_player_index(), 0);
    }

    #[test]
    fn move_for_current_uses_next_sequence() {
        let state = state_with(3).next_turn();
        let mv = state.move_for_current(MoveKind::Pass).unwrap();
        assert_eq!(mv.player, state.players[1].id);
        assert_eq!(mv.sequence, 1);
    }
}

//! Territory flood fill.
//!
//! Each piece claims the cells it can reach by orthogonal steps without
//! crossing a wall or entering a cell held by an opponent. Friendly pieces
//! and empty cells both let the fill through.
//!
//! A player's score is the sum of the region sizes of each of their pieces,
//! computed independently. Cells reachable from two friendly pieces count
//! twice; that is the scoring rule, not an accident.

use std::collections::{HashMap, HashSet, VecDeque};

use rayon::prelude::*;

use crate::board::{edge_blocked, GameState, GridPosition, PlayerId};

/// Returns the cells reachable from `start` for `owner`, including `start`.
pub fn territory_region(
    state: &GameState,
    start: GridPosition,
    owner: PlayerId,
) -> HashSet<GridPosition> {
    let mut visited = HashSet::with_capacity(state.board_size.cell_count());
    if !start.is_valid(state.board_size) {
        return visited;
    }
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        for next in cell.neighbors(state.board_size) {
            if visited.contains(&next) || edge_blocked(&state.walls, cell, next) {
                continue;
            }
            if matches!(state.board.piece_at(next), Some(p) if p.owner != owner) {
                continue;
            }
            visited.insert(next);
            queue.push_back(next);
        }
    }

    visited
}

/// Sum of the region sizes of every active piece `player` owns.
pub fn player_territory(state: &GameState, player: PlayerId) -> u32 {
    state
        .board
        .active_pieces(Some(player))
        .map(|p| territory_region(state, p.position, player).len() as u32)
        .sum()
}

/// Territory totals for every seat, including seats with no pieces (score 0).
///
/// Players are scored in parallel; the result does not depend on scheduling.
pub fn compute_scores(state: &GameState) -> HashMap<PlayerId, u32> {
    state
        .players
        .par_iter()
        .map(|p| (p.id, player_territory(state, p.id)))
        .collect()
}

/// Sets each player's `score` to their current territory.
pub fn record_scores(state: &mut GameState) {
    let scores = compute_scores(state);
    for player in &mut state.players {
        player.score = scores.get(&player.id).copied().unwrap_or(0);
    }
}

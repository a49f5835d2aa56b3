//! Random self-play.
//!
//! Plays complete games in which every seat picks uniformly among its legal
//! actions, and records the action list and final result of each. Used to
//! shake out rule bugs on long games and to produce sample data.

use std::io::{self, Write};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::{BoardSize, EndReason, GameSettings, PlayerColor, Rules, SEAT_COLORS};
use crate::error::GameError;
use crate::movegen::random_action;
use crate::rules::{apply_action, end_game, start_game};
use crate::score::{game_result, GameResult};

/// Configuration for self-play runs.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    pub board_size: BoardSize,
    pub players: usize,
    /// Turn cap; games still running at this turn end with `MaxTurns`.
    pub max_turns: u32,
    pub wall_ends_turn: bool,
    /// Number of worker threads; 1 plays games sequentially.
    pub threads: usize,
    /// Random seed (0 = use entropy). Game `i` is seeded with `seed + i`.
    pub seed: u64,
    /// Suppress per-game progress logging.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            board_size: BoardSize::Small,
            players: 2,
            max_turns: 400,
            wall_ends_turn: false,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

impl SelfPlayConfig {
    fn settings(&self) -> GameSettings {
        GameSettings {
            rules: Rules {
                wall_ends_turn: self.wall_ends_turn,
            },
            ..GameSettings::new(self.board_size, self.players)
        }
    }

    fn rng_for(&self, index: usize) -> SmallRng {
        if self.seed != 0 {
            SmallRng::seed_from_u64(self.seed.wrapping_add(index as u64))
        } else {
            SmallRng::from_entropy()
        }
    }
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Position of the game within the run.
    pub index: usize,
    pub board_size: BoardSize,
    /// Every accepted action in order, in protocol notation.
    pub actions: Vec<String>,
    pub result: GameResult,
}

impl GameRecord {
    /// Color of the winning seat, if there is one.
    pub fn winner_color(&self) -> Option<PlayerColor> {
        let winner = self.result.winner?;
        self.result
            .scores
            .iter()
            .find(|s| s.player == winner)
            .map(|s| s.color)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Plays one game to completion or to the turn cap.
pub fn play_game<R: Rng>(
    config: &SelfPlayConfig,
    index: usize,
    rng: &mut R,
) -> Result<GameRecord, GameError> {
    let mut state = start_game(&config.settings())?;
    let mut actions = Vec::new();

    while !state.is_finished() {
        if state.turn_count >= config.max_turns {
            state = end_game(&state, EndReason::MaxTurns)?;
            break;
        }
        let Some(action) = random_action(&state, rng) else {
            break;
        };
        state = apply_action(&action, &state)?;
        actions.push(action.to_string());
    }

    Ok(GameRecord {
        index,
        board_size: config.board_size,
        actions,
        result: game_result(&state),
    })
}

/// Plays `config.num_games` games, in parallel when `config.threads > 1`.
///
/// Records come back in game order either way, and a seeded run produces the
/// same games regardless of thread count.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    if config.threads > 1 {
        run_self_play_parallel(config)
    } else {
        (0..config.num_games)
            .map(|i| play_logged(config, i))
            .collect()
    }
}

fn run_self_play_parallel(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| play_logged(config, i))
            .collect()
    })
}

fn play_logged(config: &SelfPlayConfig, index: usize) -> Result<GameRecord, SelfPlayError> {
    let start = Instant::now();
    let mut rng = config.rng_for(index);
    let game = play_game(config, index, &mut rng)?;
    if !config.quiet {
        let outcome = game
            .winner_color()
            .map(|c| format!("{} wins", c.name()))
            .unwrap_or_else(|| "draw".to_string());
        info!(
            game = index + 1,
            of = config.num_games,
            turns = game.result.stats.total_turns,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "{}",
            outcome
        );
    }
    Ok(game)
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len().max(1) as f64;
    let mut wins = [0usize; 4];
    let mut draws = 0usize;
    let mut capped = 0usize;
    let mut turns = 0u64;
    let mut walls = 0u64;

    for game in games {
        turns += u64::from(game.result.stats.total_turns);
        walls += game.result.stats.total_walls as u64;
        if game.result.end_reason == Some(EndReason::MaxTurns) {
            capped += 1;
        }
        match game.winner_color() {
            Some(color) => {
                if let Some(i) = SEAT_COLORS.iter().position(|&c| c == color) {
                    wins[i] += 1;
                }
            }
            None => draws += 1,
        }
    }

    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", games.len());
    eprintln!("Avg turns/game: {:.1}", turns as f64 / total);
    eprintln!("Avg walls/game: {:.1}", walls as f64 / total);
    eprintln!("Hit turn cap: {}", capped);
    eprintln!("Draws: {}", draws);
    eprintln!("Win distribution:");
    for (i, color) in SEAT_COLORS.iter().enumerate() {
        if wins[i] > 0 {
            eprintln!(
                "  {:>6}: {} ({:.1}%)",
                color.name(),
                wins[i],
                100.0 * wins[i] as f64 / total
            );
        }
    }
}

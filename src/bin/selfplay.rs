//! Self-play CLI.
//!
//! Plays random-vs-random Wall Baduk games and writes one JSON record per
//! game (JSONL).
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N        Number of games to play (default: 10)
//!   --size N         Board size 9, 13, or 19 (default: 9)
//!   --players N      Players per game, 2-4 (default: 2)
//!   --max-turns N    Turn cap per game (default: 400)
//!   --wall-ends-turn Building a wall passes the turn
//!   --threads N      Number of parallel threads (default: 4)
//!   --seed N         Random seed, 0 for entropy (default: 0)
//!   --output FILE    Output file path (default: stdout)
//!   --quiet          Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use wallbaduk::board::BoardSize;
use wallbaduk::selfplay::{self, SelfPlayConfig, SelfPlayError};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        let parsed = match args[i].as_str() {
            "--games" => value(&args, &mut i).map(|v| config.num_games = v),
            "--size" => value(&args, &mut i).and_then(|n: u32| {
                BoardSize::from_dimension(n)
                    .map(|size| config.board_size = size)
                    .ok_or_else(|| format!("unsupported board size {}", n))
            }),
            "--players" => value(&args, &mut i).map(|v| config.players = v),
            "--max-turns" => value(&args, &mut i).map(|v| config.max_turns = v),
            "--wall-ends-turn" => {
                config.wall_ends_turn = true;
                Ok(())
            }
            "--threads" => value(&args, &mut i).map(|v| config.threads = v),
            "--seed" => value(&args, &mut i).map(|v| config.seed = v),
            "--output" => value(&args, &mut i).map(|v| output_path = Some(v)),
            "--quiet" => {
                config.quiet = true;
                Ok(())
            }
            "--help" | "-h" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            other => Err(format!("unknown argument: {}", other)),
        };
        if let Err(e) = parsed {
            eprintln!("{}", e);
            print_usage();
            return ExitCode::FAILURE;
        }
        i += 1;
    }

    let default_level = if config.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&config, output_path.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("selfplay failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &SelfPlayConfig, output_path: Option<&str>) -> Result<(), SelfPlayError> {
    if !config.quiet {
        eprintln!(
            "Self-play: {} games, {} board, {} players, max {} turns, {} threads",
            config.num_games, config.board_size, config.players, config.max_turns, config.threads
        );
    }

    let start = Instant::now();
    let games = selfplay::run_self_play(config)?;
    let elapsed = start.elapsed();

    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.1}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        selfplay::print_summary(&games);
    }

    match output_path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            selfplay::write_jsonl(&games, &mut writer)?;
            if !config.quiet {
                eprintln!("Wrote {} games to {}", games.len(), path);
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)?;
        }
    }
    Ok(())
}

/// Consumes the value following the flag at `args[*i]`.
fn value<T: FromStr>(args: &[String], i: &mut usize) -> Result<T, String> {
    let flag = &args[*i];
    *i += 1;
    let raw = args
        .get(*i)
        .ok_or_else(|| format!("missing value for {}", flag))?;
    raw.parse()
        .map_err(|_| format!("invalid {} value: '{}'", flag, raw))
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N         Number of games to play (default: 10)");
    eprintln!("  --size N          Board size 9, 13, or 19 (default: 9)");
    eprintln!("  --players N       Players per game, 2-4 (default: 2)");
    eprintln!("  --max-turns N     Turn cap per game (default: 400)");
    eprintln!("  --wall-ends-turn  Building a wall passes the turn");
    eprintln!("  --threads N       Number of parallel threads (default: 4)");
    eprintln!("  --seed N          Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE     Output file path (default: stdout)");
    eprintln!("  --quiet           Suppress progress and summary output");
    eprintln!("  --help            Show this help");
}

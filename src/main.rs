//! wallbaduk -- a Wall Baduk rules engine speaking a line protocol.
//!
//! Reads commands from stdin and writes replies to stdout. Diagnostics go to
//! stderr through `tracing`; set `RUST_LOG` (for example `RUST_LOG=debug`)
//! to see rejected moves and saved snapshots.

use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;

use wallbaduk::engine::Engine;
use wallbaduk::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Wbi => engine.handle_wbi(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewGame => engine.handle_newgame(&mut out)?,
            Command::Play(action) => engine.handle_play(&action, &mut out)?,
            Command::Pause => engine.handle_pause(&mut out)?,
            Command::Resume => engine.handle_resume(&mut out)?,
            Command::Undo => engine.handle_undo(&mut out)?,
            Command::Score => engine.handle_score(&mut out)?,
            Command::Board { highlight_from } => engine.handle_board(highlight_from, &mut out)?,
            Command::State => engine.handle_state(&mut out)?,
            Command::Legal => engine.handle_legal(&mut out)?,
            Command::Quit => break,
        }
    }

    out.flush()
}

//! Line protocol command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the main loop dispatches on.

use tracing::warn;

use crate::board::GridPosition;
use crate::movegen::Action;

use super::notation::parse_action;

/// A parsed host-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake; the engine lists its options and replies `wbiok`.
    Wbi,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a game with the current options.
    NewGame,

    /// Place, move, build a wall, pass, or resign for the player to move.
    Play(Action),

    Pause,
    Resume,

    /// Step back to the previous snapshot.
    Undo,

    /// Print each player's territory.
    Score,

    /// Print the text board, optionally marking where the piece at a cell can go.
    Board { highlight_from: Option<GridPosition> },

    /// Dump the current snapshot as JSON.
    State,

    /// List the legal actions of the player to move.
    Legal,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let &first = tokens.first()?;

    match first {
        "wbi" => Some(Command::Wbi),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "pause" => Some(Command::Pause),
        "resume" => Some(Command::Resume),
        "undo" => Some(Command::Undo),
        "score" => Some(Command::Score),
        "state" => Some(Command::State),
        "legal" => Some(Command::Legal),

        "setoption" => parse_setoption(&tokens),
        "board" => parse_board(&tokens),
        "place" | "move" | "wall" | "pass" | "resign" => match parse_action(&tokens) {
            Ok(action) => Some(Command::Play(action)),
            Err(e) => {
                warn!("malformed {}: {}", first, e);
                None
            }
        },

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let (name_parts, value_parts) = match tokens.iter().position(|&t| t == "value") {
        Some(vi) => (&tokens[2..vi], &tokens[vi + 1..]),
        None => (&tokens[2..], &tokens[tokens.len()..]),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }
    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };

    Some(Command::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

/// Parses `board [<position>]`.
fn parse_board(tokens: &[&str]) -> Option<Command> {
    match tokens.get(1) {
        None => Some(Command::Board { highlight_from: None }),
        Some(s) => match s.parse() {
            Ok(at) => Some(Command::Board { highlight_from: Some(at) }),
            Err(e) => {
                warn!("malformed board: {}", e);
                None
            }
        },
    }
}

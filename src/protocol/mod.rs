//! Line protocol handling.
//!
//! Parsing of host commands, action notation, and the text board used by
//! the `wallbaduk` binary.

pub mod notation;
pub mod parser;

pub use notation::{format_actions, parse_action, parse_action_str, render_board, NotationError};
pub use parser::{parse_command, Command};

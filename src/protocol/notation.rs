//! Action notation and the text board.
//!
//! Actions use the same words on the wire as their `Display` output:
//!
//! ```text
//! place e5
//! move e5 e3
//! wall e4 h
//! pass
//! resign
//! ```
//!
//! Lists of actions are joined with ` ; `.

use crate::board::{
    edge_blocked, CellState, GameState, GridPosition, MoveKind, Orientation, ParsePositionError,
};
use crate::movegen::Action;

/// Errors from parsing action notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("empty action")]
    Empty,

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("'{0}' expects {1} argument(s)")]
    Arity(&'static str, usize),

    #[error(transparent)]
    Position(#[from] ParsePositionError),

    #[error("invalid orientation '{0}', expected 'h' or 'v'")]
    Orientation(String),
}

/// Parses a single action from whitespace-separated tokens.
pub fn parse_action(tokens: &[&str]) -> Result<Action, NotationError> {
    let (&word, args) = tokens.split_first().ok_or(NotationError::Empty)?;
    let expect = |n: usize, name: &'static str| {
        if args.len() == n {
            Ok(())
        } else {
            Err(NotationError::Arity(name, n))
        }
    };

    match word {
        "place" => {
            expect(1, "place")?;
            Ok(Action::Play(MoveKind::Place { at: args[0].parse()? }))
        }
        "move" => {
            expect(2, "move")?;
            Ok(Action::Play(MoveKind::Move {
                from: args[0].parse()?,
                to: args[1].parse()?,
            }))
        }
        "wall" => {
            expect(2, "wall")?;
            Ok(Action::Wall {
                at: args[0].parse()?,
                orientation: parse_orientation(args[1])?,
            })
        }
        "pass" => {
            expect(0, "pass")?;
            Ok(Action::Play(MoveKind::Pass))
        }
        "resign" => {
            expect(0, "resign")?;
            Ok(Action::Play(MoveKind::Resign))
        }
        other => Err(NotationError::UnknownAction(other.to_string())),
    }
}

/// Parses a line such as `move e5 e3`.
pub fn parse_action_str(s: &str) -> Result<Action, NotationError> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    parse_action(&tokens)
}

fn parse_orientation(s: &str) -> Result<Orientation, NotationError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Orientation::from_protocol_char(c.to_ascii_lowercase())
            .ok_or_else(|| NotationError::Orientation(s.to_string())),
        _ => Err(NotationError::Orientation(s.to_string())),
    }
}

/// Joins actions with ` ; `.
pub fn format_actions(actions: &[Action]) -> String {
    actions
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(" ; ")
}

/// Draws the board as text, row 1 at the top.
///
/// Pieces show their owner's color letter, empty cells `.`, and highlighted
/// cells `*`. A `|` between two cells is a vertical wall; a `-` under a cell
/// is a horizontal wall on its lower edge. Wall lines are only drawn for
/// rows that have one.
pub fn render_board(state: &GameState, highlights: &[GridPosition]) -> String {
    let n = state.board_size.dimension();
    let grid = state.board.cells(highlights);
    let mut out = String::new();

    out.push_str("   ");
    for col in 0..n {
        out.push(char::from(b'a' + col as u8));
        out.push(' ');
    }
    out.truncate(out.trim_end().len());
    out.push('\n');

    for (row, cells) in grid.iter().enumerate() {
        let row = row as i32;
        out.push_str(&format!("{:>2} ", row + 1));
        for (col, cell) in cells.iter().enumerate() {
            let col = col as i32;
            out.push(match cell.state {
                CellState::Empty => '.',
                CellState::Highlighted => '*',
                CellState::Occupied(owner) => state
                    .player(owner)
                    .map(|p| p.color.protocol_char())
                    .unwrap_or('?'),
            });
            if col + 1 < n {
                let here = GridPosition::new(col, row);
                let right = GridPosition::new(col + 1, row);
                out.push(if edge_blocked(&state.walls, here, right) { '|' } else { ' ' });
            }
        }
        out.push('\n');

        if row + 1 < n {
            let mut line = String::from("   ");
            let mut any = false;
            for col in 0..n {
                let here = GridPosition::new(col, row);
                let below = GridPosition::new(col, row + 1);
                if edge_blocked(&state.walls, here, below) {
                    line.push('-');
                    any = true;
                } else {
                    line.push(' ');
                }
                line.push(' ');
            }
            if any {
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }
    }

    out
}

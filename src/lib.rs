//! Wall Baduk rules engine library.
//!
//! Exposes the board representation, the rule transitions, legal action
//! generation, territory scoring, the game service with its repository port,
//! and the line protocol used by the `wallbaduk` binary.
//!
//! Every rule transition takes a `GameState` snapshot and returns a new one
//! or a typed rejection:
//!
//! ```
//! use wallbaduk::board::{BoardSize, GameSettings, GridPosition, MoveKind};
//! use wallbaduk::rules::{apply_move, start_game};
//!
//! let state = start_game(&GameSettings::new(BoardSize::Small, 2)).unwrap();
//! let mv = state
//!     .move_for_current(MoveKind::Place { at: GridPosition::new(4, 4) })
//!     .unwrap();
//! let next = apply_move(&mv, &state).unwrap();
//! assert_eq!(next.turn_count, 1);
//! assert!(state.board.pieces().is_empty());
//! ```

pub mod board;
pub mod engine;
pub mod error;
pub mod history;
pub mod movegen;
pub mod protocol;
pub mod repository;
pub mod rules;
pub mod score;
pub mod selfplay;
pub mod service;

pub use error::{GameError, Rejection};

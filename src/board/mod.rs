//! Board representation and game-state types.
//!
//! Contains the core data structures for positions, pieces, walls, players,
//! moves, settings, and the overall game state.

pub mod grid;
pub mod ids;
pub mod moves;
pub mod piece;
pub mod player;
pub mod position;
pub mod settings;
pub mod state;
pub mod wall;

pub use grid::{Board, Cell, CellState};
pub use ids::{GameId, MoveId, PieceId, PlayerId, WallId};
pub use moves::{GameMove, MoveKind};
pub use piece::{Piece, MAX_MOVE_DISTANCE};
pub use player::{AiDifficulty, Player, PlayerColor, SEAT_COLORS};
pub use position::{BoardSize, GridPosition, ParsePositionError, ALL_BOARD_SIZES};
pub use settings::{ColorTheme, GameSettings, Rules, MAX_PLAYERS, MIN_PLAYERS};
pub use state::{EndReason, GameState, Phase};
pub use wall::{edge_blocked, Orientation, Wall, ALL_ORIENTATIONS};

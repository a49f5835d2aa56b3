//! Grid geometry.
//!
//! Positions are (column, row) pairs on a square board of 9, 13, or 19 lines.
//! Adjacency is the 4-neighborhood; distance is Manhattan.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardSize {
    Small,
    Medium,
    Large,
}

/// All board sizes, smallest first.
pub const ALL_BOARD_SIZES: [BoardSize; 3] = [BoardSize::Small, BoardSize::Medium, BoardSize::Large];

impl BoardSize {
    /// Number of lines along one side.
    pub const fn dimension(self) -> i32 {
        match self {
            BoardSize::Small => 9,
            BoardSize::Medium => 13,
            BoardSize::Large => 19,
        }
    }

    /// Total number of cells on the board.
    pub const fn cell_count(self) -> usize {
        let n = self.dimension() as usize;
        n * n
    }

    /// Parses a board size from its side length.
    pub fn from_dimension(n: u32) -> Option<BoardSize> {
        match n {
            9 => Some(BoardSize::Small),
            13 => Some(BoardSize::Medium),
            19 => Some(BoardSize::Large),
            _ => None,
        }
    }

    /// Iterates every position on the board in row-major order.
    pub fn positions(self) -> impl Iterator<Item = GridPosition> {
        let n = self.dimension();
        (0..n).flat_map(move |row| (0..n).map(move |col| GridPosition::new(col, row)))
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.dimension();
        write!(f, "{}x{}", n, n)
    }
}

/// A cell coordinate. May lie off the board; check with [`GridPosition::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    pub col: i32,
    pub row: i32,
}

impl GridPosition {
    pub const fn new(col: i32, row: i32) -> Self {
        GridPosition { col, row }
    }

    /// Returns true if both coordinates lie in `[0, N)`.
    pub const fn is_valid(self, size: BoardSize) -> bool {
        let n = size.dimension();
        self.col >= 0 && self.col < n && self.row >= 0 && self.row < n
    }

    /// The four orthogonal neighbors in the order left, right, up, down.
    ///
    /// Neighbors are not clipped to the board.
    pub const fn adjacent(self) -> [GridPosition; 4] {
        [
            GridPosition::new(self.col - 1, self.row),
            GridPosition::new(self.col + 1, self.row),
            GridPosition::new(self.col, self.row - 1),
            GridPosition::new(self.col, self.row + 1),
        ]
    }

    /// The orthogonal neighbors that lie on a board of the given size.
    pub fn neighbors(self, size: BoardSize) -> impl Iterator<Item = GridPosition> {
        self.adjacent().into_iter().filter(move |p| p.is_valid(size))
    }

    pub const fn manhattan(self, other: GridPosition) -> u32 {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }

    /// King-move distance: the larger of the column and row differences.
    pub fn chebyshev(self, other: GridPosition) -> u32 {
        self.col.abs_diff(other.col).max(self.row.abs_diff(other.row))
    }

    /// Returns true if the two cells share an edge.
    pub const fn is_adjacent(self, other: GridPosition) -> bool {
        self.manhattan(other) == 1
    }
}

/// Column letters used in `e5`-style notation.
const COLUMN_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match usize::try_from(self.col).ok().and_then(|c| COLUMN_LETTERS.get(c)) {
            Some(&letter) if self.row >= 0 => write!(f, "{}{}", letter as char, self.row + 1),
            _ => write!(f, "({},{})", self.col, self.row),
        }
    }
}

/// Error returned when parsing position notation fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid position notation: '{0}'")]
pub struct ParsePositionError(pub String);

impl FromStr for GridPosition {
    type Err = ParsePositionError;

    /// Parses `e5`-style notation: a column letter followed by a 1-based row.
    ///
    /// Rows run from 1 to 26, the same span as the column letters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError(s.to_string());
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(err)?.to_ascii_lowercase();
        let col = COLUMN_LETTERS
            .iter()
            .position(|&c| c as char == letter)
            .ok_or_else(err)?;
        let row: i32 = chars.as_str().parse().map_err(|_| err())?;
        if !(1..=COLUMN_LETTERS.len() as i32).contains(&row) {
            return Err(err());
        }
        Ok(GridPosition::new(col as i32, row - 1))
    }
}

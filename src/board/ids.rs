//! Opaque identifiers for games, players, pieces, walls, and moves.
//!
//! Each id wraps a random v4 UUID so that records can be referenced across
//! snapshots without holding borrows into a particular `GameState`.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random id.
            pub fn new() -> Self {
                $name(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifies one game lineage; every snapshot of the same game shares it.
    GameId
);
define_id!(
    /// Identifies a seat at the table.
    PlayerId
);
define_id!(PieceId);
define_id!(WallId);
define_id!(MoveId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_distinct() {
        assert_ne!(PlayerId::new(), PlayerId::new());
        assert_ne!(GameId::new(), GameId::new());
    }

    #[test]
    fn id_serializes_as_bare_uuid() {
        let id = PieceId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let back: PieceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

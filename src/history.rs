//! Version-indexed snapshot timeline.
//!
//! Every accepted transition produces a new `GameState`; the timeline keeps
//! them in order under a monotonically increasing version number. Undo drops
//! the newest snapshot. Versions are never reused, so a version seen by a
//! client before an undo does not silently refer to a different state later.

use crate::board::GameState;

/// A snapshot and the version it was recorded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub version: u64,
    pub state: GameState,
}

#[derive(Debug, Clone)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
    next_version: u64,
}

impl Timeline {
    /// Starts a timeline at version 0 with `initial` as its only snapshot.
    pub fn new(initial: GameState) -> Self {
        Timeline {
            snapshots: vec![Snapshot { version: 0, state: initial }],
            next_version: 1,
        }
    }

    /// Records `state` as the newest snapshot and returns its version.
    pub fn push(&mut self, state: GameState) -> u64 {
        let version = self.next_version;
        self.next_version += 1;
        self.snapshots.push(Snapshot { version, state });
        version
    }

    pub fn current(&self) -> &GameState {
        &self.latest().state
    }

    pub fn version(&self) -> u64 {
        self.latest().version
    }

    fn latest(&self) -> &Snapshot {
        // The first snapshot is never removed.
        &self.snapshots[self.snapshots.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.snapshots.len() > 1
    }

    /// Drops the newest snapshot and returns the one that is now current.
    ///
    /// Returns `None` when only the initial snapshot is left.
    pub fn undo(&mut self) -> Option<&GameState> {
        if !self.can_undo() {
            return None;
        }
        self.snapshots.pop();
        Some(self.current())
    }

    /// Looks up a retained snapshot by version.
    pub fn at(&self, version: u64) -> Option<&GameState> {
        self.snapshots
            .binary_search_by_key(&version, |s| s.version)
            .ok()
            .map(|i| &self.snapshots[i].state)
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
}

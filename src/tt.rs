//! Transposition table for caching search results.
//!
//! A fixed-size open-addressed array indexed by `key % capacity`. Entries are
//! verified by full 64-bit key equality on probe; collisions between distinct
//! positions with the same key are accepted as rare. Mate scores are stored
//! ply-adjusted so they read as mate-in-N from the probing node.

use std::mem;

use crate::board::search::MATE_SCORE;
use crate::board::{Move, EMPTY_MOVE, MAX_PLY};

/// Default table size in MiB
pub const DEFAULT_HASH_SIZE_MB: usize = 64;
/// Minimum table size in MiB
pub const MIN_HASH_SIZE_MB: usize = 1;
/// Maximum table size in MiB
pub const MAX_HASH_SIZE_MB: usize = 1024;

/// Scores beyond this boundary are mate scores and carry a ply offset in the
/// table
const MATE_BOUND: i32 = MATE_SCORE - MAX_PLY as i32;

/// How a stored score bounds the true value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    /// Score is the exact value
    Exact,
    /// Score is at least this value (fail-high)
    LowerBound,
    /// Score is at most this value (fail-low)
    UpperBound,
}

#[derive(Clone, Copy, Debug)]
struct TTEntry {
    key: u64,
    score: i16,
    depth: i16,
    bound: BoundType,
    age: u8,
    best_move: Move,
}

impl TTEntry {
    const fn empty() -> Self {
        TTEntry {
            key: 0,
            score: 0,
            depth: -1,
            bound: BoundType::Exact,
            age: 0,
            best_move: EMPTY_MOVE,
        }
    }

    fn is_valid(&self) -> bool {
        self.depth >= 0
    }
}

/// Result of a successful probe, with the mate-ply adjustment undone.
#[derive(Clone, Copy, Debug)]
pub struct TTProbe {
    pub score: i32,
    pub depth: i32,
    pub bound: BoundType,
    pub best_move: Move,
}

pub struct TranspositionTable {
    entries: Vec<TTEntry>,
    age: u8,
}

impl TranspositionTable {
    /// Create a table using roughly `size_mb` megabytes, clamped to
    /// [`MIN_HASH_SIZE_MB`, `MAX_HASH_SIZE_MB`].
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let size_mb = size_mb.clamp(MIN_HASH_SIZE_MB, MAX_HASH_SIZE_MB);
        let bytes = size_mb * 1024 * 1024;
        let capacity = bytes / mem::size_of::<TTEntry>();

        TranspositionTable {
            entries: vec![TTEntry::empty(); capacity],
            age: 0,
        }
    }

    /// Number of entry slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Wipe every entry and reset the age counter.
    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::empty());
        self.age = 0;
    }

    /// Begin a new search iteration: entries stored from now on carry a
    /// fresh age and win replacement fights against older ones.
    pub fn new_search(&mut self) {
        self.age = self.age.wrapping_add(1);
    }

    fn index(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    /// Store a search result.
    ///
    /// Mate scores are shifted by `ply` so the stored value is relative to
    /// the node that will probe it. Replacement: empty slot, stale age, or
    /// greater-or-equal depth.
    pub fn store(
        &mut self,
        key: u64,
        score: i32,
        depth: i32,
        bound: BoundType,
        best_move: Move,
        ply: usize,
    ) {
        let idx = self.index(key);
        let entry = &mut self.entries[idx];

        let mut store_score = score;
        if score > MATE_BOUND {
            store_score += ply as i32;
        } else if score < -MATE_BOUND {
            store_score -= ply as i32;
        }

        let replace =
            !entry.is_valid() || entry.age != self.age || depth >= i32::from(entry.depth);
        if replace {
            *entry = TTEntry {
                key,
                score: store_score as i16,
                depth: depth as i16,
                bound,
                age: self.age,
                best_move,
            };
        }
    }

    /// Probe for a position. Returns the stored data with mate scores
    /// re-expressed relative to the probing node's `ply`.
    #[must_use]
    pub fn probe(&self, key: u64, ply: usize) -> Option<TTProbe> {
        let entry = &self.entries[self.index(key)];
        if !entry.is_valid() || entry.key != key {
            return None;
        }

        let mut score = i32::from(entry.score);
        if score > MATE_BOUND {
            score -= ply as i32;
        } else if score < -MATE_BOUND {
            score += ply as i32;
        }

        Some(TTProbe {
            score,
            depth: i32::from(entry.depth),
            bound: entry.bound,
            best_move: entry.best_move,
        })
    }
}

//! Fixed-size transposition table keyed by the board's Zobrist fingerprints.
//!
//! Slots are direct-mapped: `hash_key % capacity` picks the slot and the
//! independent `hash_lock` confirms the entry belongs to the probed position.
//! A lock mismatch is a collision and reads as a miss.

use crate::Board;

/// Default number of slots.
pub const DEFAULT_CAPACITY: usize = 131_072;

/// How a cached evaluation relates to the true value of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvaluationKind {
    Exact,
    /// The true value is at least the stored evaluation (fail high).
    LowerBound,
    /// The true value is at most the stored evaluation (fail low).
    UpperBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranspositionEntry {
    pub lock: u64,
    pub evaluation: i32,
    pub kind: EvaluationKind,
    pub depth: u16,
    pub timestamp: u32,
}

/// Result of a successful lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedEval {
    pub evaluation: i32,
    pub kind: EvaluationKind,
    pub depth: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    pub probes: u64,
    pub hits: u64,
    /// Probes that found a slot owned by a different position.
    pub collisions: u64,
    pub stores: u64,
    /// Stores refused because the resident entry was deeper and newer.
    pub rejected: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TranspositionEntry>>,
    stats: TableStats,
}

impl TranspositionTable {
    /// Allocates a table with `capacity` slots (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        tracing::debug!(capacity, "allocating transposition table");
        TranspositionTable {
            entries: vec![None; capacity],
            stats: TableStats::default(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn stats(&self) -> TableStats {
        self.stats
    }

    /// Empties every slot and resets the statistics.
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.stats = TableStats::default();
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    /// Looks up the evaluation cached for `board`.
    pub fn lookup(&mut self, board: &Board) -> Option<CachedEval> {
        self.lookup_key(board.hash_key(), board.hash_lock())
    }

    /// Looks up an evaluation by precomputed fingerprints.
    pub fn lookup_key(&mut self, key: u64, lock: u64) -> Option<CachedEval> {
        self.stats.probes += 1;
        let entry = self.entries[self.index(key)]?;
        if entry.lock != lock {
            self.stats.collisions += 1;
            return None;
        }
        self.stats.hits += 1;
        Some(CachedEval {
            evaluation: entry.evaluation,
            kind: entry.kind,
            depth: entry.depth,
        })
    }

    /// Caches an evaluation for `board`.
    pub fn store(
        &mut self,
        board: &Board,
        evaluation: i32,
        kind: EvaluationKind,
        depth: u16,
        timestamp: u32,
    ) {
        self.store_key(
            board.hash_key(),
            board.hash_lock(),
            evaluation,
            kind,
            depth,
            timestamp,
        );
    }

    /// Caches an evaluation by precomputed fingerprints.
    ///
    /// The resident entry survives only if it is deeper and at least as
    /// recent as the incoming one.
    pub fn store_key(
        &mut self,
        key: u64,
        lock: u64,
        evaluation: i32,
        kind: EvaluationKind,
        depth: u16,
        timestamp: u32,
    ) {
        let index = self.index(key);
        if let Some(existing) = self.entries[index] {
            if existing.depth > depth && existing.timestamp >= timestamp {
                self.stats.rejected += 1;
                return;
            }
        }
        self.stats.stores += 1;
        self.entries[index] = Some(TranspositionEntry {
            lock,
            evaluation,
            kind,
            depth,
            timestamp,
        });
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

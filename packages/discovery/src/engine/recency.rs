//! Bounded set of recently surfaced identifiers.

use indexmap::IndexSet;

/// Tracks which identifiers were shown recently so repeats stay rare.
///
/// Backed by an insertion-ordered set capped at `capacity`. When a new
/// identifier would push the set past the cap, the `evict_batch` oldest
/// entries are dropped in one pass, so the size invariant (`len() <=
/// capacity`) holds after every mutation without paying an eviction per
/// insert.
#[derive(Debug)]
pub struct RecencyTracker {
    seen: IndexSet<String>,
    capacity: usize,
    evict_batch: usize,
}

impl RecencyTracker {
    pub fn new(capacity: usize, evict_batch: usize) -> Self {
        Self {
            seen: IndexSet::new(),
            capacity,
            evict_batch,
        }
    }

    /// Whether an identifier was surfaced recently.
    pub fn contains(&self, identifier: &str) -> bool {
        self.seen.contains(identifier)
    }

    /// Register an identifier as surfaced.
    pub fn mark_seen(&mut self, identifier: impl Into<String>) {
        let identifier = identifier.into();
        if self.seen.contains(&identifier) {
            return;
        }
        if self.seen.len() >= self.capacity && !self.seen.is_empty() {
            let batch = self.evict_batch.clamp(1, self.seen.len());
            self.seen.drain(0..batch);
        }
        self.seen.insert(identifier);
    }

    /// Forget everything. Called when the filter context changes, since
    /// "recently seen" is scoped to the current criteria.
    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

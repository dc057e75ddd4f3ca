//! Commit id allocation.
//!
//! Ids come from a monotonically increasing counter. The counter is an
//! explicit object so tests can own a private one; a single shared instance
//! backs [`CommitFactory::global`](crate::commit::CommitFactory::global).

use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::CommitId;

/// Thread-safe counter that hands out [`CommitId`]s starting at 0.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Create a generator whose first id is 0.
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Allocate the next id.
    pub fn next_id(&self) -> CommitId {
        CommitId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// The id the next call to [`next_id`](Self::next_id) will return.
    pub fn peek(&self) -> CommitId {
        CommitId(self.next.load(Ordering::Relaxed))
    }

    /// Reset the counter to 0.
    ///
    /// Commits allocated before the reset keep their ids, so a repository
    /// that still holds them may end up with duplicates.
    pub fn reset(&self) {
        self.next.store(0, Ordering::Relaxed);
    }
}

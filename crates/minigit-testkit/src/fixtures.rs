//! Test fixtures and helpers.
//!
//! Common setup code for unit and integration tests.

use std::sync::Arc;

use minigit_core::{Commit, CommitFactory, CommitId, ManualClock, Repository};

/// Default start time for fixture clocks: 2023-11-14T22:13:20Z.
pub const DEFAULT_START: i64 = 1_700_000_000_000;

/// A manual clock plus a commit factory with its own id counter.
pub struct TestFixture {
    pub clock: Arc<ManualClock>,
    pub factory: CommitFactory,
}

impl TestFixture {
    /// Create a fixture whose clock starts at [`DEFAULT_START`].
    pub fn new() -> Self {
        Self::at(DEFAULT_START)
    }

    /// Create a fixture whose clock starts at `start`.
    pub fn at(start: i64) -> Self {
        let clock = Arc::new(ManualClock::new(start));
        let factory = CommitFactory::with_clock(clock.clone());
        Self { clock, factory }
    }

    /// An empty repository stamped by this fixture.
    ///
    /// Panics on an empty name; use [`Repository::with_factory`] to test
    /// the error path.
    pub fn repository(&self, name: &str) -> Repository {
        Repository::with_factory(name, self.factory.clone())
            .unwrap_or_else(|e| panic!("fixture repository {name:?}: {e}"))
    }

    /// A repository with one commit per timestamp, given oldest first.
    ///
    /// Messages are `"{name}-{index}"` in commit order.
    pub fn repository_with_timestamps(&self, name: &str, timestamps: &[i64]) -> Repository {
        let mut repo = self.repository(name);
        for (index, ts) in timestamps.iter().enumerate() {
            self.commit_at(&mut repo, *ts, &format!("{name}-{index}"));
        }
        repo
    }

    /// Commit `message` with the clock set to `timestamp`.
    pub fn commit_at(&self, repo: &mut Repository, timestamp: i64, message: &str) -> CommitId {
        self.clock.set(timestamp);
        repo.commit(message)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Timestamps of every commit, newest first.
pub fn timestamps(repo: &Repository) -> Vec<i64> {
    repo.iter().map(Commit::timestamp).collect()
}

/// Messages of every commit, newest first.
pub fn messages(repo: &Repository) -> Vec<String> {
    repo.iter().map(|c| c.message().to_string()).collect()
}

/// Whether timestamps never increase walking from the head.
pub fn is_newest_first(repo: &Repository) -> bool {
    timestamps(repo).windows(2).all(|w| w[0] >= w[1])
}

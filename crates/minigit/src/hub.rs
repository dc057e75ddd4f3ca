//! The Hub: a registry of named repositories.
//!
//! Each repository sits behind its own mutex so a multi-threaded host can
//! work on different repositories in parallel. Synchronizing two
//! repositories locks both for the whole merge, always in name order, so
//! merges running in opposite directions cannot deadlock.
//!
//! Removing a repository empties its slot. A call that looked the
//! repository up just before the removal finds the slot empty once it holds
//! the lock and fails with `RepositoryNotFound` instead of writing into a
//! repository nobody can reach.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use minigit_core::{CommitFactory, CommitId, HistoryDigest, Repository, TieBreak};

use crate::error::{MiniGitError, Result};

/// Configuration for the Hub.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Ordering rule for equal timestamps during synchronize.
    pub tie_break: TieBreak,
    /// Number of commits [`Hub::recent_history`] renders.
    pub default_history_depth: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::Incoming,
            default_history_depth: 10,
        }
    }
}

/// Outcome of [`Hub::synchronize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Commits moved out of the source repository.
    pub transferred: usize,
    /// Size of the target repository afterwards.
    pub size: usize,
    /// Head of the target repository afterwards.
    pub head: Option<CommitId>,
    /// Digest of the target repository afterwards.
    pub digest: HistoryDigest,
}

/// `None` once the repository has been removed from the hub.
type SharedRepository = Arc<Mutex<Option<Repository>>>;

/// The main Hub struct.
///
/// Provides a single entry point for:
/// - Creating and removing repositories
/// - Committing and dropping commits
/// - Querying head, size and history
/// - Synchronizing one repository into another
pub struct Hub {
    /// Stamps every commit made through this hub.
    factory: CommitFactory,
    /// Configuration.
    config: HubConfig,
    /// Repositories by name.
    repositories: RwLock<BTreeMap<String, SharedRepository>>,
}

impl Hub {
    /// Create a hub that uses the process-wide id counter and system clock.
    pub fn new(config: HubConfig) -> Self {
        Self::with_factory(CommitFactory::global(), config)
    }

    /// Create a hub with its own commit factory.
    pub fn with_factory(factory: CommitFactory, config: HubConfig) -> Self {
        Self {
            factory,
            config,
            repositories: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub fn factory(&self) -> &CommitFactory {
        &self.factory
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Repository Management
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a new, empty repository.
    pub fn create_repository(&self, name: &str) -> Result<()> {
        let repository = Repository::with_factory(name, self.factory.clone())?;

        let mut repositories = self
            .repositories
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if repositories.contains_key(name) {
            return Err(MiniGitError::RepositoryExists(name.to_string()));
        }
        repositories.insert(name.to_string(), Arc::new(Mutex::new(Some(repository))));

        tracing::info!(repository = name, "created repository");
        Ok(())
    }

    /// Unregister a repository and hand back its contents.
    pub fn remove_repository(&self, name: &str) -> Result<Repository> {
        let shared = self
            .repositories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .ok_or_else(|| MiniGitError::RepositoryNotFound(name.to_string()))?;

        let removed = lock(&shared)
            .take()
            .ok_or_else(|| MiniGitError::RepositoryNotFound(name.to_string()))?;

        tracing::info!(repository = name, size = removed.size(), "removed repository");
        Ok(removed)
    }

    /// Names of all registered repositories, sorted.
    pub fn repository_names(&self) -> Vec<String> {
        self.repositories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn has_repository(&self, name: &str) -> bool {
        self.repositories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    pub fn head(&self, repository: &str) -> Result<Option<CommitId>> {
        self.with_repository(repository, |repo| repo.head())
    }

    pub fn size(&self, repository: &str) -> Result<usize> {
        self.with_repository(repository, |repo| repo.size())
    }

    /// `"{name} - No commits"` or `"{name} - Current head: {commit}"`.
    pub fn render(&self, repository: &str) -> Result<String> {
        self.with_repository(repository, |repo| repo.to_string())
    }

    /// Whether the repository holds a commit with this id.
    ///
    /// A string that is not a valid id is simply not found.
    pub fn contains(&self, repository: &str, id: &str) -> Result<bool> {
        let Some(id) = parse_id(repository, id) else {
            self.repository(repository)?;
            return Ok(false);
        };
        self.with_repository(repository, |repo| repo.contains(id))
    }

    /// Up to `n` rendered commits, newest first, one per line.
    pub fn history(&self, repository: &str, n: usize) -> Result<String> {
        self.with_repository(repository, |repo| repo.history(n))?
            .map_err(MiniGitError::from)
    }

    /// [`history`](Self::history) with the configured default depth.
    pub fn recent_history(&self, repository: &str) -> Result<String> {
        self.history(repository, self.config.default_history_depth)
    }

    pub fn digest(&self, repository: &str) -> Result<HistoryDigest> {
        self.with_repository(repository, |repo| repo.digest())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Record a commit and return its id.
    pub fn commit(&self, repository: &str, message: &str) -> Result<CommitId> {
        let id = self.with_repository(repository, |repo| repo.commit(message))?;
        tracing::debug!(repository, commit = %id, "committed");
        Ok(id)
    }

    /// Remove a commit. Returns `false` when nothing matched.
    pub fn drop_commit(&self, repository: &str, id: &str) -> Result<bool> {
        let Some(id) = parse_id(repository, id) else {
            self.repository(repository)?;
            return Ok(false);
        };
        self.with_repository(repository, |repo| repo.drop_commit(id))
    }

    /// Move every commit from `from` into `into`, ordered by timestamp.
    pub fn synchronize(&self, into: &str, from: &str) -> Result<SyncReport> {
        if into == from {
            return Err(MiniGitError::InvalidOperation(format!(
                "cannot synchronize repository {into} with itself"
            )));
        }

        let target = self.repository(into)?;
        let source = self.repository(from)?;
        self.synchronize_slots(into, from, &target, &source)
    }

    /// Merge between two looked-up slots, failing if either was removed
    /// after the lookup.
    fn synchronize_slots(
        &self,
        into: &str,
        from: &str,
        target: &SharedRepository,
        source: &SharedRepository,
    ) -> Result<SyncReport> {
        let (mut target_slot, mut source_slot) = if into < from {
            let t = lock(target);
            let s = lock(source);
            (t, s)
        } else {
            let s = lock(source);
            let t = lock(target);
            (t, s)
        };

        let target_repo = target_slot
            .as_mut()
            .ok_or_else(|| MiniGitError::RepositoryNotFound(into.to_string()))?;
        let source_repo = source_slot
            .as_mut()
            .ok_or_else(|| MiniGitError::RepositoryNotFound(from.to_string()))?;

        let transferred = target_repo.synchronize_with(source_repo, self.config.tie_break);
        let report = SyncReport {
            transferred,
            size: target_repo.size(),
            head: target_repo.head(),
            digest: target_repo.digest(),
        };

        tracing::info!(
            into,
            from,
            transferred,
            size = report.size,
            digest = %report.digest,
            "synchronized repositories"
        );
        Ok(report)
    }

    /// Reset this hub's id counter to 0.
    pub fn reset_ids(&self) {
        self.factory.ids().reset();
        tracing::debug!("reset commit ids");
    }

    fn repository(&self, name: &str) -> Result<SharedRepository> {
        self.repositories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| MiniGitError::RepositoryNotFound(name.to_string()))
    }

    fn with_repository<T>(&self, name: &str, f: impl FnOnce(&mut Repository) -> T) -> Result<T> {
        let shared = self.repository(name)?;
        apply(name, &shared, f)
    }
}

/// Run `f` on the repository in `slot` unless it has been removed.
fn apply<T>(name: &str, slot: &SharedRepository, f: impl FnOnce(&mut Repository) -> T) -> Result<T> {
    match lock(slot).as_mut() {
        Some(repo) => Ok(f(repo)),
        None => Err(MiniGitError::RepositoryNotFound(name.to_string())),
    }
}

fn lock(repository: &Mutex<Option<Repository>>) -> MutexGuard<'_, Option<Repository>> {
    repository.lock().unwrap_or_else(PoisonError::into_inner)
}

fn parse_id(repository: &str, raw: &str) -> Option<CommitId> {
    match raw.parse() {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!(repository, id = raw, error = %e, "ignoring malformed commit id");
            None
        }
    }
}

//! Repository: a named, newest-first chain of commits.
//!
//! The repository exclusively owns its chain through `head`. Commits enter
//! only through [`Repository::commit`], leave through
//! [`Repository::drop_commit`], and move between repositories only through
//! [`Repository::synchronize`], which empties the donor.

use std::fmt;

use crate::commit::{Commit, CommitFactory, CommitRecord};
use crate::error::{CoreError, Result};
use crate::merge::{merge_chains, TieBreak};
use crate::types::{CommitId, HistoryDigest};

/// A named history of commits.
#[derive(Debug)]
pub struct Repository {
    name: String,
    head: Option<Box<Commit>>,
    size: usize,
    factory: CommitFactory,
}

impl Repository {
    /// Create an empty repository that stamps commits with the process-wide
    /// factory.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_factory(name, CommitFactory::global())
    }

    /// Create an empty repository that stamps commits with `factory`.
    pub fn with_factory(name: impl Into<String>, factory: CommitFactory) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CoreError::InvalidArgument(
                "repository name must not be empty".into(),
            ));
        }

        Ok(Self {
            name,
            head: None,
            size: 0,
            factory,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the most recent commit.
    pub fn head(&self) -> Option<CommitId> {
        self.head.as_ref().map(|c| c.id())
    }

    pub fn head_commit(&self) -> Option<&Commit> {
        self.head.as_deref()
    }

    /// Number of commits in the chain.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn factory(&self) -> &CommitFactory {
        &self.factory
    }

    /// Walk the chain from the head backwards.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    pub fn contains(&self, id: CommitId) -> bool {
        self.iter().any(|c| c.id() == id)
    }

    /// Render up to `n` commits, newest first, one per line.
    ///
    /// An empty repository yields an empty string. `n` must be positive.
    pub fn history(&self, n: usize) -> Result<String> {
        if n == 0 {
            return Err(CoreError::InvalidArgument(
                "history length must be positive".into(),
            ));
        }

        Ok(self.iter().take(n).map(|c| format!("{c}\n")).collect())
    }

    /// Fields of every commit, newest first.
    pub fn records(&self) -> Vec<CommitRecord> {
        self.iter().map(Commit::record).collect()
    }

    /// Content hash of the chain. Independent of the repository name.
    pub fn digest(&self) -> HistoryDigest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"minigit-history-v0:");
        for commit in self.iter() {
            hasher.update(&commit.id().value().to_le_bytes());
            hasher.update(&commit.timestamp().to_le_bytes());
            hasher.update(&(commit.message().len() as u64).to_le_bytes());
            hasher.update(commit.message().as_bytes());
        }
        HistoryDigest(*hasher.finalize().as_bytes())
    }

    /// Record a new commit on top of the current head and return its id.
    pub fn commit(&mut self, message: impl Into<String>) -> CommitId {
        let commit = self.factory.create(message, self.head.take());
        let id = commit.id();
        self.head = Some(Box::new(commit));
        self.size += 1;
        id
    }

    /// Remove the commit with `id`, keeping every other commit in order.
    ///
    /// Returns `false` and leaves the repository untouched when no commit
    /// matches.
    pub fn drop_commit(&mut self, id: CommitId) -> bool {
        let Some(index) = self.iter().position(|c| c.id() == id) else {
            return false;
        };

        let link = self.link_at(index);
        let Some(mut removed) = link.take() else {
            return false;
        };
        *link = removed.past.take();
        self.size -= 1;

        tracing::debug!(
            repository = %self.name,
            commit = %id,
            position = index,
            size = self.size,
            "dropped commit"
        );
        true
    }

    /// Move every commit from `other` into this repository, newest first.
    ///
    /// On equal timestamps the commit from `other` goes first. `other` is left
    /// empty. Returns the number of commits transferred.
    pub fn synchronize(&mut self, other: &mut Repository) -> usize {
        self.synchronize_with(other, TieBreak::Incoming)
    }

    /// [`synchronize`](Self::synchronize) with an explicit tie-break rule.
    pub fn synchronize_with(&mut self, other: &mut Repository, tie_break: TieBreak) -> usize {
        if other.is_empty() {
            return 0;
        }

        let (incoming, transferred) = other.take_chain();
        let local = self.head.take();
        self.head = merge_chains(local, incoming, tie_break);
        self.size += transferred;

        tracing::debug!(
            repository = %self.name,
            from = %other.name,
            transferred,
            size = self.size,
            head = ?self.head(),
            "synchronized"
        );
        transferred
    }

    /// Detach the whole chain, leaving this repository empty.
    fn take_chain(&mut self) -> (Option<Box<Commit>>, usize) {
        let size = std::mem::replace(&mut self.size, 0);
        (self.head.take(), size)
    }

    /// The link that owns the commit at `index` (0 is the head).
    fn link_at(&mut self, index: usize) -> &mut Option<Box<Commit>> {
        let mut link = &mut self.head;
        for _ in 0..index {
            match link {
                Some(node) => link = &mut node.past,
                None => break,
            }
        }
        link
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.head {
            None => write!(f, "{} - No commits", self.name),
            Some(head) => write!(f, "{} - Current head: {}", self.name, head),
        }
    }
}

/// Iterator over a repository's commits, newest first.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    next: Option<&'a Commit>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Commit;

    fn next(&mut self) -> Option<Self::Item> {
        let commit = self.next?;
        self.next = commit.past();
        Some(commit)
    }
}

impl<'a> IntoIterator for &'a Repository {
    type Item = &'a Commit;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

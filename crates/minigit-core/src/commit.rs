//! Commit: one immutable entry in a repository's history.
//!
//! A commit carries its id, creation time and message, plus an owning link
//! to the commit made immediately before it. Only the link is ever rewritten,
//! and only by [`Repository`](crate::repository::Repository) while splicing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::clock::{Clock, SystemClock};
use crate::ids::IdGenerator;
use crate::types::CommitId;

/// Layout used when rendering a commit's timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d at %H:%M:%S %Z";

/// A single commit node.
pub struct Commit {
    id: CommitId,
    timestamp: i64,
    message: String,
    pub(crate) past: Option<Box<Commit>>,
}

impl Commit {
    /// Create a commit on top of `past`, using the process-wide id counter
    /// and the system clock.
    pub fn new(message: impl Into<String>, past: Option<Box<Commit>>) -> Self {
        CommitFactory::global().create(message, past)
    }

    /// Create a commit with no predecessor.
    pub fn root(message: impl Into<String>) -> Self {
        Self::new(message, None)
    }

    /// Assemble a commit from explicit parts without touching any counter.
    pub fn from_parts(
        id: CommitId,
        timestamp: i64,
        message: impl Into<String>,
        past: Option<Box<Commit>>,
    ) -> Self {
        Self {
            id,
            timestamp,
            message: message.into(),
            past,
        }
    }

    /// Reset the process-wide id counter to 0.
    pub fn reset_ids() {
        CommitFactory::global().ids().reset();
    }

    pub fn id(&self) -> CommitId {
        self.id
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The commit made immediately before this one.
    pub fn past(&self) -> Option<&Commit> {
        self.past.as_deref()
    }

    /// Timestamp as a UTC date-time with second precision.
    ///
    /// Values chrono cannot represent fall back to the raw millisecond count.
    pub fn render_timestamp(&self) -> String {
        match DateTime::<Utc>::from_timestamp_millis(self.timestamp) {
            Some(at) => at.format(TIMESTAMP_FORMAT).to_string(),
            None => self.timestamp.to_string(),
        }
    }

    /// `"{id} at {timestamp}: {message}"`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// A detached, serializable copy of this commit's fields.
    pub fn record(&self) -> CommitRecord {
        CommitRecord {
            id: self.id,
            timestamp: self.timestamp,
            message: self.message.clone(),
        }
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.id, self.render_timestamp(), self.message)
    }
}

// Printing the whole chain recursively would be unbounded.
impl fmt::Debug for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commit")
            .field("id", &self.id)
            .field("timestamp", &self.timestamp)
            .field("message", &self.message)
            .field("past", &self.past.as_ref().map(|p| p.id))
            .finish()
    }
}

impl Drop for Commit {
    fn drop(&mut self) {
        let mut next = self.past.take();
        while let Some(mut node) = next {
            next = node.past.take();
        }
    }
}

/// The plain fields of a commit, without its link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: CommitId,
    pub timestamp: i64,
    pub message: String,
}

/// Stamps new commits with an id and a timestamp.
///
/// Cloning shares the same counter and clock.
#[derive(Debug, Clone)]
pub struct CommitFactory {
    ids: Arc<IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl CommitFactory {
    pub fn new(ids: Arc<IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }

    /// A factory with its own counter starting at 0.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::new(Arc::new(IdGenerator::new()), clock)
    }

    /// The shared process-wide factory: one counter, system clock.
    pub fn global() -> Self {
        static GLOBAL: OnceLock<CommitFactory> = OnceLock::new();
        GLOBAL
            .get_or_init(|| Self::with_clock(Arc::new(SystemClock)))
            .clone()
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Allocate an id, read the clock, and build the commit.
    pub fn create(&self, message: impl Into<String>, past: Option<Box<Commit>>) -> Commit {
        let id = self.ids.next_id();
        let timestamp = self.clock.now_millis();
        Commit::from_parts(id, timestamp, message, past)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn manual_factory(start: i64) -> CommitFactory {
        CommitFactory::with_clock(Arc::new(ManualClock::new(start)))
    }

    #[test]
    fn test_factory_assigns_sequential_ids() {
        let factory = manual_factory(1000);
        let first = factory.create("first", None);
        let second = factory.create("second", Some(Box::new(first)));

        assert_eq!(second.id(), CommitId(1));
        assert_eq!(second.past().map(Commit::id), Some(CommitId(0)));
        assert_eq!(second.timestamp(), 1000);
    }

    #[test]
    fn test_render_format() {
        let commit = Commit::from_parts(CommitId(0), 0, "initial", None);
        assert_eq!(commit.render(), "0 at 1970-01-01 at 00:00:00 UTC: initial");
    }

    #[test]
    fn test_render_truncates_to_seconds() {
        let commit = Commit::from_parts(CommitId(3), 1_730_246_400_999, "msg", None);
        assert_eq!(commit.render(), "3 at 2024-10-30 at 00:00:00 UTC: msg");
    }

    #[test]
    fn test_render_out_of_range_timestamp() {
        let commit = Commit::from_parts(CommitId(1), i64::MAX, "far", None);
        assert_eq!(commit.render_timestamp(), i64::MAX.to_string());
        assert!(commit.render().ends_with(": far"));
    }

    #[test]
    fn test_empty_message_accepted() {
        let commit = manual_factory(5).create("", None);
        assert_eq!(commit.message(), "");
        assert!(commit.render().ends_with(": "));
    }

    #[test]
    fn test_global_ids_increase() {
        // Other tests share the global counter, so only check ordering.
        let a = Commit::root("a");
        let b = Commit::root("b");
        assert!(b.id() > a.id());
    }

    #[test]
    fn test_debug_shows_past_id_only() {
        let root = Commit::from_parts(CommitId(0), 1, "root", None);
        let child = Commit::from_parts(CommitId(1), 2, "child", Some(Box::new(root)));
        let debug = format!("{:?}", child);
        assert!(debug.contains("past: Some(CommitId(0))"));
        assert!(!debug.contains("root"));
    }

    #[test]
    fn test_long_chain_drops_without_overflow() {
        let factory = manual_factory(0);
        let mut head: Option<Box<Commit>> = None;
        for _ in 0..200_000 {
            head = Some(Box::new(factory.create("x", head)));
        }
        drop(head);
    }

    #[test]
    fn test_record_serializes() {
        let commit = Commit::from_parts(CommitId(9), 42, "hello", None);
        let json = serde_json::to_value(commit.record()).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["timestamp"], 42);
        assert_eq!(json["message"], "hello");
    }
}

//! # minigit
//!
//! A minimal version-control history: append-only chains of immutable
//! commits that can be queried, pruned and merged by timestamp.
//!
//! ## Overview
//!
//! - **Commit**: Immutable. Carries an id, a millisecond timestamp and a message.
//! - **Repository**: A named chain of commits, newest first.
//! - **Drop**: Removes one commit anywhere in the chain without disturbing the rest.
//! - **Synchronize**: Moves all commits of one repository into another,
//!   interleaved by timestamp. The donor is left empty.
//!
//! ## Usage
//!
//! ```rust
//! use minigit::{Hub, HubConfig};
//!
//! let hub = Hub::new(HubConfig::default());
//! hub.create_repository("local").unwrap();
//! hub.create_repository("remote").unwrap();
//!
//! hub.commit("local", "init").unwrap();
//! hub.commit("remote", "fix typo").unwrap();
//!
//! let report = hub.synchronize("local", "remote").unwrap();
//! assert_eq!(report.size, 2);
//! assert_eq!(hub.size("remote").unwrap(), 0);
//! ```
//!
//! ## Re-exports
//!
//! - `minigit::core` - Core data structures (Commit, Repository, etc.)

pub mod error;
pub mod hub;

pub use minigit_core as core;

pub use error::{MiniGitError, Result};
pub use hub::{Hub, HubConfig, SyncReport};

pub use minigit_core::{
    Clock, Commit, CommitFactory, CommitId, CommitRecord, HistoryDigest, IdGenerator,
    ManualClock, Repository, SystemClock, TieBreak,
};

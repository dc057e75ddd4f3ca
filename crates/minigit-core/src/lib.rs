//! # minigit core
//!
//! Pure data structures for a minimal version-control history: immutable
//! commits linked newest-first, and repositories that own, splice and merge
//! those chains.
//!
//! This crate contains no I/O and no global logging setup.
//!
//! ## Key Types
//!
//! - [`Commit`] - One history entry with an owning link to its predecessor
//! - [`CommitId`] - Counter-assigned identifier
//! - [`CommitFactory`] - Pairs an [`IdGenerator`] with a [`Clock`]
//! - [`Repository`] - Named chain with commit, drop and synchronize
//! - [`TieBreak`] - Ordering rule for equal timestamps during a merge
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use minigit_core::{CommitFactory, ManualClock, Repository};
//!
//! let clock = Arc::new(ManualClock::new(1_000));
//! let factory = CommitFactory::with_clock(clock.clone());
//!
//! let mut local = Repository::with_factory("local", factory.clone()).unwrap();
//! let mut remote = Repository::with_factory("remote", factory).unwrap();
//!
//! local.commit("init");
//! clock.advance(10);
//! remote.commit("fix");
//!
//! local.synchronize(&mut remote);
//! assert_eq!(local.size(), 2);
//! assert!(remote.is_empty());
//! ```

pub mod clock;
pub mod commit;
pub mod error;
pub mod ids;
pub mod merge;
pub mod repository;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use commit::{Commit, CommitFactory, CommitRecord, TIMESTAMP_FORMAT};
pub use error::{CoreError, Result};
pub use ids::IdGenerator;
pub use merge::{merge_chains, TieBreak};
pub use repository::{Iter, Repository};
pub use types::{CommitId, HistoryDigest};

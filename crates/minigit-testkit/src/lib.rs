//! # minigit testkit
//!
//! Testing utilities for minigit.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: A manual clock and a private id counter, so tests control
//!   timestamps exactly and never race on the process-wide counter
//! - **Generators**: Proptest strategies for timestamp sequences and chains
//!
//! ## Test Fixtures
//!
//! ```rust
//! use minigit_testkit::fixtures::{timestamps, TestFixture};
//!
//! let fixture = TestFixture::new();
//! let mut a = fixture.repository_with_timestamps("a", &[10, 30]);
//! let mut b = fixture.repository_with_timestamps("b", &[20]);
//!
//! a.synchronize(&mut b);
//! assert_eq!(timestamps(&a), vec![30, 20, 10]);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use minigit_testkit::{ChainParams, TestFixture};
//!
//! proptest! {
//!     #[test]
//!     fn size_is_chain_length(params: ChainParams) {
//!         let fixture = TestFixture::new();
//!         let repo = params.build(&fixture);
//!         prop_assert_eq!(repo.iter().count(), repo.size());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{is_newest_first, messages, timestamps, TestFixture};
pub use generators::{ChainParams, MergeParams};

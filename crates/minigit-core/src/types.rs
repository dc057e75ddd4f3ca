//! Strong type definitions for minigit.
//!
//! Identifiers and digests are newtypes so they cannot be mixed up with
//! plain integers or byte arrays.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// A commit identifier handed out by an [`IdGenerator`](crate::ids::IdGenerator).
///
/// Rendered as a decimal string, which is also its parse format.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(pub u64);

impl CommitId {
    /// Create from a raw counter value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw counter value.
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitId({})", self.0)
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CommitId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<u64> for CommitId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Blake3 digest of a repository's history.
///
/// Two chains with the same ids, timestamps and messages in the same order
/// produce the same digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryDigest(pub [u8; 32]);

impl HistoryDigest {
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

// Short prefix only, like an abbreviated commit hash.
impl fmt::Display for HistoryDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex()[..12])
    }
}

impl fmt::Debug for HistoryDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HistoryDigest({self})")
    }
}

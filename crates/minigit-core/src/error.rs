//! Error types for minigit core.

use thiserror::Error;

/// Errors raised when a caller breaks an operation's contract.
///
/// Lookups that find nothing are not errors; they report `false` or `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

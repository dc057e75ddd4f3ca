//! Error types for the hub.

use minigit_core::CoreError;
use thiserror::Error;

/// Errors that can occur during hub operations.
#[derive(Debug, Error)]
pub enum MiniGitError {
    /// Contract violation reported by the core.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// No repository registered under this name.
    #[error("repository not found: {0}")]
    RepositoryNotFound(String),

    /// A repository with this name is already registered.
    #[error("repository already exists: {0}")]
    RepositoryExists(String),

    /// Invalid operation.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for hub operations.
pub type Result<T> = std::result::Result<T, MiniGitError>;

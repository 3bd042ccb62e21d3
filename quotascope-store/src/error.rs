//! Store error types.

use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Project not found.
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Refresh already in progress.
    #[error("Refresh already in progress for {0}")]
    RefreshInProgress(String),

    /// Fetch error.
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Returns true if this is a transient error that might succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::FetchFailed(_) | StoreError::Io(_))
    }
}

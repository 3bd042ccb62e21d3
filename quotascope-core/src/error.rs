//! Core error types for Quotascope.

use thiserror::Error;

/// Core error type for Quotascope operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Project not found or not configured.
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid data from API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Fetch failed in a source implementation.
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

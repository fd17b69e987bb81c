//! Error types for the reorder engine
//!
//! Gesture anomalies (foreign payloads, disallowed drops, vanished targets)
//! are not errors. They are reported as [`crate::gate::Rejection`] values and
//! never surface here.

use thiserror::Error;

/// Result type alias using ReorderError
pub type Result<T> = std::result::Result<T, ReorderError>;

/// Errors that can occur outside of normal gesture handling
#[derive(Debug, Error)]
pub enum ReorderError {
    /// Drag payload could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A collection was built with duplicate identifiers
    #[error("Duplicate entity id: {0}")]
    DuplicateId(String),

    /// An entity referenced by id does not exist
    #[error("Entity not found: {0}")]
    NotFound(String),
}

impl ReorderError {
    /// Create a not-found error for the given id
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }
}

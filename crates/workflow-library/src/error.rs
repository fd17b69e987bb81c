//! Error types for the workflow library

use thiserror::Error;

use reorder_engine::ReorderError;

/// Result type alias using LibraryError
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Errors that can occur while building or editing a library
#[derive(Debug, Error)]
pub enum LibraryError {
    /// A node type was registered twice
    #[error("Duplicate node type: {0}")]
    DuplicateNodeType(String),

    /// Error from the underlying ordered collection
    #[error(transparent)]
    Reorder(#[from] ReorderError),
}

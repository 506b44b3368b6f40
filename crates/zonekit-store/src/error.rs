//! Error types for the zone store crate.
//!
//! Store operations themselves are total; these errors only come from loading
//! and persisting snapshots.

use std::io;
use thiserror::Error;

/// Errors that can occur while loading or saving a snapshot.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The snapshot violates a schema invariant.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// The new snapshot could not replace the previous one.
    #[error("Failed to persist snapshot to {path}: {reason}")]
    PersistError { path: String, reason: String },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

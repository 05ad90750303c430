//! Error types for JSON store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during `JsonStore` operations.
#[derive(Error, Debug)]
pub enum JsonStoreError {
    /// The store file exists but does not contain a recognised record.
    #[error("unrecognised schema '{schema}' in {path}")]
    UnknownSchema {
        /// Schema marker found in the file.
        schema: String,
        /// Path of the offending file.
        path: PathBuf,
    },

    /// The store path has no parent directory to stage the temp file in.
    #[error("store path has no parent directory: {0}")]
    NoParentDir(PathBuf),

    /// Failed to parse the persisted collection.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize the collection.
    #[error("failed to serialize task collection: {0}")]
    Serialize(#[source] serde_json::Error),

    /// I/O operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

//! File-backed storage for the taskpile task collection.
//!
//! The whole collection lives in a single JSON record. Every save rewrites
//! the file through a temp-file-plus-rename so a crash mid-write never
//! leaves a half-written store behind.

mod error;

pub use error::JsonStoreError;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use taskpile_core::Task;
use tempfile::NamedTempFile;
use tracing::debug;

const SCHEMA: &str = "taskpile-tasks@1";

/// On-disk record wrapping the task collection.
#[derive(Debug, Serialize, Deserialize)]
struct StoreRecord {
    /// Schema identifier for forward compatibility.
    schema: String,
    /// The raw task collection, newest first.
    tasks: Vec<Task>,
}

/// Storage based on a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store handle for the given file path. The file itself is
    /// created lazily on the first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted task collection. A missing file is an empty
    /// collection, not an error.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Vec<Task>, JsonStoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "store file absent, starting empty");
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| JsonStoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let record: StoreRecord =
            serde_json::from_str(&contents).map_err(|source| JsonStoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        if record.schema != SCHEMA {
            return Err(JsonStoreError::UnknownSchema {
                schema: record.schema,
                path: self.path.clone(),
            });
        }

        debug!(path = %self.path.display(), count = record.tasks.len(), "loaded task collection");
        Ok(record.tasks)
    }

    /// Persist the task collection, replacing any previous contents.
    ///
    /// # Errors
    /// Returns an error when serialization or the file write fails.
    pub fn save(&self, tasks: &[Task]) -> Result<(), JsonStoreError> {
        let record = StoreRecord {
            schema: SCHEMA.to_owned(),
            tasks: tasks.to_vec(),
        };
        let body = serde_json::to_string_pretty(&record).map_err(JsonStoreError::Serialize)?;

        let dir = self
            .path
            .parent()
            .ok_or_else(|| JsonStoreError::NoParentDir(self.path.clone()))?;
        fs::create_dir_all(dir).map_err(|source| JsonStoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        // Stage in the same directory so the final rename stays on one
        // filesystem and therefore atomic.
        let tmp = NamedTempFile::new_in(dir).map_err(|source| JsonStoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        fs::write(tmp.path(), body).map_err(|source| JsonStoreError::Io {
            path: tmp.path().to_path_buf(),
            source,
        })?;
        tmp.persist(&self.path)
            .map_err(|err| JsonStoreError::Io {
                path: self.path.clone(),
                source: err.error,
            })?;

        debug!(path = %self.path.display(), count = tasks.len(), "saved task collection");
        Ok(())
    }
}

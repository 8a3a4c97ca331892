//! # Storage Error Types
//!
//! Error types for file system operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FileStoreError (this module) ← Adds the path involved                 │
//! │       │                                                                 │
//! │       ├──► StorageError (KeyValueStore calls) ← Cart records it as a   │
//! │       │                                          diagnostic            │
//! │       │                                                                 │
//! │       └──► ApiError (FileStore::open in the app) ← printed as JSON     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use storefront_core::StorageError;
use thiserror::Error;

/// File store errors.
#[derive(Debug, Error)]
pub enum FileStoreError {
    /// No home directory to derive a data directory from.
    #[error("Could not determine app data directory")]
    NoDataDir,

    /// The data directory could not be created.
    #[error("Failed to create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file operation failed.
    ///
    /// ## When This Occurs
    /// - Permission denied
    /// - Disk full while writing the temp file
    /// - Stored file is not valid UTF-8
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileStoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FileStoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Converts into the store-agnostic error for a failed read.
    pub fn into_read(self, key: &str) -> StorageError {
        StorageError::Read {
            key: key.to_string(),
            reason: self.to_string(),
        }
    }

    /// Converts into the store-agnostic error for a failed write.
    pub fn into_write(self, key: &str) -> StorageError {
        StorageError::Write {
            key: key.to_string(),
            reason: self.to_string(),
        }
    }

    /// Converts into the store-agnostic error for a failed delete.
    pub fn into_remove(self, key: &str) -> StorageError {
        StorageError::Remove {
            key: key.to_string(),
            reason: self.to_string(),
        }
    }
}

/// Result type for file store operations.
pub type FileStoreResult<T> = Result<T, FileStoreError>;

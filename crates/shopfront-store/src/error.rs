//! # Store Error Types
//!
//! Error types for catalog persistence.
//!
//! Each variant carries the file path. On the read path `CatalogStore::load`
//! logs the error and returns an empty catalog; on the write path it reaches
//! the caller as `EngineError::Store`.

use std::path::PathBuf;

use thiserror::Error;

/// Catalog persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the file failed.
    ///
    /// ## When This Occurs
    /// - The catalog file does not exist yet
    /// - File permissions issue
    /// - Disk full during save
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid catalog document.
    #[error("Failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The catalog could not be encoded.
    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The backing store refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Creates an Io error for a given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Checks whether the error is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let err = StoreError::io(
            "products.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
        assert!(err.to_string().contains("products.json"));

        let err = StoreError::Unavailable("offline".to_string());
        assert!(!err.is_not_found());
    }
}

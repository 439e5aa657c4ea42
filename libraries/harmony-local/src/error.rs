//! Error types for the local collection

use std::path::PathBuf;
use thiserror::Error;

/// Local collection errors
#[derive(Debug, Error)]
pub enum LocalError {
    /// File system error
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored value could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Only `audio/*` files can be added
    #[error("Only audio files are supported (got {0})")]
    UnsupportedType(String),

    /// No track with this id
    #[error("Local track not found: {0}")]
    NotFound(String),

    /// Store key is not usable as a file name
    #[error("Invalid store key: {0}")]
    InvalidKey(String),
}

impl LocalError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<LocalError> for harmony_core::HarmonyError {
    fn from(err: LocalError) -> Self {
        match err {
            LocalError::NotFound(id) => Self::not_found("LocalTrack", id),
            LocalError::UnsupportedType(_) | LocalError::InvalidKey(_) => {
                Self::invalid_input(err.to_string())
            }
            LocalError::Serialization(e) => Self::Serialization(e),
            LocalError::Io { .. } => Self::storage(err.to_string()),
        }
    }
}

/// Result type for local collection operations
pub type Result<T> = std::result::Result<T, LocalError>;

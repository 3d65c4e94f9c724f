//! Cache persistence error types.

use thiserror::Error;

/// Persistence error variants.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum StoreError {
    #[error("failed to read {key}: {message}")]
    ReadFailed { key: String, message: String },

    #[error("failed to write {key}: {message}")]
    WriteFailed { key: String, message: String },

    #[error("failed to serialize {key}: {message}")]
    Serialize { key: String, message: String },
}

impl StoreError {
    /// Creates read failed error.
    #[must_use]
    pub fn read_failed(key: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::ReadFailed {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Creates write failed error.
    #[must_use]
    pub fn write_failed(key: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::WriteFailed {
            key: key.into(),
            message: message.to_string(),
        }
    }
}

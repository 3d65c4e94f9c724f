//! Upload service error types.

use thiserror::Error;

/// Upload service error variants.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum UploadError {
    #[error("network error talking to the upload service: {message}")]
    NetworkError { message: String },

    #[error("request rejected by the upload service: {message}")]
    Rejected { message: String },

    #[error("rate limited by the upload service, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("upload service returned no token")]
    EmptyResponse,

    #[error("unexpected upload service error: {message}")]
    Unexpected { message: String },
}

impl UploadError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates rejected error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether a later attempt may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::RateLimited { .. } | Self::EmptyResponse
        )
    }
}

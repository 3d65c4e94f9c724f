//! Image resolution error types.

use thiserror::Error;

use super::UploadError;
use crate::domain::entities::CacheSlot;

/// Reasons a source could not be resolved into a token.
///
/// None of these are fatal: callers publish presence without an image.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// The external URL lookup produced no token.
    #[error("external image lookup failed for {url}: {source}")]
    Lookup {
        /// URL that was looked up.
        url: String,
        /// Underlying upload service error.
        source: UploadError,
    },

    /// Image bytes could not be obtained.
    #[error("could not acquire image bytes for {package_name}: {message}")]
    Acquisition {
        /// Package whose image was requested.
        package_name: String,
        /// What went wrong.
        message: String,
    },

    /// The upload produced no token. Nothing was cached.
    #[error("upload failed for {slot}: {source}")]
    Upload {
        /// Cache slot the upload was for.
        slot: CacheSlot,
        /// Underlying upload service error.
        source: UploadError,
    },
}

impl ResolveError {
    /// Creates acquisition error.
    #[must_use]
    pub fn acquisition(package_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Acquisition {
            package_name: package_name.into(),
            message: message.into(),
        }
    }

    /// Returns whether retrying the same source may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Lookup { source, .. } | Self::Upload { source, .. } => source.is_transient(),
            Self::Acquisition { .. } => false,
        }
    }
}

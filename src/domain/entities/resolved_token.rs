//! Resolved presence image token.

use serde::{Deserialize, Serialize};

/// Prefix the presence protocol expects in front of raw media proxy asset ids.
pub const MEDIA_PROXY_PREFIX: &str = "mp:";

/// Opaque token identifying an image the presence protocol can render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedToken(String);

impl ResolvedToken {
    /// Wraps a token produced by the upload service or read from the cache.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Builds the token for a raw platform asset id.
    #[must_use]
    pub fn from_asset_id(asset_id: &str) -> Self {
        Self(format!("{MEDIA_PROXY_PREFIX}{asset_id}"))
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResolvedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ResolvedToken {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ResolvedToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for ResolvedToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//! Cache namespaces and slots.

use serde::{Deserialize, Serialize};

/// Independent key spaces of the image token cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheNamespace {
    /// Application icons, keyed by package name.
    Icons,
    /// Media artwork, keyed by `package:title`.
    Artwork,
}

impl CacheNamespace {
    /// Storage key the namespace blob is persisted under.
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Icons => "saved_images",
            Self::Artwork => "saved_artwork",
        }
    }

    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Icons => "icons",
            Self::Artwork => "artwork",
        }
    }
}

impl std::fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(namespace, key)` pair addressing one cached token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheSlot {
    /// Namespace the key lives in.
    pub namespace: CacheNamespace,
    /// Key within the namespace.
    pub key: String,
}

impl CacheSlot {
    /// Slot for an application icon.
    #[must_use]
    pub fn icon(package_name: &str) -> Self {
        Self {
            namespace: CacheNamespace::Icons,
            key: package_name.to_string(),
        }
    }

    /// Slot for a piece of artwork. One application can own many artwork tokens.
    #[must_use]
    pub fn artwork(package_name: &str, title: &str) -> Self {
        Self {
            namespace: CacheNamespace::Artwork,
            key: format!("{package_name}:{title}"),
        }
    }
}

impl std::fmt::Display for CacheSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys_are_distinct() {
        assert_ne!(
            CacheNamespace::Icons.storage_key(),
            CacheNamespace::Artwork.storage_key()
        );
    }

    #[test]
    fn test_artwork_slot_uses_composite_key() {
        let slot = CacheSlot::artwork("com.spotify.music", "Song A");
        assert_eq!(slot.namespace, CacheNamespace::Artwork);
        assert_eq!(slot.key, "com.spotify.music:Song A");
    }

    #[test]
    fn test_icon_slot_uses_package_name() {
        let slot = CacheSlot::icon("com.spotify.music");
        assert_eq!(slot.namespace, CacheNamespace::Icons);
        assert_eq!(slot.key, "com.spotify.music");
        assert_eq!(slot.to_string(), "icons/com.spotify.music");
    }
}

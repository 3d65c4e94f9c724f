//! Image sources that can be resolved into presence tokens.

use std::sync::Arc;

use bytes::Bytes;

use super::cache_namespace::CacheSlot;
use crate::domain::ports::IconProviderPort;

/// Where a presence image comes from.
#[derive(Clone)]
pub enum ImageSource {
    /// Asset already hosted by the platform's media proxy.
    RawAsset {
        /// Platform asset id.
        asset_id: String,
    },
    /// Image hosted at an arbitrary URL.
    ExternalUrl {
        /// Public URL of the image.
        url: String,
    },
    /// Icon of an installed application.
    AppIcon {
        /// Package name of the application.
        package_name: String,
        /// Supplies the icon bytes on a cache miss.
        provider: Arc<dyn IconProviderPort>,
    },
    /// In-memory artwork, such as album art of the playing track.
    Artwork {
        /// Package name of the application publishing the artwork.
        package_name: String,
        /// Title the artwork belongs to.
        title: String,
        /// Encoded image bytes.
        bytes: Bytes,
    },
}

impl ImageSource {
    /// Creates a raw asset source.
    #[must_use]
    pub fn raw_asset(asset_id: impl Into<String>) -> Self {
        Self::RawAsset {
            asset_id: asset_id.into(),
        }
    }

    /// Creates an external URL source.
    #[must_use]
    pub fn external_url(url: impl Into<String>) -> Self {
        Self::ExternalUrl { url: url.into() }
    }

    /// Creates an application icon source.
    #[must_use]
    pub fn app_icon(package_name: impl Into<String>, provider: Arc<dyn IconProviderPort>) -> Self {
        Self::AppIcon {
            package_name: package_name.into(),
            provider,
        }
    }

    /// Creates an artwork source.
    #[must_use]
    pub fn artwork(
        package_name: impl Into<String>,
        title: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self::Artwork {
            package_name: package_name.into(),
            title: title.into(),
            bytes: bytes.into(),
        }
    }

    /// Classifies a free-form image reference.
    ///
    /// Anything starting with `http` is treated as an external URL, everything
    /// else as a platform asset id. Blank references yield `None`.
    #[must_use]
    pub fn from_reference(reference: &str) -> Option<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        if reference.starts_with("http") {
            Some(Self::external_url(reference))
        } else {
            Some(Self::raw_asset(reference))
        }
    }

    /// Returns the cache slot for sources whose tokens are cached locally.
    #[must_use]
    pub fn cache_slot(&self) -> Option<CacheSlot> {
        match self {
            Self::RawAsset { .. } | Self::ExternalUrl { .. } => None,
            Self::AppIcon { package_name, .. } => Some(CacheSlot::icon(package_name)),
            Self::Artwork {
                package_name,
                title,
                ..
            } => Some(CacheSlot::artwork(package_name, title)),
        }
    }

    /// Returns whether resolving this source may touch the network.
    #[must_use]
    pub const fn requires_network(&self) -> bool {
        !matches!(self, Self::RawAsset { .. })
    }

    /// Short name of the variant, for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RawAsset { .. } => "raw_asset",
            Self::ExternalUrl { .. } => "external_url",
            Self::AppIcon { .. } => "app_icon",
            Self::Artwork { .. } => "artwork",
        }
    }
}

impl std::fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RawAsset { asset_id } => f
                .debug_struct("RawAsset")
                .field("asset_id", asset_id)
                .finish(),
            Self::ExternalUrl { url } => f.debug_struct("ExternalUrl").field("url", url).finish(),
            Self::AppIcon { package_name, .. } => f
                .debug_struct("AppIcon")
                .field("package_name", package_name)
                .finish_non_exhaustive(),
            Self::Artwork {
                package_name,
                title,
                bytes,
            } => f
                .debug_struct("Artwork")
                .field("package_name", package_name)
                .field("title", title)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

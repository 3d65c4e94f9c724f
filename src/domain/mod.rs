//! Domain layer with image sources, tokens, and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{CacheNamespace, CacheSlot, ImageSource, ResolvedToken};
pub use errors::{ResolveError, StoreError, UploadError};
pub use ports::{IconProviderPort, ImageCachePort, PreferencePort, UploadPort};

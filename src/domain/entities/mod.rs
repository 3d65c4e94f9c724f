//! Domain entity definitions.

mod cache_namespace;
mod image_source;
mod resolved_token;

pub use cache_namespace::{CacheNamespace, CacheSlot};
pub use image_source::ImageSource;
pub use resolved_token::{MEDIA_PROXY_PREFIX, ResolvedToken};

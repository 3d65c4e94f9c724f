//! Application icon provider port definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::ResolveError;

/// Port for obtaining the encoded icon of an installed application.
#[async_trait]
pub trait IconProviderPort: Send + Sync {
    /// Returns the icon bytes for the package.
    ///
    /// Fails with [`ResolveError::Acquisition`] when the icon is unavailable.
    async fn icon_bytes(&self, package_name: &str) -> Result<Bytes, ResolveError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Icon provider returning fixed bytes, or failing when it has none.
    pub struct MockIconProvider {
        bytes: Option<Bytes>,
        calls: Arc<AtomicUsize>,
    }

    impl MockIconProvider {
        /// Creates provider that always returns `bytes`.
        pub fn new(bytes: &'static [u8]) -> Self {
            Self {
                bytes: Some(Bytes::from_static(bytes)),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Creates provider that always fails.
        pub fn failing() -> Self {
            Self {
                bytes: None,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Number of `icon_bytes` calls so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IconProviderPort for MockIconProvider {
        async fn icon_bytes(&self, package_name: &str) -> Result<Bytes, ResolveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.bytes
                .clone()
                .ok_or_else(|| ResolveError::acquisition(package_name, "package not installed"))
        }
    }
}

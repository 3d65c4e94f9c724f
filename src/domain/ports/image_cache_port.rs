//! Port definition for the image token cache.

use crate::domain::entities::{CacheNamespace, ResolvedToken};
use crate::domain::errors::StoreError;

/// Port for the persisted token cache.
/// Implementations must be thread-safe. Reads and writes do not suspend.
pub trait ImageCachePort: Send + Sync {
    /// Returns the cached token for `key`, if any.
    fn get(&self, namespace: CacheNamespace, key: &str) -> Option<ResolvedToken>;

    /// Inserts or replaces a token and persists the whole namespace.
    ///
    /// The in-memory entry is kept even when persisting fails. The call blocks
    /// on backend I/O while holding the namespace lock, so readers of the same
    /// namespace wait until the write finishes.
    ///
    /// # Errors
    /// Returns error if the namespace could not be durably written.
    fn put(
        &self,
        namespace: CacheNamespace,
        key: &str,
        token: &ResolvedToken,
    ) -> Result<(), StoreError>;

    /// Returns a snapshot of the namespace sorted by key.
    fn entries(&self, namespace: CacheNamespace) -> Vec<(String, ResolvedToken)>;

    /// Returns the number of entries in the namespace.
    fn len(&self, namespace: CacheNamespace) -> usize;

    /// Returns true if the namespace has no entries.
    fn is_empty(&self, namespace: CacheNamespace) -> bool {
        self.len(namespace) == 0
    }
}

//! Namespaced write-through token cache.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use crate::domain::entities::{CacheNamespace, ResolvedToken};
use crate::domain::errors::StoreError;
use crate::domain::ports::{ImageCachePort, PreferencePort};

type Entries = BTreeMap<String, String>;

/// Token cache holding one flat string map per namespace.
///
/// Every `put` serializes the whole namespace as a JSON object and hands it to
/// the preference backend under the namespace's storage key. The namespace
/// write lock is held across the insert and the persist, so concurrent writers
/// never interleave their read-modify-write of the blob.
pub struct ImageCacheStore {
    backend: Arc<dyn PreferencePort>,
    icons: RwLock<Entries>,
    artwork: RwLock<Entries>,
}

impl ImageCacheStore {
    /// Opens the cache, loading both namespaces from the backend.
    ///
    /// A namespace blob that cannot be parsed is logged and treated as empty.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read.
    pub fn open(backend: Arc<dyn PreferencePort>) -> Result<Self, StoreError> {
        let icons = Self::load(backend.as_ref(), CacheNamespace::Icons)?;
        let artwork = Self::load(backend.as_ref(), CacheNamespace::Artwork)?;

        debug!(
            icons = icons.len(),
            artwork = artwork.len(),
            "Loaded image token cache"
        );

        Ok(Self {
            backend,
            icons: RwLock::new(icons),
            artwork: RwLock::new(artwork),
        })
    }

    fn load(backend: &dyn PreferencePort, namespace: CacheNamespace) -> Result<Entries, StoreError> {
        let Some(content) = backend.read(namespace.storage_key())? else {
            return Ok(Entries::new());
        };

        match serde_json::from_str::<Entries>(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(namespace = %namespace, error = %e, "Failed to parse cached tokens, starting empty");
                Ok(Entries::new())
            }
        }
    }

    fn entries_for(&self, namespace: CacheNamespace) -> &RwLock<Entries> {
        match namespace {
            CacheNamespace::Icons => &self.icons,
            CacheNamespace::Artwork => &self.artwork,
        }
    }
}

impl ImageCachePort for ImageCacheStore {
    fn get(&self, namespace: CacheNamespace, key: &str) -> Option<ResolvedToken> {
        let token = self
            .entries_for(namespace)
            .read()
            .get(key)
            .map(ResolvedToken::new);
        trace!(namespace = %namespace, key = %key, hit = token.is_some(), "Token cache lookup");
        token
    }

    fn put(
        &self,
        namespace: CacheNamespace,
        key: &str,
        token: &ResolvedToken,
    ) -> Result<(), StoreError> {
        let storage_key = namespace.storage_key();
        let mut entries = self.entries_for(namespace).write();
        entries.insert(key.to_string(), token.as_str().to_string());

        let blob = serde_json::to_string(&*entries).map_err(|e| StoreError::Serialize {
            key: storage_key.to_string(),
            message: e.to_string(),
        })?;
        self.backend.write(storage_key, &blob)?;

        debug!(namespace = %namespace, key = %key, entries = entries.len(), "Stored token");
        Ok(())
    }

    fn entries(&self, namespace: CacheNamespace) -> Vec<(String, ResolvedToken)> {
        self.entries_for(namespace)
            .read()
            .iter()
            .map(|(key, token)| (key.clone(), ResolvedToken::new(token.as_str())))
            .collect()
    }

    fn len(&self, namespace: CacheNamespace) -> usize {
        self.entries_for(namespace).read().len()
    }
}

impl std::fmt::Debug for ImageCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCacheStore")
            .field("icons", &self.icons.read().len())
            .field("artwork", &self.artwork.read().len())
            .finish_non_exhaustive()
    }
}

//! Image resolution use case.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::application::services::SingleFlight;
use crate::domain::entities::{CacheSlot, ImageSource, ResolvedToken};
use crate::domain::errors::ResolveError;
use crate::domain::ports::{ImageCachePort, UploadPort};

type Resolution = Result<ResolvedToken, ResolveError>;

/// Resolves image sources into presence tokens.
///
/// Icon and artwork tokens are cached per slot and uploaded at most once at a
/// time per slot. Raw assets and external URLs are never cached here.
pub struct ResolveImageUseCase {
    upload_port: Arc<dyn UploadPort>,
    cache_port: Arc<dyn ImageCachePort>,
    flights: SingleFlight<CacheSlot, Resolution>,
}

impl ResolveImageUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(upload_port: Arc<dyn UploadPort>, cache_port: Arc<dyn ImageCachePort>) -> Self {
        Self {
            upload_port,
            cache_port,
            flights: SingleFlight::new(),
        }
    }

    /// Resolves a source, or returns `None` when no image is available.
    ///
    /// Failures are logged and never abort the caller.
    pub async fn resolve(&self, source: ImageSource) -> Option<ResolvedToken> {
        let kind = source.kind();
        match self.try_resolve(source).await {
            Ok(token) => Some(token),
            Err(e) => {
                warn!(source = kind, error = %e, retryable = e.is_retryable(), "No image available");
                None
            }
        }
    }

    /// Resolves a source, reporting why it failed.
    ///
    /// # Errors
    /// Returns error if the lookup, the byte acquisition, or the upload fails.
    pub async fn try_resolve(&self, source: ImageSource) -> Resolution {
        match source {
            ImageSource::RawAsset { asset_id } => Ok(ResolvedToken::from_asset_id(&asset_id)),
            ImageSource::ExternalUrl { url } => {
                debug!(url = %url, "Looking up external image");
                self.upload_port
                    .lookup_external(&url)
                    .await
                    .map(ResolvedToken::new)
                    .map_err(|source| ResolveError::Lookup { url, source })
            }
            ImageSource::AppIcon {
                package_name,
                provider,
            } => {
                let slot = CacheSlot::icon(&package_name);
                let acquire = async move { provider.icon_bytes(&package_name).await };
                self.resolve_cached(slot, acquire).await
            }
            ImageSource::Artwork {
                package_name,
                title,
                bytes,
            } => {
                let slot = CacheSlot::artwork(&package_name, &title);
                self.resolve_cached(slot, std::future::ready(Ok(bytes)))
                    .await
            }
        }
    }

    /// Returns the number of uploads currently in flight.
    #[must_use]
    pub fn uploads_in_flight(&self) -> usize {
        self.flights.in_flight()
    }

    async fn resolve_cached<A>(&self, slot: CacheSlot, acquire: A) -> Resolution
    where
        A: Future<Output = Result<Bytes, ResolveError>> + Send + 'static,
    {
        if let Some(token) = self.cache_port.get(slot.namespace, &slot.key) {
            debug!(slot = %slot, "Token cache hit");
            return Ok(token);
        }

        let flight = Self::upload_and_store(
            Arc::clone(&self.upload_port),
            Arc::clone(&self.cache_port),
            slot.clone(),
            acquire,
        );
        self.flights.run(slot, flight).await
    }

    async fn upload_and_store<A>(
        upload_port: Arc<dyn UploadPort>,
        cache_port: Arc<dyn ImageCachePort>,
        slot: CacheSlot,
        acquire: A,
    ) -> Resolution
    where
        A: Future<Output = Result<Bytes, ResolveError>> + Send + 'static,
    {
        // A flight for this slot may have finished between our lookup and this one starting.
        if let Some(token) = cache_port.get(slot.namespace, &slot.key) {
            return Ok(token);
        }

        let bytes = acquire.await?;
        debug!(slot = %slot, size = bytes.len(), "Uploading image");

        let token = upload_port
            .upload(bytes)
            .await
            .map(ResolvedToken::new)
            .map_err(|source| ResolveError::Upload {
                slot: slot.clone(),
                source,
            })?;

        if let Err(e) = cache_port.put(slot.namespace, &slot.key, &token) {
            warn!(slot = %slot, error = %e, "Failed to persist token, it will be uploaded again next run");
        }
        info!(slot = %slot, "Uploaded image");

        Ok(token)
    }
}

impl std::fmt::Debug for ResolveImageUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolveImageUseCase")
            .field("flights", &self.flights)
            .finish_non_exhaustive()
    }
}

//! Upload service port definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::UploadError;

/// Port for the service that turns images into presence tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploadPort: Send + Sync {
    /// Resolves an externally hosted image URL into a token.
    async fn lookup_external(&self, url: &str) -> Result<String, UploadError>;

    /// Uploads encoded image bytes and returns the token for them.
    async fn upload(&self, bytes: Bytes) -> Result<String, UploadError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    /// Upload stub that counts calls and can hold each call open for a while.
    pub struct StubUploader {
        uploads: Arc<AtomicUsize>,
        lookups: Arc<AtomicUsize>,
        should_fail: Arc<AtomicBool>,
        delay: Duration,
    }

    impl StubUploader {
        /// Creates a stub that answers immediately.
        pub fn new() -> Self {
            Self::with_delay(Duration::ZERO)
        }

        /// Creates a stub that sleeps before answering.
        pub fn with_delay(delay: Duration) -> Self {
            Self {
                uploads: Arc::new(AtomicUsize::new(0)),
                lookups: Arc::new(AtomicUsize::new(0)),
                should_fail: Arc::new(AtomicBool::new(false)),
                delay,
            }
        }

        /// Sets failure behavior.
        pub fn set_should_fail(&self, value: bool) {
            self.should_fail.store(value, Ordering::SeqCst);
        }

        /// Number of `upload` calls so far.
        pub fn upload_calls(&self) -> usize {
            self.uploads.load(Ordering::SeqCst)
        }

        /// Number of `lookup_external` calls so far.
        pub fn lookup_calls(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }

        async fn pause(&self) {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }
    }

    impl Default for StubUploader {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl UploadPort for StubUploader {
        async fn lookup_external(&self, url: &str) -> Result<String, UploadError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.pause().await;
            if self.should_fail.load(Ordering::SeqCst) {
                return Err(UploadError::network("stub lookup failure"));
            }
            Ok(format!("external/{url}"))
        }

        async fn upload(&self, bytes: Bytes) -> Result<String, UploadError> {
            let call = self.uploads.fetch_add(1, Ordering::SeqCst);
            self.pause().await;
            if self.should_fail.load(Ordering::SeqCst) {
                return Err(UploadError::EmptyResponse);
            }
            Ok(format!("attachments/{call}/{}", bytes.len()))
        }
    }
}

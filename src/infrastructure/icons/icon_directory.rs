//! Icon provider backed by a directory of exported icons.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::trace;

use crate::domain::errors::ResolveError;
use crate::domain::ports::IconProviderPort;

const ICON_FILE_EXT: &str = "png";

/// Reads application icons from `<dir>/<package_name>.png`.
#[derive(Debug, Clone)]
pub struct IconDirectory {
    dir: PathBuf,
}

impl IconDirectory {
    /// Creates a provider reading from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn icon_path(&self, package_name: &str) -> Result<PathBuf, ResolveError> {
        let invalid = package_name.is_empty()
            || package_name.contains(['/', '\\'])
            || package_name.contains("..");
        if invalid {
            return Err(ResolveError::acquisition(package_name, "invalid package name"));
        }
        Ok(self.dir.join(format!("{package_name}.{ICON_FILE_EXT}")))
    }
}

#[async_trait]
impl IconProviderPort for IconDirectory {
    async fn icon_bytes(&self, package_name: &str) -> Result<Bytes, ResolveError> {
        let path = self.icon_path(package_name)?;
        let bytes = fs::read(&path).await.map_err(|e| {
            ResolveError::acquisition(package_name, format!("{}: {e}", path.display()))
        })?;

        if bytes.is_empty() {
            return Err(ResolveError::acquisition(package_name, "icon file is empty"));
        }

        trace!(package = %package_name, size = bytes.len(), "Read application icon");
        Ok(Bytes::from(bytes))
    }
}

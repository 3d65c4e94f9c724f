//! File-backed preference storage.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::errors::StoreError;
use crate::domain::ports::PreferencePort;

const PREFERENCE_FILE_EXT: &str = "json";

/// Stores each preference key as `<dir>/<key>.json`.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so readers never observe a partially written value.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    dir: PathBuf,
}

impl FilePreferences {
    /// Creates a backend rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{PREFERENCE_FILE_EXT}"))
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if !self.dir.exists() {
            info!(path = %self.dir.display(), "Creating cache directory");
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }
}

impl PreferencePort for FilePreferences {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::read_failed(key, e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.ensure_dir()
            .map_err(|e| StoreError::write_failed(key, e))?;

        let path = self.path_for(key);
        let mut temp_file = tempfile::NamedTempFile::new_in(&self.dir)
            .map_err(|e| StoreError::write_failed(key, e))?;
        temp_file
            .write_all(value.as_bytes())
            .map_err(|e| StoreError::write_failed(key, e))?;
        temp_file
            .persist(&path)
            .map_err(|e| StoreError::write_failed(key, e.error))?;

        debug!(path = %path.display(), size = value.len(), "Persisted preference");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempdir().unwrap();
        let prefs = FilePreferences::new(dir.path());

        assert_eq!(prefs.read("saved_images").unwrap(), None);
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("cache").join("rpc-image");
        let prefs = FilePreferences::new(nested.clone());

        prefs.write("saved_images", "{}").unwrap();

        assert!(nested.join("saved_images.json").exists());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let prefs = FilePreferences::new(dir.path());

        prefs.write("saved_artwork", r#"{"a:b":"c"}"#).unwrap();
        prefs.write("saved_artwork", r#"{"a:b":"d"}"#).unwrap();

        assert_eq!(
            prefs.read("saved_artwork").unwrap().as_deref(),
            Some(r#"{"a:b":"d"}"#)
        );
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let prefs = FilePreferences::new(dir.path());

        prefs.write("saved_images", "{}").unwrap();

        let files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(files, vec![std::ffi::OsString::from("saved_images.json")]);
    }
}

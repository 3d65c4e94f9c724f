//! Locating and loading `config.toml`.

use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::warn;

use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while reading or seeding the configuration file.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform configuration directory and no explicit path.
    #[error("no configuration directory available; pass --config")]
    NoConfigDir,
    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The default file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The default configuration could not be rendered as TOML.
    #[error("failed to render default config: {0}")]
    Render(#[from] toml::ser::Error),
}

/// The configuration file the process reads its settings from.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    /// Uses `path_override` when given, otherwise `config.toml` in the platform config dir.
    ///
    /// # Errors
    /// Returns `ConfigError::NoConfigDir` if no override is given and the
    /// platform has no config directory.
    pub fn locate(path_override: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path_override {
            Some(path) => path.to_path_buf(),
            None => ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
                .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
                .ok_or(ConfigError::NoConfigDir)?,
        };
        Ok(Self { path })
    }

    /// Reads the file. A missing file is seeded with defaults; an unparsable one
    /// is left alone and defaults are used.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or the defaults cannot be written.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return self.seed_defaults(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        Ok(toml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Invalid config file, using defaults");
            AppConfig::default()
        }))
    }

    fn seed_defaults(&self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig::default();
        let rendered = toml::to_string_pretty(&config)?;
        let write_error = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(write_error)?;
        let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
        staged.write_all(rendered.as_bytes()).map_err(write_error)?;
        staged
            .persist(&self.path)
            .map_err(|e| write_error(e.error))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_seeded_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let file = ConfigFile::locate(Some(&path)).unwrap();

        let config = file.load().unwrap();

        assert_eq!(config.api.base_url, None);
        assert!(path.exists());
        let reloaded = file.load().unwrap();
        assert_eq!(reloaded.api.timeout_secs, config.api.timeout_secs);
    }

    #[test]
    fn test_invalid_file_falls_back_without_overwriting() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "invalid_toml = [").unwrap();

        let config = ConfigFile::locate(Some(&path)).unwrap().load().unwrap();

        assert_eq!(config.api.base_url, None);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "invalid_toml = [");
    }

    #[test]
    fn test_existing_file_is_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[api]\nbase_url = \"https://uploads.example.com\"\n").unwrap();

        let config = ConfigFile::locate(Some(&path)).unwrap().load().unwrap();

        assert_eq!(
            config.api.base_url.as_deref(),
            Some("https://uploads.example.com")
        );
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let dir = tempdir().unwrap();

        let result = ConfigFile::locate(Some(dir.path())).unwrap().load();

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}

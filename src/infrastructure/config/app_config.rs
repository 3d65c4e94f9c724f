//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::infrastructure::upload::DEFAULT_TIMEOUT_SECS;

pub(super) const APP_NAME: &str = "rpc-image";
pub(super) const APP_QUALIFIER: &str = "com";
pub(super) const APP_ORGANIZATION: &str = "rpc-image";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and overridden by CLI flags.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Upload service configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Token cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Icon provider configuration.
    #[serde(default)]
    pub icons: IconsConfig,
}

/// Upload service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the upload service. Required for anything but raw assets.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Token cache configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding the namespace files. Defaults to the platform data dir.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Icon provider configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IconsConfig {
    /// Directory of `<package>.png` icons. Defaults to `icons/` in the data dir.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = &args.api_url {
            self.api.base_url = Some(api_url.clone());
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.api.timeout_secs = timeout_secs;
        }
        if let Some(cache_dir) = &args.cache_dir {
            self.cache.dir = Some(cache_dir.clone());
        }
        if let Some(icon_dir) = &args.icon_dir {
            self.icons.dir = Some(icon_dir.clone());
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
    }

    /// Returns default token cache directory.
    #[must_use]
    pub fn default_cache_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("tokens"))
    }

    /// Returns default icon directory.
    #[must_use]
    pub fn default_icon_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("icons"))
    }

    /// Returns effective log path. Logging goes to stderr when `None`.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone()
    }

    /// Returns effective token cache directory.
    #[must_use]
    pub fn effective_cache_dir(&self) -> Option<PathBuf> {
        self.cache.dir.clone().or_else(Self::default_cache_dir)
    }

    /// Returns effective icon directory.
    #[must_use]
    pub fn effective_icon_dir(&self) -> Option<PathBuf> {
        self.icons.dir.clone().or_else(Self::default_icon_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
            log_level = "debug"

            [api]
            base_url = "https://uploads.example.com"
            timeout_secs = 10

            [cache]
            dir = "/var/lib/rpc-image"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("https://uploads.example.com")
        );
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.cache.dir, Some(PathBuf::from("/var/lib/rpc-image")));
        assert_eq!(config.icons.dir, None);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.api.base_url, None);
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_args_override_file_values() {
        let mut config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://file.example.com"
            "#,
        )
        .unwrap();
        let args = CliArgs::parse_from([
            "rpc-image",
            "--api-url",
            "https://cli.example.com",
            "--cache-dir",
            "/tmp/tokens",
            "resolve",
            "raw",
            "123",
        ]);

        config.merge_with_args(&args);

        assert_eq!(
            config.api.base_url.as_deref(),
            Some("https://cli.example.com")
        );
        assert_eq!(
            config.effective_cache_dir(),
            Some(PathBuf::from("/tmp/tokens"))
        );
    }
}

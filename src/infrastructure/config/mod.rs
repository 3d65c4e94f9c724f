//! Application configuration.

pub mod app_config;
pub mod args;
pub mod config_file;

pub use app_config::{ApiConfig, AppConfig, CacheConfig, IconsConfig, LogLevel};
pub use args::{CacheCommand, CliArgs, Command, NamespaceArg, SourceArgs};
pub use config_file::{ConfigError, ConfigFile};

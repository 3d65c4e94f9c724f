//! Infrastructure layer with adapters for external services.

/// Token cache and preference backends.
pub mod cache;
/// Application configuration.
pub mod config;
/// Application icon providers.
pub mod icons;
/// Upload service client.
pub mod upload;

pub use cache::{FilePreferences, ImageCacheStore, MemoryPreferences};
pub use config::{AppConfig, CliArgs, ConfigFile, LogLevel};
pub use icons::IconDirectory;
pub use upload::UploadApiClient;

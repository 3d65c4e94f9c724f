//! rpc-image - resolve presence images into tokens.
//!
//! This crate turns image sources (platform asset ids, external URLs,
//! application icons, and in-memory artwork) into the opaque tokens a
//! presence update carries, caching uploaded tokens so each image is
//! uploaded at most once.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and services.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "rpc-image";

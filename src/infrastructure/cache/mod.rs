//! Persisted token cache and its preference backends.
//!
//! This module provides:
//! - The namespaced write-through token cache
//! - A file backend writing one JSON blob per namespace
//! - A memory backend for ephemeral runs

pub mod file_preferences;
pub mod image_cache_store;
pub mod memory_preferences;

pub use file_preferences::FilePreferences;
pub use image_cache_store::ImageCacheStore;
pub use memory_preferences::MemoryPreferences;

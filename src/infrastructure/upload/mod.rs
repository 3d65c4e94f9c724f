//! Upload service HTTP client.

mod client;
mod dto;

pub use client::{DEFAULT_TIMEOUT_SECS, UploadApiClient};

//! Application icon providers.

mod icon_directory;

pub use icon_directory::IconDirectory;

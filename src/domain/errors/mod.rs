//! Domain error types.

mod resolve_error;
mod store_error;
mod upload_error;

pub use resolve_error::ResolveError;
pub use store_error::StoreError;
pub use upload_error::UploadError;

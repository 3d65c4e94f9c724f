//! Application layer with use cases and the services they rely on.

/// Supporting services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use services::SingleFlight;
pub use use_cases::ResolveImageUseCase;

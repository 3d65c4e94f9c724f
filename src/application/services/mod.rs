//! Application services.

pub mod single_flight;

pub use single_flight::SingleFlight;

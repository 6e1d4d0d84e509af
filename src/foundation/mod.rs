pub mod arena;
/// Shared value types and constants.
pub mod core;
/// Crate error type.
pub mod error;
pub(crate) mod math;

//! The unified error handling system for the crate.

pub use registry::RegistryError;

/// A unified `Result` type for the entire crate.
///
/// All functions that can fail should return this type.
pub type Result<T> = std::result::Result<T, RegistryError>;

pub mod registry;

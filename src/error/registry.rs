//! Errors raised by registry configuration and mechanism selection.

use thiserror::Error;

use crate::mechanism::Capability;

/// The primary error type for registry operations.
///
/// Every variant is a configuration or request-shape problem, raised
/// synchronously from the operation that detects it and never retried by
/// the registry itself. The embedding security layer decides whether to
/// surface one as an authentication failure or a hard error.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Initialization ran over an empty mechanism collection.
    #[error("no authentication mechanisms configured")]
    NoMechanismsConfigured,

    /// Two mechanisms share a case-insensitive name.
    #[error("duplicate mechanism name: {name}")]
    DuplicateMechanismName {
        /// Name of the second mechanism encountered with the clashing name,
        /// in its original casing.
        name: String,
    },

    /// The dispatch parameter was absent or blank and no default mechanism
    /// is configured to absorb that.
    #[error("request parameter `{parameter}` is missing and no default mechanism is configured")]
    MissingRequestParameter {
        /// Name of the request parameter that was expected.
        parameter: String,
    },

    /// No mechanism matched the requested name.
    #[error("no mechanism found for name: {name}")]
    MechanismNotFoundByName {
        /// The name that was looked up.
        name: String,
    },

    /// No mechanism matched the requested capability.
    #[error("no mechanism found for capability: {capability}")]
    MechanismNotFoundByCapability {
        /// The capability that was looked up.
        capability: Capability,
    },
}

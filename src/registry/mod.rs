//! Grouping, one-time initialization and per-request selection of
//! authentication mechanisms.
//!
//! [`MechanismRegistry`] is the single entry point for the embedding
//! security layer: it owns the ordered mechanism collection and the shared
//! configuration, and answers "which mechanism handles this request" by
//! explicit parameter, configured default, name or capability. The first
//! selection call drives [`InitGate`], which makes the setup pass race-free
//! under concurrent first use.

mod callback_url;
mod init;
#[allow(clippy::module_inception)]
mod registry;

pub use init::InitGate;
pub use registry::{DEFAULT_NAME_PARAMETER, MechanismRegistry};

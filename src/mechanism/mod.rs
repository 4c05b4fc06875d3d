//! Authentication mechanism contracts and the state the registry manages
//! inside them.
//!
//! Concrete mechanisms (OAuth, SAML, form login, bearer tokens, ...) live in
//! the embedding application; this module only defines what the registry
//! needs from them: a name, a capability tag, and — for redirect-based
//! mechanisms — the [`RedirectState`] the registry fills in during its
//! one-time initialization pass.

pub mod redirect;
pub mod traits;
pub mod types;

pub use redirect::RedirectState;
pub use traits::{AjaxResolver, AuthorizationGenerator, CallbackUrlResolver, Mechanism, WebContext};
pub use types::{
    Capability, DefaultAjaxResolver, DefaultCallbackUrlResolver, GeneratorChain, Provenance,
    ResolverSlot,
};

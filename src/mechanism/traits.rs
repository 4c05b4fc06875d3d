//! Contracts implemented by authentication mechanisms and their
//! collaborators.

use std::fmt;

use crate::mechanism::redirect::RedirectState;
use crate::mechanism::types::{Capability, GeneratorChain};

/// Read access to the incoming request, as seen by the registry.
///
/// The registry only ever reads a single named parameter; the embedding
/// security layer adapts its own request type behind this.
pub trait WebContext {
    /// Returns the value of a request parameter, or `None` when absent.
    fn request_parameter(&self, name: &str) -> Option<String>;
}

/// Decides whether a request is an AJAX call rather than a full-page
/// navigation.
///
/// The registry stores and distributes resolvers; invoking them is the
/// mechanisms' business.
pub trait AjaxResolver: Send + Sync + fmt::Debug {
    /// Whether `context` carries an AJAX request.
    fn is_ajax(&self, context: &dyn WebContext) -> bool;
}

/// Computes the callback URL a redirect-based mechanism actually sends to
/// the external identity step.
pub trait CallbackUrlResolver: Send + Sync + fmt::Debug {
    /// Derives the outgoing callback URL from the configured one.
    fn compute(&self, callback_url: &str, context: &dyn WebContext) -> String;
}

/// Post-authentication authorization hook.
///
/// Opaque to the registry: generators are stored in order and handed to
/// each mechanism once at initialization, never inspected or invoked here.
pub trait AuthorizationGenerator: Send + Sync + fmt::Debug {}

/// A single pluggable authentication mechanism.
///
/// Implementations are constructed and owned by the embedding layer. The
/// registry configures their redirect state and generator chain in place
/// during its one-time initialization and treats them as read-only
/// afterwards.
pub trait Mechanism: Send + Sync + fmt::Debug {
    /// The mechanism's name, unique within a registry when compared
    /// case-insensitively.
    fn name(&self) -> &str;

    /// Redirect-based mechanisms expose their callback state here;
    /// credential-presenting mechanisms return `None`.
    fn redirect(&self) -> Option<&RedirectState> {
        None
    }

    /// The ordered generator chain attached to this mechanism.
    fn authorization_generators(&self) -> &GeneratorChain;

    /// Which variant this mechanism is.
    ///
    /// Derived from [`redirect`](Self::redirect) presence, so the tag can
    /// never disagree with the callback state.
    fn capability(&self) -> Capability {
        if self.redirect().is_some() {
            Capability::Redirect
        } else {
            Capability::Direct
        }
    }
}

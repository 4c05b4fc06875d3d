//! Capability tags, resolver slots and generator chains.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::mechanism::traits::{
    AjaxResolver, AuthorizationGenerator, CallbackUrlResolver, WebContext,
};

/// Discriminates the two mechanism variants the registry manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Redirects the user agent to an external step and returns through a
    /// callback URL.
    Redirect,
    /// Validates credentials supplied directly in the request, with no
    /// redirect phase.
    Direct,
}

impl Capability {
    /// Stable lower-case label, used in error messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Redirect => "redirect",
            Self::Direct => "direct",
        }
    }

    /// Whether this is the redirect-based variant.
    #[must_use]
    pub const fn is_redirect(self) -> bool {
        matches!(self, Self::Redirect)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records whether a resolver slot still holds the library default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// The library-supplied default; the registry may replace it with a
    /// group-level resolver.
    BuiltIn,
    /// Caller-installed; the registry never overwrites it.
    Custom,
}

/// A resolver paired with its provenance tag.
///
/// The tag replaces an is-this-the-default-implementation identity check:
/// it is set at construction and flips to [`Provenance::Custom`] the moment
/// a caller installs a resolver of their own.
pub struct ResolverSlot<R: ?Sized> {
    resolver: Arc<R>,
    provenance: Provenance,
}

impl<R: ?Sized> ResolverSlot<R> {
    /// Wraps a library default resolver.
    #[must_use]
    pub const fn built_in(resolver: Arc<R>) -> Self {
        Self {
            resolver,
            provenance: Provenance::BuiltIn,
        }
    }

    /// Wraps a caller-chosen resolver.
    #[must_use]
    pub const fn custom(resolver: Arc<R>) -> Self {
        Self {
            resolver,
            provenance: Provenance::Custom,
        }
    }

    /// A shared handle to the resolver itself.
    #[must_use]
    pub fn resolver(&self) -> Arc<R> {
        Arc::clone(&self.resolver)
    }

    /// The slot's provenance tag.
    #[must_use]
    pub const fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Whether the slot still holds the library default and may be replaced
    /// by a group-level resolver.
    #[must_use]
    pub const fn is_built_in(&self) -> bool {
        matches!(self.provenance, Provenance::BuiltIn)
    }
}

impl<R: ?Sized> Clone for ResolverSlot<R> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            provenance: self.provenance,
        }
    }
}

impl<R: ?Sized + fmt::Debug> fmt::Debug for ResolverSlot<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverSlot")
            .field("resolver", &self.resolver)
            .field("provenance", &self.provenance)
            .finish()
    }
}

/// Library default ajax resolver: treats every request as a regular
/// browser navigation.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAjaxResolver;

impl AjaxResolver for DefaultAjaxResolver {
    fn is_ajax(&self, _context: &dyn WebContext) -> bool {
        false
    }
}

/// Library default callback URL resolver: passes the configured URL through
/// unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCallbackUrlResolver;

impl CallbackUrlResolver for DefaultCallbackUrlResolver {
    fn compute(&self, callback_url: &str, _context: &dyn WebContext) -> String {
        callback_url.to_string()
    }
}

/// Ordered, append-only list of authorization generators attached to a
/// mechanism.
///
/// Appends happen only during the registry's one-time initialization pass;
/// afterwards the chain is read-only.
#[derive(Debug, Default)]
pub struct GeneratorChain {
    generators: RwLock<Vec<Arc<dyn AuthorizationGenerator>>>,
}

impl GeneratorChain {
    /// An empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `generators` after whatever the chain already holds,
    /// preserving order.
    pub fn append(&self, generators: &[Arc<dyn AuthorizationGenerator>]) {
        self.generators
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(generators.iter().map(Arc::clone));
    }

    /// Clones the current generator list in order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<dyn AuthorizationGenerator>> {
        self.generators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of generators currently attached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.generators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no generator is attached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

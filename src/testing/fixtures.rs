//! Stub mechanisms, contexts and probes shared by unit and integration
//! tests.

use std::collections::HashMap;

use crate::mechanism::{
    AjaxResolver, AuthorizationGenerator, CallbackUrlResolver, GeneratorChain, Mechanism,
    RedirectState, WebContext,
};

/// Credential-presenting stub mechanism.
#[derive(Debug)]
pub struct DirectStub {
    name: String,
    generators: GeneratorChain,
}

impl DirectStub {
    /// A direct stub with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generators: GeneratorChain::new(),
        }
    }
}

impl Mechanism for DirectStub {
    fn name(&self) -> &str {
        &self.name
    }

    fn authorization_generators(&self) -> &GeneratorChain {
        &self.generators
    }
}

/// Redirect-based stub mechanism.
#[derive(Debug)]
pub struct RedirectStub {
    name: String,
    redirect: RedirectState,
    generators: GeneratorChain,
}

impl RedirectStub {
    /// A redirect stub with fresh callback state.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_redirect(name, RedirectState::new())
    }

    /// A redirect stub around pre-configured callback state.
    #[must_use]
    pub fn with_redirect(name: impl Into<String>, redirect: RedirectState) -> Self {
        Self {
            name: name.into(),
            redirect,
            generators: GeneratorChain::new(),
        }
    }
}

impl Mechanism for RedirectStub {
    fn name(&self) -> &str {
        &self.name
    }

    fn redirect(&self) -> Option<&RedirectState> {
        Some(&self.redirect)
    }

    fn authorization_generators(&self) -> &GeneratorChain {
        &self.generators
    }
}

/// Request context backed by a parameter map.
#[derive(Debug, Default)]
pub struct MapContext {
    parameters: HashMap<String, String>,
}

impl MapContext {
    /// A context with no parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one request parameter.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}

impl WebContext for MapContext {
    fn request_parameter(&self, name: &str) -> Option<String> {
        self.parameters.get(name).cloned()
    }
}

/// Inert generator carrying a label, for asserting propagation and order.
#[derive(Debug)]
pub struct LabelledGenerator(pub &'static str);

impl AuthorizationGenerator for LabelledGenerator {}

/// Ajax resolver with a fixed answer.
#[derive(Debug)]
pub struct FixedAjaxResolver(pub bool);

impl AjaxResolver for FixedAjaxResolver {
    fn is_ajax(&self, _context: &dyn WebContext) -> bool {
        self.0
    }
}

/// Callback URL resolver that prefixes the URL, making substitution
/// observable in assertions.
#[derive(Debug)]
pub struct PrefixingCallbackUrlResolver(pub &'static str);

impl CallbackUrlResolver for PrefixingCallbackUrlResolver {
    fn compute(&self, callback_url: &str, _context: &dyn WebContext) -> String {
        format!("{}{}", self.0, callback_url)
    }
}

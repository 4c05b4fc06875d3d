//! Shared fixtures for the integration tests.
//!
//! Each integration test binary compiles its own copy, so not every helper
//! is referenced everywhere.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use auth_registry::mechanism::{AuthorizationGenerator, GeneratorChain};
use auth_registry::{Mechanism, RedirectState, WebContext};

/// Minimal mechanism covering both variants, driven through the public API
/// only.
#[derive(Debug)]
pub struct StubMechanism {
    name: String,
    redirect: Option<RedirectState>,
    generators: GeneratorChain,
}

impl StubMechanism {
    pub fn direct(name: &str) -> Arc<dyn Mechanism> {
        Arc::new(Self {
            name: name.to_string(),
            redirect: None,
            generators: GeneratorChain::new(),
        })
    }

    pub fn redirect(name: &str) -> Arc<dyn Mechanism> {
        Self::redirect_with(name, RedirectState::new())
    }

    pub fn redirect_with(name: &str, state: RedirectState) -> Arc<dyn Mechanism> {
        Arc::new(Self {
            name: name.to_string(),
            redirect: Some(state),
            generators: GeneratorChain::new(),
        })
    }
}

impl Mechanism for StubMechanism {
    fn name(&self) -> &str {
        &self.name
    }

    fn redirect(&self) -> Option<&RedirectState> {
        self.redirect.as_ref()
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
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameter(mut self, name: &str, value: &str) -> Self {
        self.parameters.insert(name.to_string(), value.to_string());
        self
    }
}

impl WebContext for MapContext {
    fn request_parameter(&self, name: &str) -> Option<String> {
        self.parameters.get(name).cloned()
    }
}

/// Inert generator used to observe propagation.
#[derive(Debug)]
pub struct MarkerGenerator;

impl AuthorizationGenerator for MarkerGenerator {}

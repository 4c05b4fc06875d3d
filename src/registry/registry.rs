//! The mechanism registry: shared configuration, one-time initialization
//! and per-request mechanism selection.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{RegistryError, Result};
use crate::mechanism::{
    AjaxResolver, AuthorizationGenerator, CallbackUrlResolver, Capability, DefaultAjaxResolver,
    DefaultCallbackUrlResolver, Mechanism, ResolverSlot, WebContext,
};
use crate::registry::callback_url::assign_callback_url;
use crate::registry::init::InitGate;
use crate::utils::url;

/// Default name of the request parameter used to tell mechanisms apart.
pub const DEFAULT_NAME_PARAMETER: &str = "client_name";

/// Groups pluggable authentication mechanisms behind a single selection
/// point, generally sharing one callback endpoint.
///
/// Configure the registry fully before the first selection call: that call
/// (from whichever thread gets there first) runs a one-time initialization
/// pass which enforces name uniqueness, synthesizes callback URLs for
/// redirect-based mechanisms, applies group-level resolvers and distributes
/// authorization generators. After that pass the collection is effectively
/// frozen and selection is a lock-free read.
#[derive(Debug)]
pub struct MechanismRegistry {
    mechanisms: Vec<Arc<dyn Mechanism>>,
    callback_url: Option<String>,
    name_parameter: String,
    default_mechanism: Option<Arc<dyn Mechanism>>,
    ajax_resolver: ResolverSlot<dyn AjaxResolver>,
    callback_url_resolver: ResolverSlot<dyn CallbackUrlResolver>,
    authorization_generators: Vec<Arc<dyn AuthorizationGenerator>>,
    gate: InitGate,
}

impl MechanismRegistry {
    /// A registry over `mechanisms` with no group callback URL.
    #[must_use]
    pub fn new(mechanisms: Vec<Arc<dyn Mechanism>>) -> Self {
        Self {
            mechanisms,
            callback_url: None,
            name_parameter: DEFAULT_NAME_PARAMETER.to_string(),
            default_mechanism: None,
            ajax_resolver: ResolverSlot::built_in(Arc::new(DefaultAjaxResolver)),
            callback_url_resolver: ResolverSlot::built_in(Arc::new(DefaultCallbackUrlResolver)),
            authorization_generators: Vec::new(),
            gate: InitGate::new(),
        }
    }

    /// A registry whose redirect-based mechanisms share `callback_url`.
    #[must_use]
    pub fn with_callback_url(
        callback_url: impl Into<String>,
        mechanisms: Vec<Arc<dyn Mechanism>>,
    ) -> Self {
        let mut registry = Self::new(mechanisms);
        registry.callback_url = Some(callback_url.into());
        registry
    }

    /// Replaces the mechanism collection. Call before the first selection.
    pub fn set_mechanisms(&mut self, mechanisms: Vec<Arc<dyn Mechanism>>) {
        self.mechanisms = mechanisms;
    }

    /// Sets the group callback URL adopted by redirect-based mechanisms
    /// lacking their own.
    pub fn set_callback_url(&mut self, callback_url: impl Into<String>) {
        self.callback_url = Some(callback_url.into());
    }

    /// Renames the disambiguation request parameter (default
    /// [`DEFAULT_NAME_PARAMETER`]).
    pub fn set_name_parameter(&mut self, name_parameter: impl Into<String>) {
        self.name_parameter = name_parameter.into();
    }

    /// Sets the mechanism selected when the dispatch parameter is absent.
    pub fn set_default_mechanism(&mut self, mechanism: Arc<dyn Mechanism>) {
        self.default_mechanism = Some(mechanism);
    }

    /// Installs a group-level ajax resolver, applied at init to mechanisms
    /// that did not set a custom one.
    pub fn set_ajax_resolver(&mut self, resolver: Arc<dyn AjaxResolver>) {
        self.ajax_resolver = ResolverSlot::custom(resolver);
    }

    /// Installs a group-level callback URL resolver, applied at init to
    /// mechanisms that did not set a custom one.
    pub fn set_callback_url_resolver(&mut self, resolver: Arc<dyn CallbackUrlResolver>) {
        self.callback_url_resolver = ResolverSlot::custom(resolver);
    }

    /// Replaces the shared authorization generator list.
    pub fn set_authorization_generators(
        &mut self,
        generators: Vec<Arc<dyn AuthorizationGenerator>>,
    ) {
        self.authorization_generators = generators;
    }

    /// Appends one generator to the shared list.
    pub fn add_authorization_generator(&mut self, generator: Arc<dyn AuthorizationGenerator>) {
        self.authorization_generators.push(generator);
    }

    /// The configured mechanisms, as-is, without forcing initialization.
    #[must_use]
    pub fn mechanisms(&self) -> &[Arc<dyn Mechanism>] {
        &self.mechanisms
    }

    /// The group callback URL, if configured.
    #[must_use]
    pub fn callback_url(&self) -> Option<&str> {
        self.callback_url.as_deref()
    }

    /// The disambiguation parameter name.
    #[must_use]
    pub fn name_parameter(&self) -> &str {
        &self.name_parameter
    }

    /// The default mechanism, if configured.
    #[must_use]
    pub fn default_mechanism(&self) -> Option<&Arc<dyn Mechanism>> {
        self.default_mechanism.as_ref()
    }

    /// The group-level ajax resolver.
    #[must_use]
    pub fn ajax_resolver(&self) -> Arc<dyn AjaxResolver> {
        self.ajax_resolver.resolver()
    }

    /// The group-level callback URL resolver.
    #[must_use]
    pub fn callback_url_resolver(&self) -> Arc<dyn CallbackUrlResolver> {
        self.callback_url_resolver.resolver()
    }

    /// The shared authorization generator list.
    #[must_use]
    pub fn authorization_generators(&self) -> &[Arc<dyn AuthorizationGenerator>] {
        &self.authorization_generators
    }

    /// Selects the mechanism addressed by the request's disambiguation
    /// parameter.
    ///
    /// An absent parameter falls back to the default mechanism when one is
    /// configured, bypassing name lookup entirely. A present-but-blank
    /// value never falls back; it is rejected like a missing parameter.
    pub fn select_by_request(&self, context: &dyn WebContext) -> Result<Arc<dyn Mechanism>> {
        self.ensure_initialized()?;
        match context.request_parameter(&self.name_parameter) {
            None => {
                if let Some(default) = &self.default_mechanism {
                    tracing::debug!(
                        parameter = %self.name_parameter,
                        default = default.name(),
                        "dispatch parameter absent, using default mechanism"
                    );
                    return Ok(Arc::clone(default));
                }
                Err(RegistryError::MissingRequestParameter {
                    parameter: self.name_parameter.clone(),
                })
            }
            Some(name) if url::is_blank(&name) => Err(RegistryError::MissingRequestParameter {
                parameter: self.name_parameter.clone(),
            }),
            Some(name) => self.select_by_name(&name),
        }
    }

    /// Selects the first mechanism whose name matches, ignoring case and
    /// surrounding whitespace.
    pub fn select_by_name(&self, name: &str) -> Result<Arc<dyn Mechanism>> {
        self.ensure_initialized()?;
        self.mechanisms
            .iter()
            .find(|mechanism| url::eq_ignore_case_and_trim(name, mechanism.name()))
            .cloned()
            .ok_or_else(|| RegistryError::MechanismNotFoundByName {
                name: name.to_string(),
            })
    }

    /// Selects the first mechanism, in insertion order, with the requested
    /// capability.
    pub fn select_by_capability(&self, capability: Capability) -> Result<Arc<dyn Mechanism>> {
        self.ensure_initialized()?;
        self.mechanisms
            .iter()
            .find(|mechanism| mechanism.capability() == capability)
            .cloned()
            .ok_or(RegistryError::MechanismNotFoundByCapability { capability })
    }

    /// Every mechanism, in insertion order.
    pub fn select_all(&self) -> Result<&[Arc<dyn Mechanism>]> {
        self.ensure_initialized()?;
        Ok(&self.mechanisms)
    }

    fn ensure_initialized(&self) -> Result<()> {
        self.gate.ensure(|| self.initialize())
    }

    /// One-time setup: validates name uniqueness over the whole collection,
    /// then configures each mechanism (callback URL, resolvers, generator
    /// chain). No mechanism is mutated when validation fails.
    fn initialize(&self) -> Result<()> {
        tracing::debug!(
            mechanisms = self.mechanisms.len(),
            callback_url = self.callback_url.as_deref().unwrap_or(""),
            "initializing mechanism registry"
        );
        if self.mechanisms.is_empty() {
            return Err(RegistryError::NoMechanismsConfigured);
        }

        let mut names = HashSet::with_capacity(self.mechanisms.len());
        for mechanism in &self.mechanisms {
            if !names.insert(mechanism.name().to_lowercase()) {
                return Err(RegistryError::DuplicateMechanismName {
                    name: mechanism.name().to_string(),
                });
            }
        }

        let group_callback_url = self
            .callback_url
            .as_deref()
            .filter(|candidate| !url::is_blank(candidate));
        for mechanism in &self.mechanisms {
            if let Some(redirect) = mechanism.redirect() {
                if let Some(group_url) = group_callback_url {
                    assign_callback_url(redirect, group_url, &self.name_parameter, mechanism.name());
                }
                redirect.adopt_group_ajax_resolver(&self.ajax_resolver);
                redirect.adopt_group_callback_url_resolver(&self.callback_url_resolver);
            }
            if !self.authorization_generators.is_empty() {
                mechanism
                    .authorization_generators()
                    .append(&self.authorization_generators);
            }
        }
        tracing::debug!("mechanism registry initialized");
        Ok(())
    }
}

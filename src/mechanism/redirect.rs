//! Callback state embedded by redirect-based mechanisms.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::mechanism::traits::{AjaxResolver, CallbackUrlResolver};
use crate::mechanism::types::ResolverSlot;

/// Callback configuration for a redirect-based mechanism.
///
/// Concrete mechanisms embed one of these and return it from
/// [`Mechanism::redirect`](crate::mechanism::Mechanism::redirect). Fields
/// are interior-mutable because the registry fills them in during its
/// one-time initialization pass while holding only shared references; after
/// that pass the state is treated as read-only.
#[derive(Debug)]
pub struct RedirectState {
    callback_url: RwLock<Option<String>>,
    include_name_in_callback_url: bool,
    ajax_resolver: RwLock<Option<ResolverSlot<dyn AjaxResolver>>>,
    callback_url_resolver: RwLock<Option<ResolverSlot<dyn CallbackUrlResolver>>>,
}

impl Default for RedirectState {
    fn default() -> Self {
        Self::new()
    }
}

impl RedirectState {
    /// Fresh state: no callback URL, no resolvers, name disambiguation on.
    #[must_use]
    pub fn new() -> Self {
        Self {
            callback_url: RwLock::new(None),
            include_name_in_callback_url: true,
            ajax_resolver: RwLock::new(None),
            callback_url_resolver: RwLock::new(None),
        }
    }

    /// State pre-seeded with the mechanism's own callback URL, which takes
    /// precedence over the registry's group callback URL.
    #[must_use]
    pub fn with_callback_url(url: impl Into<String>) -> Self {
        let state = Self::new();
        state.set_callback_url(url);
        state
    }

    /// Opts the mechanism out of name disambiguation: the registry will not
    /// append the name parameter to its callback URL.
    #[must_use]
    pub fn without_name_in_callback_url(mut self) -> Self {
        self.include_name_in_callback_url = false;
        self
    }

    /// The current callback URL, if any.
    #[must_use]
    pub fn callback_url(&self) -> Option<String> {
        read(&self.callback_url).clone()
    }

    /// Replaces the callback URL.
    pub fn set_callback_url(&self, url: impl Into<String>) {
        *write(&self.callback_url) = Some(url.into());
    }

    /// Whether the registry may append the name parameter to the callback
    /// URL.
    #[must_use]
    pub const fn include_name_in_callback_url(&self) -> bool {
        self.include_name_in_callback_url
    }

    /// The currently installed ajax resolver, if any.
    #[must_use]
    pub fn ajax_resolver(&self) -> Option<Arc<dyn AjaxResolver>> {
        read(&self.ajax_resolver)
            .as_ref()
            .map(ResolverSlot::resolver)
    }

    /// Installs a caller-chosen ajax resolver; the registry will never
    /// replace it.
    pub fn set_ajax_resolver(&self, resolver: Arc<dyn AjaxResolver>) {
        *write(&self.ajax_resolver) = Some(ResolverSlot::custom(resolver));
    }

    /// The currently installed callback URL resolver, if any.
    #[must_use]
    pub fn callback_url_resolver(&self) -> Option<Arc<dyn CallbackUrlResolver>> {
        read(&self.callback_url_resolver)
            .as_ref()
            .map(ResolverSlot::resolver)
    }

    /// Installs a caller-chosen callback URL resolver; the registry will
    /// never replace it.
    pub fn set_callback_url_resolver(&self, resolver: Arc<dyn CallbackUrlResolver>) {
        *write(&self.callback_url_resolver) = Some(ResolverSlot::custom(resolver));
    }

    /// Group-level override: installs the registry's slot unless a custom
    /// resolver is already present. Slots still holding the library default
    /// are replaced, so per-mechanism customization always wins over group
    /// defaults.
    pub(crate) fn adopt_group_ajax_resolver(&self, slot: &ResolverSlot<dyn AjaxResolver>) {
        let mut current = write(&self.ajax_resolver);
        if current.as_ref().is_none_or(ResolverSlot::is_built_in) {
            *current = Some(slot.clone());
        }
    }

    /// Group-level override for the callback URL resolver; same replacement
    /// rule as [`adopt_group_ajax_resolver`](Self::adopt_group_ajax_resolver).
    pub(crate) fn adopt_group_callback_url_resolver(
        &self,
        slot: &ResolverSlot<dyn CallbackUrlResolver>,
    ) {
        let mut current = write(&self.callback_url_resolver);
        if current.as_ref().is_none_or(ResolverSlot::is_built_in) {
            *current = Some(slot.clone());
        }
    }

    /// Whether the ajax resolver slot may still be replaced by the group
    /// resolver.
    #[cfg(test)]
    fn ajax_slot_is_replaceable(&self) -> bool {
        read(&self.ajax_resolver)
            .as_ref()
            .is_none_or(ResolverSlot::is_built_in)
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mechanism::types::DefaultAjaxResolver;
    use crate::testing::FixedAjaxResolver;

    fn group_slot() -> ResolverSlot<dyn AjaxResolver> {
        ResolverSlot::custom(Arc::new(FixedAjaxResolver(true)))
    }

    #[test]
    fn empty_slot_adopts_the_group_resolver() {
        let state = RedirectState::new();
        assert!(state.ajax_resolver().is_none());

        state.adopt_group_ajax_resolver(&group_slot());
        assert!(state.ajax_resolver().is_some());
        assert!(!state.ajax_slot_is_replaceable());
    }

    #[test]
    fn built_in_slot_is_replaced_by_the_group_resolver() {
        let state = RedirectState::new();
        state.adopt_group_ajax_resolver(&ResolverSlot::built_in(Arc::new(DefaultAjaxResolver)));
        assert!(state.ajax_slot_is_replaceable());

        let group = group_slot();
        state.adopt_group_ajax_resolver(&group);
        let installed = state.ajax_resolver().expect("resolver installed");
        assert!(Arc::ptr_eq(&installed, &group.resolver()));
    }

    #[test]
    fn custom_slot_survives_the_group_resolver() {
        let state = RedirectState::new();
        let own: Arc<dyn AjaxResolver> = Arc::new(FixedAjaxResolver(false));
        state.set_ajax_resolver(Arc::clone(&own));

        state.adopt_group_ajax_resolver(&group_slot());
        let kept = state.ajax_resolver().expect("resolver installed");
        assert!(Arc::ptr_eq(&kept, &own));
    }

    #[test]
    fn callback_url_presets_win_over_later_defaults() {
        let state = RedirectState::with_callback_url("https://own.example/cb");
        assert_eq!(
            state.callback_url().as_deref(),
            Some("https://own.example/cb")
        );
    }

    #[test]
    fn name_inclusion_defaults_on_and_can_be_opted_out() {
        assert!(RedirectState::new().include_name_in_callback_url());
        assert!(
            !RedirectState::new()
                .without_name_in_callback_url()
                .include_name_in_callback_url()
        );
    }
}

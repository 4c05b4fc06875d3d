//! Callback URL synthesis for redirect-based mechanisms.

use crate::mechanism::RedirectState;
use crate::utils::url;

/// Computes a mechanism's effective callback URL.
///
/// A mechanism with no callback URL of its own adopts `group_url` verbatim.
/// Unless the mechanism opted out, `<name_parameter>=<name>` is then
/// appended when not already present, so many mechanisms can share one
/// physical callback endpoint while staying individually addressable.
/// Re-running on an already disambiguated URL changes nothing.
pub(crate) fn assign_callback_url(
    state: &RedirectState,
    group_url: &str,
    name_parameter: &str,
    mechanism_name: &str,
) {
    let effective = match state.callback_url() {
        Some(own) => own,
        None => {
            state.set_callback_url(group_url);
            group_url.to_string()
        }
    };

    // Plain substring check, not a parsed query: a key that is a suffix of
    // another parameter's name counts as already present.
    let marker = format!("{name_parameter}=");
    if state.include_name_in_callback_url() && !effective.contains(&marker) {
        let disambiguated = url::append_parameter(&effective, name_parameter, mechanism_name);
        tracing::debug!(
            mechanism = mechanism_name,
            callback_url = %disambiguated,
            "appended name parameter to callback url"
        );
        state.set_callback_url(disambiguated);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const GROUP: &str = "https://app.example/cb";
    const KEY: &str = "client_name";

    #[test]
    fn adopts_group_url_and_appends_the_name() {
        let state = RedirectState::new();
        assign_callback_url(&state, GROUP, KEY, "oidc");
        assert_eq!(
            state.callback_url().as_deref(),
            Some("https://app.example/cb?client_name=oidc")
        );
    }

    #[test]
    fn rerunning_is_idempotent() {
        let state = RedirectState::new();
        assign_callback_url(&state, GROUP, KEY, "oidc");
        let first = state.callback_url();

        assign_callback_url(&state, GROUP, KEY, "oidc");
        assert_eq!(state.callback_url(), first);
    }

    #[test]
    fn own_url_wins_over_the_group_url() {
        let state = RedirectState::with_callback_url("https://own.example/return");
        assign_callback_url(&state, GROUP, KEY, "saml");
        assert_eq!(
            state.callback_url().as_deref(),
            Some("https://own.example/return?client_name=saml")
        );
    }

    #[test]
    fn existing_query_string_extends_with_ampersand() {
        let state = RedirectState::with_callback_url("https://own.example/return?tenant=acme");
        assign_callback_url(&state, GROUP, KEY, "saml");
        assert_eq!(
            state.callback_url().as_deref(),
            Some("https://own.example/return?tenant=acme&client_name=saml")
        );
    }

    #[test]
    fn opted_out_mechanism_keeps_the_bare_url() {
        let state = RedirectState::new().without_name_in_callback_url();
        assign_callback_url(&state, GROUP, KEY, "oidc");
        assert_eq!(state.callback_url().as_deref(), Some(GROUP));
    }

    // The presence check is a substring scan, so a parameter whose name
    // merely ends with the key suppresses the append. Pinned on purpose.
    #[test]
    fn key_suffix_collision_suppresses_the_append() {
        let state =
            RedirectState::with_callback_url("https://own.example/cb?other_client_name=x");
        assign_callback_url(&state, GROUP, KEY, "oidc");
        assert_eq!(
            state.callback_url().as_deref(),
            Some("https://own.example/cb?other_client_name=x")
        );
    }

    #[test]
    fn name_value_is_percent_encoded() {
        let state = RedirectState::new();
        assign_callback_url(&state, GROUP, KEY, "my app");
        assert_eq!(
            state.callback_url().as_deref(),
            Some("https://app.example/cb?client_name=my%20app")
        );
    }
}

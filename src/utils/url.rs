//! URL query-string and string-matching helpers used by the registry.

/// Returns `true` when `value` is empty or whitespace-only.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Case-insensitive, whitespace-trimmed string equality.
///
/// Mechanism lookups match names with this, so `"OIDC"` and `" oidc "` both
/// address a mechanism registered as `"oidc"`.
#[must_use]
pub fn eq_ignore_case_and_trim(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}

/// Appends `name=value` to a URL's query string, percent-encoding the value.
///
/// Uses `?` when the URL has no query string yet and `&` otherwise. Always
/// appends; de-duplication is the caller's concern.
#[must_use]
pub fn append_parameter(url: &str, name: &str, value: &str) -> String {
    let encoded = urlencoding::encode(value);
    let separator = if url.contains('?') { '&' } else { '?' };
    let mut out = String::with_capacity(url.len() + name.len() + encoded.len() + 2);
    out.push_str(url);
    out.push(separator);
    out.push_str(name);
    out.push('=');
    out.push_str(&encoded);
    out
}

//! Site-name derivation for the hosting provider.
//!
//! Provider site names are DNS labels: lowercase ASCII letters, digits and
//! hyphens. Names are derived from the tenant identifier and, on collision,
//! extended with a numeric suffix.

/// Used when normalization leaves nothing behind (e.g. an all-emoji username).
pub const FALLBACK_NAME: &str = "site";

/// Normalize an arbitrary string into a provider-safe site name.
///
/// - lowercases
/// - replaces every character outside `[a-z0-9-]` with `-`
/// - collapses runs of `-` and trims them from both ends
/// - truncates to `max_len`
///
/// Applying it to its own output returns the same string.
///
/// ```text
/// normalize_site_name("Ada Lovelace!", 48)   → "ada-lovelace"
/// normalize_site_name("Café__Tacvba", 48)    → "caf-tacvba"
/// normalize_site_name("🎵🎵", 48)            → "site"
/// ```
pub fn normalize_site_name(raw: &str, max_len: usize) -> String {
    let replaced: String = raw
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();

    let mut name = replaced
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    // Output is pure ASCII, so byte truncation is safe
    if name.len() > max_len {
        name.truncate(max_len);
        while name.ends_with('-') {
            name.pop();
        }
    }

    if name.is_empty() {
        let mut fallback = FALLBACK_NAME.to_string();
        fallback.truncate(max_len.max(1));
        return fallback;
    }
    name
}

/// Base site name for a tenant: `{prefix}-{username}`, normalized.
pub fn base_site_name(prefix: &str, username: &str, max_len: usize) -> String {
    let joined = if prefix.trim().is_empty() {
        username.to_string()
    } else {
        format!("{}-{}", prefix, username)
    };
    normalize_site_name(&joined, max_len)
}

/// Candidate name for a given attempt; attempt 0 is the base itself.
///
/// The suffix goes on after truncation so distinct attempts never collapse
/// into the same name.
pub fn candidate_name(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, attempt)
    }
}

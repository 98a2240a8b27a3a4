//! Slugs
//!
//! URL-safe identifiers made of ASCII letters, digits, underscores and hyphens.

use validator::ValidationError;

/// Longest slug storage accepts.
pub const MAX_SLUG_LEN: usize = 50;

/// Derive a slug from a display name.
///
/// Lowercases, drops anything that is not an ASCII word character, whitespace or hyphen,
/// collapses whitespace and hyphen runs into a single hyphen and trims leading and
/// trailing hyphens and underscores. Returns an empty string when nothing survives.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }

            pending_separator = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_separator = true;
        }
    }

    let trimmed = slug.trim_matches(|c| c == '-' || c == '_');

    trimmed
        .char_indices()
        .nth(MAX_SLUG_LEN)
        .map_or(trimmed, |(end, _)| trimmed.get(..end).unwrap_or(trimmed))
        .trim_end_matches(['-', '_'])
        .to_string()
}

/// Whether `slug` is non-empty, short enough and made of slug characters only.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Field validator for slug inputs.
///
/// # Errors
///
/// Returns a `slug` validation error when [`is_valid_slug`] rejects the value.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if is_valid_slug(slug) {
        return Ok(());
    }

    let mut error = ValidationError::new("slug");

    error.message =
        Some("may contain only letters, digits, underscores or hyphens (max 50)".into());

    Err(error)
}

//! URL slug derivation.
//!
//! Both boundary sets and boundaries take their identifier from their display
//! name when the loader doesn't supply one. The transform is the usual
//! "slugify": fold to ASCII, drop punctuation, lowercase, hyphenate.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("static slug pattern"));

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("static slug pattern"));

static URL_SAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("static slug pattern"));

/// Derive a URL-safe slug from a human-readable name.
///
/// Accented characters are decomposed and reduced to their ASCII base,
/// anything that isn't a word character, whitespace or hyphen is removed,
/// and runs of whitespace/hyphens collapse into a single `-`. Leading and
/// trailing separators are stripped.
///
/// The result is deterministic and idempotent: `slugify(&slugify(x)) == slugify(x)`.
///
/// # Examples
///
/// ```rust
/// use boundaries_core::slugify;
///
/// assert_eq!(slugify("Community Areas"), "community-areas");
/// assert_eq!(slugify("Côte-des-Neiges–Notre-Dame-de-Grâce"), "cote-des-neigesnotre-dame-de-grace");
/// ```
pub fn slugify(name: &str) -> String {
    let ascii: String = name.nfkd().filter(char::is_ascii).collect();
    let lowered = ascii.to_lowercase();
    let cleaned = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = SEPARATORS.replace_all(&cleaned, "-");
    hyphenated.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Return `slug` if it is non-blank, otherwise derive one from `name`.
///
/// Used by the save paths of both entities: a supplied slug always wins and is
/// never rewritten.
pub fn slug_or_derive(slug: Option<&str>, name: &str) -> String {
    match slug.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => slugify(name),
    }
}

/// Whether `slug` can be used as a URL path segment without escaping.
///
/// Every slug produced by [`slugify`] passes; supplied slugs are checked
/// against the same alphabet.
pub fn is_url_safe(slug: &str) -> bool {
    URL_SAFE.is_match(slug)
}

//! Public Slug Generation
//!
//! A slug is the URL-safe public identifier of a list: the normalized title
//! followed by a random suffix. Slugs are never regenerated after creation.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

/// Length of the random suffix appended to every slug
pub const SLUG_SUFFIX_LEN: usize = 6;

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn separator_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"))
}

/// Deterministic part of a slug.
///
/// Lowercases, strips combining diacritics (U+0300..U+036F after NFD),
/// replaces runs of anything outside `[a-z0-9]` with `-` and trims edge hyphens.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped: String = lowered
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect();
    separator_runs()
        .replace_all(&stripped, "-")
        .trim_matches('-')
        .to_string()
}

/// Random `[0-9a-z]` suffix of `SLUG_SUFFIX_LEN` characters
pub fn random_suffix() -> String {
    Uuid::new_v4()
        .as_bytes()
        .iter()
        .take(SLUG_SUFFIX_LEN)
        .map(|b| SUFFIX_ALPHABET[(*b as usize) % SUFFIX_ALPHABET.len()] as char)
        .collect()
}

/// Full slug for a new list.
///
/// A title with no usable characters yields the bare suffix.
pub fn generate_slug(title: &str) -> String {
    let base = slugify(title);
    let suffix = random_suffix();
    if base.is_empty() {
        suffix
    } else {
        format!("{}-{}", base, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Baby Shower"), "baby-shower");
        assert_eq!(slugify("  Wedding -- 2025!! "), "wedding-2025");
    }

    #[test]
    fn test_slugify_strips_diacritics() {
        assert_eq!(slugify("Cumpleaños de María"), "cumpleanos-de-maria");
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
    }

    #[test]
    fn test_slugify_only_symbols() {
        assert_eq!(slugify("¡¿?!"), "");
    }

    #[test]
    fn test_generate_slug_shape() {
        let slug = generate_slug("Baby Shower");
        let (base, suffix) = slug.rsplit_once('-').unwrap();
        assert_eq!(base, "baby-shower");
        assert_eq!(suffix.len(), SLUG_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generate_slug_without_base() {
        let slug = generate_slug("***");
        assert_eq!(slug.len(), SLUG_SUFFIX_LEN);
        assert!(!slug.starts_with('-'));
    }

    #[test]
    fn test_identical_titles_get_distinct_slugs() {
        let slugs: std::collections::HashSet<String> =
            (0..50).map(|_| generate_slug("Baby Shower")).collect();
        assert_eq!(slugs.len(), 50);
    }
}

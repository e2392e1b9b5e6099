use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::SLUG_PATTERN;

static NON_SLUG_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid separator pattern"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("name cannot be empty")]
    EmptyName,
    #[error("name results in empty slug")]
    EmptySlug,
    #[error("invalid slug '{0}'")]
    Invalid(String),
}

/// Derive a storage key from a model name.
///
/// Lower-cases, collapses every run of characters outside `[a-z0-9]` into a
/// single hyphen, and trims hyphens from both ends.
pub fn slugify(name: &str) -> Result<String, SlugError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SlugError::EmptyName);
    }

    let lowered = name.to_lowercase();
    let slug = NON_SLUG_RUN.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        return Err(SlugError::EmptySlug);
    }
    if !SLUG_PATTERN.is_match(slug) {
        return Err(SlugError::Invalid(slug.to_string()));
    }

    Ok(slug.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphenates_words() {
        assert_eq!(slugify("Blog Post").unwrap(), "blog-post");
    }

    #[test]
    fn collapses_separator_runs_and_trims_edges() {
        assert_eq!(slugify("  --Hello,   World!!  ").unwrap(), "hello-world");
        assert_eq!(slugify("v2 / Release_Notes").unwrap(), "v2-release-notes");
    }

    #[test]
    fn rejects_blank_names() {
        assert_eq!(slugify("   "), Err(SlugError::EmptyName));
    }

    #[test]
    fn rejects_names_without_slug_characters() {
        assert_eq!(slugify("!!!"), Err(SlugError::EmptySlug));
    }
}

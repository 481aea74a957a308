//! URL-safe slugs.

use deunicode::deunicode;

/// Longest slug a post may carry.
pub const MAX_SLUG_LEN: usize = 250;

/// Turn free text into a lowercase, hyphen-separated ASCII slug.
///
/// Non-Latin scripts are transliterated first, so "Привет мир" becomes
/// `privet-mir`. Anything left that is not an ASCII letter, digit, `_` or
/// `-` is dropped; runs of whitespace and hyphens collapse into one hyphen.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
    }

    slug.trim_matches('_').to_string()
}

/// First of `base`, `base-1`, `base-2`, ... that `taken` does not claim.
pub fn unique_slug(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (1u32..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Whether `slug` is already in canonical slug form.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("Django  Tips -- for  Beginners"), "django-tips-for-beginners");
        assert_eq!(slugify("  Hello, World!  "), "hello-world");
        assert_eq!(slugify("Rust 2024: what's new?"), "rust-2024-whats-new");
    }

    #[test]
    fn test_slugify_transliterates() {
        assert_eq!(slugify("Привет мир"), "privet-mir");
        assert_eq!(slugify("Café au lait"), "cafe-au-lait");
        assert!(is_valid_slug(&slugify("Привет мир")));
    }

    #[test]
    fn test_slugify_of_symbols_is_empty() {
        assert_eq!(slugify("++"), "");
        assert_eq!(slugify(" - "), "");
    }

    #[test]
    fn test_unique_slug_appends_counter() {
        let taken = ["c", "c-1"];
        assert_eq!(unique_slug("rust", |s| taken.contains(&s)), "rust");
        assert_eq!(unique_slug("c", |s| taken.contains(&s)), "c-2");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("web-tips_2"));
        assert!(!is_valid_slug("Web Tips"));
        assert!(!is_valid_slug(""));
    }
}

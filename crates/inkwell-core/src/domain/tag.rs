use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::slug::slugify;

/// Slug given to tags whose name has nothing to transliterate.
pub const FALLBACK_TAG_SLUG: &str = "tag";

/// A topical label attached to posts.
///
/// A tag is identified by its name, compared case-insensitively with inner
/// whitespace collapsed. The slug is only the URL key: "C" and "C++" are
/// different tags even though both slugify to `c`, and the store gives the
/// second one a suffixed slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub slug: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        let name = normalize_name(&name.into());
        let slug = match slugify(&name) {
            slug if slug.is_empty() => FALLBACK_TAG_SLUG.to_string(),
            slug => slug,
        };
        Self { name, slug }
    }

    /// Identity key: the lowercased name.
    pub fn key(&self) -> String {
        tag_key(&self.name)
    }
}

/// Trim and collapse inner whitespace.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Identity key for a raw tag label.
pub fn tag_key(name: &str) -> String {
    normalize_name(name).to_lowercase()
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

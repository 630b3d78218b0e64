use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::slug::slug;

/// Normalized tag used for comparisons and URLs
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSlug(String);

impl TagSlug {
    /// Slugify a tag as written in a post's front matter.
    pub fn from_label(label: &str) -> Self {
        Self(slug(label))
    }

    /// Wrap a tag taken from a (decoded) route segment.
    ///
    /// Route tags are expected to be slugs already and are used as-is, so
    /// `/tags/Rust` does not match posts tagged `Rust`; only `/tags/rust`
    /// does.
    pub fn from_route(decoded: impl Into<String>) -> Self {
        Self(decoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TagSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TagSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//! Link templates and resolved links
//!
//! A `Link` is used both as a template stored in the relationship registry
//! and as a resolved instance attached to a resource. Resolution always works
//! on a clone, so a stored template is never modified.

use crate::links::resolver::TokenResolver;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attribute name used to flag a link as optional
pub const OPTIONAL: &str = "optional";

/// A relation from a resource to a URI
///
/// The `href` may contain `{token}` placeholders until it has been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The relation name (e.g., "self", "up", "ea:author")
    pub rel: String,

    /// The URI, possibly still templated
    pub href: String,

    /// Optional human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional media type hint for the target
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    /// Extensible named properties (the optional flag lives here)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
}

impl Link {
    /// Create a new link with the given relation name and href template
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            title: None,
            media_type: None,
            attributes: IndexMap::new(),
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the media type
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Set a named attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Mark the link as optional
    ///
    /// An optional link whose href still contains a placeholder after
    /// resolution is dropped instead of being rendered.
    pub fn with_optional(self) -> Self {
        self.with_attribute(OPTIONAL, "true")
    }

    /// Whether the named attribute is present
    pub fn has(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Get a named attribute
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the link carries the optional flag
    pub fn is_optional(&self) -> bool {
        self.has(OPTIONAL)
    }

    /// Whether the href still contains an unresolved `{token}`
    pub fn has_token(&self) -> bool {
        TokenResolver::has_token(&self.href)
    }
}

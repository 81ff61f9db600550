//! Namespace declarations advertised alongside links

use serde::{Deserialize, Serialize};

/// A named namespace for compact relation names (e.g., "ea:author")
///
/// The href usually contains a `{rel}` placeholder that is expanded by the
/// serializer, never by token resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    name: String,
    href: String,
}

impl Namespace {
    /// Create a new namespace
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
        }
    }

    /// The namespace prefix
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The href template
    pub fn href(&self) -> &str {
        &self.href
    }
}

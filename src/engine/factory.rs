//! Resource factory keyed by content type

use crate::core::{Representable, ResourceError};
use crate::resource::{Resource, ResourceFactoryStrategy};
use std::collections::HashMap;
use std::fmt;

/// Registry of resource factory strategies
///
/// Each content type maps to one strategy; registering a content type again
/// replaces the previous strategy.
#[derive(Default)]
pub struct ResourceFactory {
    strategies: HashMap<String, Box<dyn ResourceFactoryStrategy>>,
}

impl ResourceFactory {
    /// Create a new empty factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the strategy used for `content_type`
    pub fn add_factory_strategy(
        &mut self,
        strategy: impl ResourceFactoryStrategy + 'static,
        content_type: impl Into<String>,
    ) {
        let content_type = content_type.into();
        if self
            .strategies
            .insert(content_type.clone(), Box::new(strategy))
            .is_some()
        {
            tracing::debug!(content_type = %content_type, "Replaced resource factory strategy");
        } else {
            tracing::debug!(content_type = %content_type, "Registered resource factory strategy");
        }
    }

    /// Create an empty resource for `object` using the strategy for `content_type`
    pub fn create_resource(
        &self,
        object: Option<&dyn Representable>,
        content_type: &str,
    ) -> Result<Box<dyn Resource>, ResourceError> {
        let strategy = self.strategies.get(content_type).ok_or_else(|| {
            ResourceError::UnsupportedContentType {
                content_type: content_type.to_string(),
            }
        })?;

        strategy.create_resource(object)
    }

    /// Whether a strategy is registered for `content_type`
    pub fn supports(&self, content_type: &str) -> bool {
        self.strategies.contains_key(content_type)
    }

    /// Get all registered content types
    pub fn content_types(&self) -> Vec<&str> {
        self.strategies.keys().map(|s| s.as_str()).collect()
    }
}

impl fmt::Debug for ResourceFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceFactory")
            .field("content_types", &self.content_types())
            .finish()
    }
}

//! Fluent startup wiring for [`HyperExpress`]

use super::factory::ResourceFactory;
use super::host::HyperExpress;
use crate::config::RelationshipsConfig;
use crate::core::Result;
use crate::links::RelationshipDefinition;
use crate::resource::ResourceFactoryStrategy;
use std::any::Any;

/// Builder collecting relationships, configurations and strategies
///
/// # Example
///
/// ```
/// use hyperexpress::prelude::*;
///
/// struct Blog;
///
/// let yaml = r#"
/// types:
///   - type: Blog
///     collection_links:
///       - rel: self
///         href: /blogs
/// "#;
///
/// let express = HyperExpress::builder()
///     .register_type::<Blog>()
///     .with_config(RelationshipsConfig::from_yaml_str(yaml).unwrap())
///     .with_strategy("application/json", GenericResourceStrategy)
///     .build()
///     .unwrap();
///
/// assert_eq!(express.relationships().collection_link_templates::<Blog>().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct HyperExpressBuilder {
    relationships: RelationshipDefinition,
    resource_factory: ResourceFactory,
    configs: Vec<RelationshipsConfig>,
}

impl HyperExpressBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare relationships with the fluent registry API
    pub fn define(mut self, define: impl FnOnce(&mut RelationshipDefinition)) -> Self {
        define(&mut self.relationships);
        self
    }

    /// Make `T` addressable by name in configurations
    pub fn register_type<T: Any>(mut self) -> Self {
        self.relationships.register_type::<T>();
        self
    }

    /// Add a relationship configuration
    ///
    /// Configurations are merged in the order they were added and applied
    /// when the instance is built.
    pub fn with_config(mut self, config: RelationshipsConfig) -> Self {
        self.configs.push(config);
        self
    }

    /// Register the resource factory strategy for a content type
    pub fn with_strategy(
        mut self,
        content_type: impl Into<String>,
        strategy: impl ResourceFactoryStrategy + 'static,
    ) -> Self {
        self.resource_factory
            .add_factory_strategy(strategy, content_type);
        self
    }

    /// Build the instance
    ///
    /// Fails if a configuration names an unknown type or holds an invalid link.
    pub fn build(mut self) -> Result<HyperExpress> {
        if !self.configs.is_empty() {
            let merged = RelationshipsConfig::merge(std::mem::take(&mut self.configs));
            self.relationships.apply_config(&merged)?;
        }

        Ok(HyperExpress::from_parts(
            self.relationships,
            self.resource_factory,
        ))
    }
}

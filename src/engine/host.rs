//! The resource-building service
//!
//! `HyperExpress` owns the relationship registry and the resource factory. It
//! is configured once at startup, then shared (typically behind an `Arc`) by
//! request handlers. Per-request token state never lives here: every call
//! takes the `TokenResolver` of the current unit of work, or goes through a
//! [`RequestScope`].

use super::builder::HyperExpressBuilder;
use super::factory::ResourceFactory;
use super::scope::RequestScope;
use crate::core::{Link, Namespace, Pluralizer, Representable, Result, TypeKey};
use crate::links::{RelationshipDefinition, TokenResolver};
use crate::resource::{Resource, ResourceFactoryStrategy};
use indexmap::IndexMap;
use std::any::Any;

/// Builds hypermedia resources from domain objects
///
/// # Example
///
/// ```
/// use hyperexpress::prelude::*;
///
/// #[derive(Serialize)]
/// struct Blog {
///     id: u64,
/// }
///
/// impl_representable!(Blog);
///
/// let mut express = HyperExpress::new();
/// express.register_resource_factory_strategy(GenericResourceStrategy, "application/json");
/// express
///     .define_relationships()
///     .for_type::<Blog>()
///     .rel(rel_types::SELF, "/blogs/{blogId}");
///
/// let mut resolver = TokenResolver::new();
/// resolver.bind_token("blogId", "7");
///
/// let resource = express
///     .create_resource(&Blog { id: 7 }, "application/json", &resolver)
///     .unwrap();
/// assert_eq!(resource.links()[0].href, "/blogs/7");
/// ```
#[derive(Debug, Default)]
pub struct HyperExpress {
    relationships: RelationshipDefinition,
    resource_factory: ResourceFactory,
}

impl HyperExpress {
    /// Create an unconfigured instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building an instance fluently
    pub fn builder() -> HyperExpressBuilder {
        HyperExpressBuilder::new()
    }

    pub(crate) fn from_parts(
        relationships: RelationshipDefinition,
        resource_factory: ResourceFactory,
    ) -> Self {
        Self {
            relationships,
            resource_factory,
        }
    }

    /// Mutable access to the relationship registry, for startup configuration
    pub fn define_relationships(&mut self) -> &mut RelationshipDefinition {
        &mut self.relationships
    }

    /// The relationship registry
    pub fn relationships(&self) -> &RelationshipDefinition {
        &self.relationships
    }

    /// Associate a content type with a resource factory strategy
    pub fn register_resource_factory_strategy(
        &mut self,
        strategy: impl ResourceFactoryStrategy + 'static,
        content_type: impl Into<String>,
    ) {
        self.resource_factory.add_factory_strategy(strategy, content_type);
    }

    /// Open a scope for one unit of work
    ///
    /// Token bindings made through the scope are discarded when it is dropped.
    pub fn scope(&self) -> RequestScope<'_> {
        RequestScope::new(self)
    }

    /// Build the resource for a single object
    ///
    /// Links come from the templates registered for the object's runtime type.
    /// An optional link whose href keeps an unresolved token is dropped; any
    /// other link is kept, unresolved tokens included.
    pub fn create_resource(
        &self,
        object: &dyn Representable,
        content_type: &str,
        resolver: &TokenResolver,
    ) -> Result<Box<dyn Resource>> {
        let mut resource = self
            .resource_factory
            .create_resource(Some(object), content_type)?;

        let templates = self.relationships.link_templates_for(object.type_key());
        resource.add_links(resolve_links(templates, Some(object.as_any()), resolver));
        resource.add_namespaces(self.namespaces());

        Ok(resource)
    }

    /// Build a collection resource whose components are all of type `T`
    ///
    /// `Box<T>` and `Arc<T>` components count as `T`.
    pub fn create_collection_resource<T: Representable>(
        &self,
        components: &[T],
        content_type: &str,
        resolver: &TokenResolver,
    ) -> Result<Box<dyn Resource>> {
        self.create_collection_resource_of(
            components.iter().map(|c| c as &dyn Representable),
            T::domain_type(),
            content_type,
            resolver,
        )
    }

    /// Build a collection resource for components of `component_type`
    ///
    /// The root carries the collection templates of the component type,
    /// resolved without a source object. Components are embedded in input
    /// order under the pluralized, lower-cased type name; an empty input still
    /// produces that relation with an empty list.
    pub fn create_collection_resource_of<'a>(
        &self,
        components: impl IntoIterator<Item = &'a dyn Representable>,
        component_type: TypeKey,
        content_type: &str,
        resolver: &TokenResolver,
    ) -> Result<Box<dyn Resource>> {
        let mut root = self.resource_factory.create_resource(None, content_type)?;

        let templates = self
            .relationships
            .collection_link_templates_for(component_type);
        root.add_links(resolve_links(templates, None, resolver));
        root.add_namespaces(self.namespaces());

        let child_rel = Self::collection_rel(component_type);
        let mut is_empty = true;

        for component in components {
            let child = self.create_resource(component, content_type, resolver)?;
            root.add_resource(&child_rel, child);
            is_empty = false;
        }

        if is_empty {
            root.add_resources(&child_rel, Vec::new());
        }

        Ok(root)
    }

    /// Relation name used to embed components of `component_type`
    ///
    /// `Entry` → `entries`
    pub fn collection_rel(component_type: TypeKey) -> String {
        Pluralizer::pluralize(&component_type.simple_name().to_lowercase())
    }

    fn namespaces(&self) -> Vec<Namespace> {
        self.relationships.namespaces().values().cloned().collect()
    }
}

/// Resolve a template set for one object
///
/// Token values are computed once and shared by every template. Templates are
/// cloned, never modified.
fn resolve_links(
    templates: &IndexMap<String, Link>,
    object: Option<&dyn Any>,
    resolver: &TokenResolver,
) -> Vec<Link> {
    if templates.is_empty() {
        return Vec::new();
    }

    let tokens = resolver.tokens_for(object);
    let mut links = Vec::with_capacity(templates.len());

    for template in templates.values() {
        let mut link = template.clone();
        link.href = TokenResolver::substitute(&template.href, &tokens);

        if link.is_optional() && link.has_token() {
            tracing::debug!(
                rel = %link.rel,
                href = %link.href,
                "Dropping optional link with unresolved token"
            );
            continue;
        }

        links.push(link);
    }

    links
}

//! Relationship registry
//!
//! Stores, per domain type, the ordered link templates for the type as a
//! single resource and as the component of a collection, along with the
//! namespaces advertised on every resource.

use crate::config::RelationshipsConfig;
use crate::core::link::OPTIONAL;
use crate::core::{ConfigError, Link, Namespace, TypeKey};
use indexmap::IndexMap;
use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static NO_TEMPLATES: LazyLock<IndexMap<String, Link>> = LazyLock::new(IndexMap::new);

/// Which template set of a type a registration targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateView {
    /// Links of a single resource of the type
    Single,
    /// Links of a collection whose components are of the type
    Collection,
}

/// Registry of link templates and namespaces
///
/// Populated during startup, then only read. Template order follows
/// registration order and becomes the link output order. Registering the same
/// relation twice for a type and view replaces the template in place.
///
/// # Example
///
/// ```
/// use hyperexpress::core::rel_types::{SELF, UP};
/// use hyperexpress::core::Namespace;
/// use hyperexpress::links::RelationshipDefinition;
///
/// struct Blog;
/// struct Entry;
///
/// let mut definition = RelationshipDefinition::new();
/// definition
///     .add_namespaces([Namespace::new("blog", "http://namespaces.example.com/{rel}")])
///     .for_collection_of::<Entry>()
///     .rel(SELF, "/blogs/{blogId}/entries")
///     .rel(UP, "/blogs/{blogId}")
///     .for_type::<Entry>()
///     .rel(SELF, "/blogs/{blogId}/entries/{entryId}")
///     .rel("blog:comments", "/blogs/{blogId}/entries/{entryId}/comments")
///     .title("Comments on this entry");
///
/// assert_eq!(definition.link_templates::<Entry>().len(), 2);
/// assert_eq!(definition.collection_link_templates::<Entry>().len(), 2);
/// assert!(definition.link_templates::<Blog>().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct RelationshipDefinition {
    single_templates: HashMap<TypeId, IndexMap<String, Link>>,
    collection_templates: HashMap<TypeId, IndexMap<String, Link>>,
    namespaces: IndexMap<String, Namespace>,
    /// Maps simple type names to keys, for configuration lookup
    known_types: HashMap<&'static str, TypeKey>,
    /// Simple names shared by more than one registered type
    ambiguous_types: HashSet<&'static str>,
}

impl RelationshipDefinition {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register namespaces; a namespace with an existing name replaces it
    pub fn add_namespaces(&mut self, namespaces: impl IntoIterator<Item = Namespace>) -> &mut Self {
        for namespace in namespaces {
            self.namespaces
                .insert(namespace.name().to_string(), namespace);
        }
        self
    }

    /// Start configuring the single-resource links of `T`
    pub fn for_type<T: Any>(&mut self) -> RelationshipBuilder<'_> {
        RelationshipBuilder::new(self, TemplateView::Single, TypeKey::of::<T>())
    }

    /// Start configuring the collection links of collections of `T`
    pub fn for_collection_of<T: Any>(&mut self) -> RelationshipBuilder<'_> {
        RelationshipBuilder::new(self, TemplateView::Collection, TypeKey::of::<T>())
    }

    /// Make `T` addressable by its simple name in configuration files
    pub fn register_type<T: Any>(&mut self) -> &mut Self {
        self.remember(TypeKey::of::<T>());
        self
    }

    /// Look up a registered type by its simple name
    ///
    /// Returns `None` when the name is unknown or shared by several types.
    pub fn type_named(&self, name: &str) -> Option<TypeKey> {
        if self.ambiguous_types.contains(name) {
            return None;
        }
        self.known_types.get(name).copied()
    }

    /// Add a template to a view of a type, replacing any template with the same rel
    pub fn add_template(&mut self, view: TemplateView, type_key: TypeKey, link: Link) {
        self.remember(type_key);

        let templates = match view {
            TemplateView::Single => &mut self.single_templates,
            TemplateView::Collection => &mut self.collection_templates,
        };

        let rel = link.rel.clone();
        if let Some(previous) = templates
            .entry(type_key.id())
            .or_default()
            .insert(rel.clone(), link)
        {
            tracing::debug!(
                type_name = %type_key,
                rel = %rel,
                previous_href = %previous.href,
                "Replaced link template"
            );
        }
    }

    /// Single-resource templates of `T` (empty if none were registered)
    pub fn link_templates<T: Any>(&self) -> &IndexMap<String, Link> {
        self.link_templates_for(TypeKey::of::<T>())
    }

    /// Single-resource templates of the given type (empty if none were registered)
    pub fn link_templates_for(&self, type_key: TypeKey) -> &IndexMap<String, Link> {
        self.single_templates
            .get(&type_key.id())
            .unwrap_or(&NO_TEMPLATES)
    }

    /// Collection templates for collections of `T` (empty if none were registered)
    pub fn collection_link_templates<T: Any>(&self) -> &IndexMap<String, Link> {
        self.collection_link_templates_for(TypeKey::of::<T>())
    }

    /// Collection templates for collections of the given type
    pub fn collection_link_templates_for(&self, type_key: TypeKey) -> &IndexMap<String, Link> {
        self.collection_templates
            .get(&type_key.id())
            .unwrap_or(&NO_TEMPLATES)
    }

    /// All declared namespaces, in declaration order
    pub fn namespaces(&self) -> &IndexMap<String, Namespace> {
        &self.namespaces
    }

    /// Apply a loaded configuration
    ///
    /// Every type section must name a type made known through
    /// [`register_type`](Self::register_type), [`for_type`](Self::for_type) or
    /// [`for_collection_of`](Self::for_collection_of).
    pub fn apply_config(&mut self, config: &RelationshipsConfig) -> Result<(), ConfigError> {
        // Validate everything first so a bad config leaves the registry untouched
        let mut pending = Vec::new();
        for section in &config.types {
            if self.ambiguous_types.contains(section.type_name.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "type".to_string(),
                    value: section.type_name.clone(),
                    message: "name is shared by several registered types".to_string(),
                });
            }

            let type_key = self
                .type_named(&section.type_name)
                .ok_or_else(|| ConfigError::UnknownType {
                    type_name: section.type_name.clone(),
                })?;

            for link in &section.links {
                pending.push((TemplateView::Single, type_key, link.to_link()?));
            }
            for link in &section.collection_links {
                pending.push((TemplateView::Collection, type_key, link.to_link()?));
            }
        }

        self.add_namespaces(config.namespaces.iter().map(|ns| ns.to_namespace()));
        for (view, type_key, link) in pending {
            self.add_template(view, type_key, link);
        }

        Ok(())
    }

    /// Remove all templates, namespaces and known types
    pub fn clear(&mut self) {
        self.single_templates.clear();
        self.collection_templates.clear();
        self.namespaces.clear();
        self.known_types.clear();
        self.ambiguous_types.clear();
    }

    fn remember(&mut self, type_key: TypeKey) {
        let name = type_key.simple_name();
        match self.known_types.get(name) {
            Some(known) if *known != type_key => {
                if self.ambiguous_types.insert(name) {
                    tracing::warn!(
                        type_name = name,
                        "Distinct types share a simple name, configuration cannot refer to it"
                    );
                }
            }
            Some(_) => {}
            None => {
                self.known_types.insert(name, type_key);
            }
        }
    }

    fn template_mut(
        &mut self,
        view: TemplateView,
        type_key: TypeKey,
        rel: &str,
    ) -> Option<&mut Link> {
        let templates = match view {
            TemplateView::Single => &mut self.single_templates,
            TemplateView::Collection => &mut self.collection_templates,
        };
        templates.get_mut(&type_key.id())?.get_mut(rel)
    }
}

/// Fluent configuration scoped to one type and view
///
/// `rel` adds a template; `title`, `media_type`, `optional` and `attribute`
/// decorate the most recently added one.
pub struct RelationshipBuilder<'a> {
    definition: &'a mut RelationshipDefinition,
    view: TemplateView,
    type_key: TypeKey,
    current_rel: Option<String>,
}

impl<'a> RelationshipBuilder<'a> {
    fn new(
        definition: &'a mut RelationshipDefinition,
        view: TemplateView,
        type_key: TypeKey,
    ) -> Self {
        definition.remember(type_key);
        Self {
            definition,
            view,
            type_key,
            current_rel: None,
        }
    }

    /// Add a relation with its href template
    pub fn rel(mut self, name: impl Into<String>, href: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            tracing::warn!(type_name = %self.type_key, "Ignoring relation with an empty name");
            self.current_rel = None;
            return self;
        }

        self.definition
            .add_template(self.view, self.type_key, Link::new(name.clone(), href));
        self.current_rel = Some(name);
        self
    }

    /// Set the title of the current relation
    pub fn title(self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.decorate("title", |link| link.title = Some(title))
    }

    /// Set the media type of the current relation
    pub fn media_type(self, media_type: impl Into<String>) -> Self {
        let media_type = media_type.into();
        self.decorate("type", |link| link.media_type = Some(media_type))
    }

    /// Mark the current relation as optional
    pub fn optional(self) -> Self {
        self.decorate(OPTIONAL, |link| {
            link.attributes
                .insert(OPTIONAL.to_string(), "true".to_string());
        })
    }

    /// Set a named attribute on the current relation
    pub fn attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        let label = name.clone();
        self.decorate(&label, |link| {
            link.attributes.insert(name, value);
        })
    }

    /// Switch to the single-resource links of another type
    pub fn for_type<T: Any>(self) -> Self {
        Self::new(self.definition, TemplateView::Single, TypeKey::of::<T>())
    }

    /// Switch to the collection links of another type
    pub fn for_collection_of<T: Any>(self) -> Self {
        Self::new(self.definition, TemplateView::Collection, TypeKey::of::<T>())
    }

    /// Register namespaces without leaving the chain
    pub fn add_namespaces(self, namespaces: impl IntoIterator<Item = Namespace>) -> Self {
        self.definition.add_namespaces(namespaces);
        self
    }

    fn decorate(self, what: &str, apply: impl FnOnce(&mut Link)) -> Self {
        let target = self
            .current_rel
            .as_deref()
            .and_then(|rel| self.definition.template_mut(self.view, self.type_key, rel));

        match target {
            Some(link) => apply(link),
            None => tracing::warn!(
                type_name = %self.type_key,
                decorator = what,
                "No relation in progress to decorate"
            ),
        }
        self
    }
}

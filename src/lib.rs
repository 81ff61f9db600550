//! # HyperExpress
//!
//! Hypermedia links for domain objects: declare URI templates per type once at
//! startup, then resolve them per request into concrete links on a resource.
//!
//! ## Features
//!
//! - **Template Registry**: Ordered link templates per type, for single resources and collections
//! - **Token Resolution**: `{token}` placeholders filled from explicit bindings or computed binders
//! - **Optional Links**: Links whose tokens cannot be resolved are silently dropped
//! - **Auto-Pluralization**: Collection components embedded under plural names (Entry → entries)
//! - **Configuration-Based**: Declare relationships fluently or via YAML configuration
//! - **Pluggable Resources**: Content-type keyed strategies produce the resource representation
//!
//! ## Quick Start
//!
//! ```rust
//! use hyperexpress::prelude::*;
//! use std::collections::HashMap;
//!
//! #[derive(Serialize)]
//! struct Entry {
//!     blog_id: u64,
//!     id: u64,
//! }
//!
//! impl_representable!(Entry);
//!
//! let express = HyperExpress::builder()
//!     .define(|def| {
//!         def.add_namespaces([Namespace::new("blog", "http://namespaces.example.com/{rel}")])
//!             .for_collection_of::<Entry>()
//!             .rel(rel_types::SELF, "/blogs/{blogId}/entries")
//!             .for_type::<Entry>()
//!             .rel(rel_types::SELF, "/blogs/{blogId}/entries/{entryId}")
//!             .rel("blog:author", "/users/{userId}")
//!             .optional();
//!     })
//!     .with_strategy("application/json", GenericResourceStrategy)
//!     .build()?;
//!
//! // Per request
//! let mut scope = express.scope();
//! scope.bind_token("blogId", "5");
//! scope.collection_token_binder(TypedBinder::new(|entry: &Entry| {
//!     HashMap::from([("entryId".to_string(), entry.id.to_string())])
//! }));
//!
//! let entries = vec![Entry { blog_id: 5, id: 1 }, Entry { blog_id: 5, id: 2 }];
//! let collection = scope.create_collection_resource(&entries, "application/json")?;
//!
//! assert_eq!(collection.links()[0].href, "/blogs/5/entries");
//! assert_eq!(collection.resources("entries").map(|r| r.len()), Some(2));
//! # Ok::<(), hyperexpress::core::HyperError>(())
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod links;
pub mod resource;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        ConfigError, HyperError, Link, Namespace, Pluralizer, Representable, ResourceError,
        TypeKey, rel_types,
    };

    // === Links ===
    pub use crate::links::{
        RelationshipBuilder, RelationshipDefinition, TemplateView, TokenBinder, TokenResolver,
        TypedBinder,
    };

    // === Resources ===
    pub use crate::resource::{
        GenericResource, GenericResourceStrategy, Resource, ResourceFactoryStrategy,
    };

    // === Engine ===
    pub use crate::engine::{HyperExpress, HyperExpressBuilder, RequestScope, ResourceFactory};

    // === Config ===
    pub use crate::config::{LinkConfig, NamespaceConfig, RelationshipsConfig, TypeRelationsConfig};

    // === Macros ===
    pub use crate::impl_representable;

    // === External dependencies ===
    pub use serde::Serialize;
}

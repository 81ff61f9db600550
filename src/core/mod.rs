//! Core module containing the value types shared by the registry and the engine

pub mod error;
pub mod link;
pub mod namespace;
pub mod pluralize;
pub mod rel_types;
pub mod representable;

pub use error::{ConfigError, HyperError, ResourceError, Result};
pub use link::Link;
pub use namespace::Namespace;
pub use pluralize::Pluralizer;
pub use representable::{Representable, TypeKey};

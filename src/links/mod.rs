//! Link template registry and token resolution
//!
//! This module holds the relationship registry populated at startup and the
//! per-request token resolver used to turn templates into concrete links.

pub mod registry;
pub mod resolver;

pub use registry::{RelationshipBuilder, RelationshipDefinition, TemplateView};
pub use resolver::{TokenBinder, TokenResolver, TypedBinder};

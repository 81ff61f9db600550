//! Resource contracts
//!
//! A `Resource` is the sink the engine writes resolved links, namespaces and
//! embedded child resources into. Rendering a resource as a concrete media
//! type is the job of whoever implements these traits.

pub mod generic;

use crate::core::{Link, Namespace, Representable, ResourceError};
use std::fmt;

pub use generic::{GenericResource, GenericResourceStrategy};

/// A hypermedia resource under construction
pub trait Resource: fmt::Debug + Send + Sync {
    /// Append resolved links, keeping their order
    fn add_links(&mut self, links: Vec<Link>);

    /// Append namespace declarations
    fn add_namespaces(&mut self, namespaces: Vec<Namespace>);

    /// Embed a child resource under a relation name
    fn add_resource(&mut self, rel: &str, resource: Box<dyn Resource>);

    /// Embed a list of child resources under a relation name
    ///
    /// An empty list must still create the relation.
    fn add_resources(&mut self, rel: &str, resources: Vec<Box<dyn Resource>>);

    /// Links attached so far
    fn links(&self) -> &[Link];

    /// Namespaces attached so far
    fn namespaces(&self) -> &[Namespace];

    /// Child resources embedded under `rel`, if the relation exists
    fn resources(&self, rel: &str) -> Option<&[Box<dyn Resource>]>;

    /// Generic JSON view of the resource
    fn to_json(&self) -> serde_json::Value;
}

/// Turns a domain object into an empty resource for one content type
///
/// Called with `None` for the root of a collection, which has no backing
/// object.
pub trait ResourceFactoryStrategy: Send + Sync {
    fn create_resource(
        &self,
        object: Option<&dyn Representable>,
    ) -> Result<Box<dyn Resource>, ResourceError>;
}

impl<F> ResourceFactoryStrategy for F
where
    F: Fn(Option<&dyn Representable>) -> Result<Box<dyn Resource>, ResourceError> + Send + Sync,
{
    fn create_resource(
        &self,
        object: Option<&dyn Representable>,
    ) -> Result<Box<dyn Resource>, ResourceError> {
        self(object)
    }
}

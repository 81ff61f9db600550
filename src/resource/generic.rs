//! Default in-memory resource representation
//!
//! Useful for testing and for serializers that work from a generic JSON view
//! rather than their own resource type.

use super::{Resource, ResourceFactoryStrategy};
use crate::core::{Link, Namespace, Representable, ResourceError};
use indexmap::IndexMap;
use serde_json::json;

/// A resource holding the object's properties as JSON
#[derive(Debug, Default)]
pub struct GenericResource {
    properties: Option<serde_json::Value>,
    links: Vec<Link>,
    namespaces: Vec<Namespace>,
    embedded: IndexMap<String, Vec<Box<dyn Resource>>>,
}

impl GenericResource {
    /// A resource without a backing object
    pub fn new() -> Self {
        Self::default()
    }

    /// A resource with the given properties
    pub fn with_properties(properties: serde_json::Value) -> Self {
        Self {
            properties: Some(properties),
            ..Self::default()
        }
    }

    /// Properties of the backing object, if any
    pub fn properties(&self) -> Option<&serde_json::Value> {
        self.properties.as_ref()
    }

    /// Names of the embedded relations, in insertion order
    pub fn embedded_rels(&self) -> impl Iterator<Item = &str> {
        self.embedded.keys().map(String::as_str)
    }
}

impl Resource for GenericResource {
    fn add_links(&mut self, links: Vec<Link>) {
        self.links.extend(links);
    }

    fn add_namespaces(&mut self, namespaces: Vec<Namespace>) {
        self.namespaces.extend(namespaces);
    }

    fn add_resource(&mut self, rel: &str, resource: Box<dyn Resource>) {
        self.embedded.entry(rel.to_string()).or_default().push(resource);
    }

    fn add_resources(&mut self, rel: &str, resources: Vec<Box<dyn Resource>>) {
        self.embedded.entry(rel.to_string()).or_default().extend(resources);
    }

    fn links(&self) -> &[Link] {
        &self.links
    }

    fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    fn resources(&self, rel: &str) -> Option<&[Box<dyn Resource>]> {
        self.embedded.get(rel).map(Vec::as_slice)
    }

    fn to_json(&self) -> serde_json::Value {
        let embedded: serde_json::Map<String, serde_json::Value> = self
            .embedded
            .iter()
            .map(|(rel, children)| {
                let children = children.iter().map(|child| child.to_json()).collect();
                (rel.clone(), serde_json::Value::Array(children))
            })
            .collect();

        json!({
            "properties": self.properties,
            "links": self.links,
            "namespaces": self.namespaces,
            "embedded": embedded,
        })
    }
}

/// Factory strategy producing [`GenericResource`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericResourceStrategy;

impl ResourceFactoryStrategy for GenericResourceStrategy {
    fn create_resource(
        &self,
        object: Option<&dyn Representable>,
    ) -> Result<Box<dyn Resource>, ResourceError> {
        let Some(object) = object else {
            return Ok(Box::new(GenericResource::new()));
        };

        let properties = object
            .to_properties()
            .map_err(|source| ResourceError::Conversion {
                type_name: object.type_key().to_string(),
                source,
            })?;

        Ok(Box::new(GenericResource::with_properties(properties)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde::ser::Error as _;

    #[derive(Serialize)]
    struct Blog {
        id: u32,
        name: String,
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("not today"))
        }
    }

    crate::impl_representable!(Blog, Unserializable);

    #[test]
    fn test_strategy_without_object() {
        let resource = GenericResourceStrategy.create_resource(None).unwrap();

        assert!(resource.links().is_empty());
        assert_eq!(resource.to_json()["properties"], serde_json::Value::Null);
    }

    #[test]
    fn test_strategy_copies_properties() {
        let blog = Blog {
            id: 1,
            name: "Rust notes".to_string(),
        };
        let resource = GenericResourceStrategy.create_resource(Some(&blog)).unwrap();

        assert_eq!(
            resource.to_json()["properties"],
            json!({ "id": 1, "name": "Rust notes" })
        );
    }

    #[test]
    fn test_strategy_reports_conversion_failure() {
        let err = GenericResourceStrategy
            .create_resource(Some(&Unserializable))
            .unwrap_err();

        assert!(matches!(
            err,
            ResourceError::Conversion { ref type_name, .. } if type_name == "Unserializable"
        ));
    }

    #[test]
    fn test_empty_resources_create_the_relation() {
        let mut resource = GenericResource::new();
        resource.add_resources("entries", Vec::new());

        assert_eq!(resource.resources("entries").map(<[_]>::len), Some(0));
        assert!(resource.resources("comments").is_none());
        assert_eq!(resource.to_json()["embedded"], json!({ "entries": [] }));
    }

    #[test]
    fn test_children_keep_order() {
        let mut root = GenericResource::new();
        root.add_resource("blogs", Box::new(GenericResource::with_properties(json!({ "id": 1 }))));
        root.add_resource("blogs", Box::new(GenericResource::with_properties(json!({ "id": 2 }))));

        let ids: Vec<_> = root.to_json()["embedded"]["blogs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|child| child["properties"]["id"].clone())
            .collect();
        assert_eq!(ids, vec![json!(1), json!(2)]);
        assert_eq!(root.embedded_rels().collect::<Vec<_>>(), vec!["blogs"]);
    }

    #[test]
    fn test_links_and_namespaces_accumulate() {
        let mut resource = GenericResource::new();
        resource.add_links(vec![Link::new("self", "/blogs/1")]);
        resource.add_links(vec![Link::new("up", "/blogs")]);
        resource.add_namespaces(vec![Namespace::new("ea", "http://example.com/{rel}")]);

        let rels: Vec<_> = resource.links().iter().map(|l| l.rel.as_str()).collect();
        assert_eq!(rels, vec!["self", "up"]);
        assert_eq!(resource.namespaces().len(), 1);
    }
}

//! Configuration loading and management
//!
//! Relationships can be declared in YAML as an alternative to the fluent
//! builder. Type sections refer to domain types by their simple name.

use crate::core::{ConfigError, Link, Namespace};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A namespace declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceConfig {
    /// Prefix used in compact relation names (e.g., "ea")
    pub name: String,

    /// Href template, usually containing `{rel}`
    pub href: String,
}

impl NamespaceConfig {
    pub fn to_namespace(&self) -> Namespace {
        Namespace::new(&self.name, &self.href)
    }
}

/// A single link template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Relation name (must not be empty)
    pub rel: String,

    /// Href template with `{token}` placeholders
    pub href: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    /// Drop the link when a token stays unresolved
    #[serde(default)]
    pub optional: bool,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
}

impl LinkConfig {
    /// Build the link template described by this entry
    pub fn to_link(&self) -> Result<Link, ConfigError> {
        if self.rel.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "rel".to_string(),
                value: self.rel.clone(),
                message: format!("relation name for '{}' must not be empty", self.href),
            });
        }

        let mut link = Link::new(&self.rel, &self.href);
        link.title = self.title.clone();
        link.media_type = self.media_type.clone();
        link.attributes = self.attributes.clone();

        Ok(if self.optional {
            link.with_optional()
        } else {
            link
        })
    }
}

/// Link templates declared for one domain type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRelationsConfig {
    /// Simple name of the domain type (e.g., "Blog")
    #[serde(rename = "type")]
    pub type_name: String,

    /// Links of a single resource of the type
    #[serde(default)]
    pub links: Vec<LinkConfig>,

    /// Links of a collection of the type
    #[serde(default)]
    pub collection_links: Vec<LinkConfig>,
}

/// Complete relationship configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationshipsConfig {
    #[serde(default)]
    pub namespaces: Vec<NamespaceConfig>,

    #[serde(default)]
    pub types: Vec<TypeRelationsConfig>,
}

impl RelationshipsConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)
            .with_context(|| format!("Failed to read relationship config '{}'", path))?;
        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid relationship config '{}'", path))?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Merge several configurations
    ///
    /// Later namespaces and links replace earlier ones with the same name or
    /// rel, keeping the position of the first occurrence.
    pub fn merge(configs: Vec<RelationshipsConfig>) -> Self {
        let mut namespaces: IndexMap<String, NamespaceConfig> = IndexMap::new();
        let mut types: IndexMap<String, TypeRelationsConfig> = IndexMap::new();

        for config in configs {
            for ns in config.namespaces {
                namespaces.insert(ns.name.clone(), ns);
            }

            for section in config.types {
                match types.get_mut(&section.type_name) {
                    Some(existing) => {
                        merge_links(&mut existing.links, section.links);
                        merge_links(&mut existing.collection_links, section.collection_links);
                    }
                    None => {
                        types.insert(section.type_name.clone(), section);
                    }
                }
            }
        }

        Self {
            namespaces: namespaces.into_values().collect(),
            types: types.into_values().collect(),
        }
    }
}

fn merge_links(existing: &mut Vec<LinkConfig>, incoming: Vec<LinkConfig>) {
    for link in incoming {
        match existing.iter_mut().find(|l| l.rel == link.rel) {
            Some(slot) => *slot = link,
            None => existing.push(link),
        }
    }
}

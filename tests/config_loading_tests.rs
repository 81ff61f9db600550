//! Integration tests for YAML relationship configuration

use hyperexpress::prelude::*;
use std::io::Write;

struct Blog;
struct Entry;

const BLOG_YAML: &str = r#"
namespaces:
  - name: ea
    href: "http://namespaces.example.com/{rel}"
types:
  - type: Blog
    links:
      - rel: self
        href: "/blogs/{blogId}"
      - rel: "ea:author"
        href: "/users/{userId}"
        optional: true
    collection_links:
      - rel: self
        href: /blogs
"#;

const ENTRY_YAML: &str = r#"
namespaces:
  - name: blog
    href: "http://blog.example.com/{rel}"
types:
  - type: Entry
    links:
      - rel: self
        href: "/blogs/{blogId}/entries/{entryId}"
        type: application/json
        attributes:
          hreflang: en
  - type: Blog
    links:
      - rel: "blog:entries"
        href: "/blogs/{blogId}/entries"
      - rel: self
        href: "/v2/blogs/{blogId}"
"#;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(BLOG_YAML.as_bytes()).unwrap();

    let config = RelationshipsConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.namespaces.len(), 1);
    assert_eq!(config.types[0].type_name, "Blog");
}

#[test]
fn test_missing_file_reports_path() {
    let err = RelationshipsConfig::from_yaml_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.yaml"));
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Io(_))
    ));
}

#[test]
fn test_apply_config() {
    let config = RelationshipsConfig::from_yaml_str(BLOG_YAML).unwrap();
    let mut definition = RelationshipDefinition::new();
    definition.register_type::<Blog>();

    definition.apply_config(&config).unwrap();

    let blog = definition.link_templates::<Blog>();
    assert_eq!(blog.len(), 2);
    assert!(blog["ea:author"].is_optional());
    assert_eq!(definition.collection_link_templates::<Blog>()["self"].href, "/blogs");
    assert_eq!(definition.namespaces()["ea"].href(), "http://namespaces.example.com/{rel}");
}

#[test]
fn test_apply_config_with_unknown_type_leaves_registry_untouched() {
    let config = RelationshipsConfig::from_yaml_str(ENTRY_YAML).unwrap();
    let mut definition = RelationshipDefinition::new();
    definition.register_type::<Blog>();

    let err = definition.apply_config(&config).unwrap_err();

    assert!(matches!(err, ConfigError::UnknownType { ref type_name } if type_name == "Entry"));
    assert!(definition.link_templates::<Blog>().is_empty());
    assert!(definition.namespaces().is_empty());
}

#[test]
fn test_merge_configs() {
    let merged = RelationshipsConfig::merge(vec![
        RelationshipsConfig::from_yaml_str(BLOG_YAML).unwrap(),
        RelationshipsConfig::from_yaml_str(ENTRY_YAML).unwrap(),
    ]);

    assert_eq!(merged.namespaces.len(), 2);

    let type_names: Vec<_> = merged.types.iter().map(|t| t.type_name.as_str()).collect();
    assert_eq!(type_names, vec!["Blog", "Entry"]);

    let blog_rels: Vec<_> = merged.types[0]
        .links
        .iter()
        .map(|l| (l.rel.as_str(), l.href.as_str()))
        .collect();
    assert_eq!(
        blog_rels,
        vec![
            ("self", "/v2/blogs/{blogId}"),
            ("ea:author", "/users/{userId}"),
            ("blog:entries", "/blogs/{blogId}/entries"),
        ]
    );
}

#[test]
fn test_merge_empty_configs() {
    let merged = RelationshipsConfig::merge(vec![]);

    assert!(merged.namespaces.is_empty());
    assert!(merged.types.is_empty());
}

#[test]
fn test_builder_applies_merged_configs() {
    let express = HyperExpress::builder()
        .register_type::<Blog>()
        .register_type::<Entry>()
        .with_config(RelationshipsConfig::from_yaml_str(BLOG_YAML).unwrap())
        .with_config(RelationshipsConfig::from_yaml_str(ENTRY_YAML).unwrap())
        .build()
        .unwrap();

    let entry = express.relationships().link_templates::<Entry>();
    assert_eq!(entry["self"].media_type.as_deref(), Some("application/json"));
    assert_eq!(entry["self"].get("hreflang"), Some("en"));
    assert_eq!(
        express.relationships().link_templates::<Blog>()["self"].href,
        "/v2/blogs/{blogId}"
    );
}

#[test]
fn test_empty_rel_fails_build() {
    let config = RelationshipsConfig::from_yaml_str(
        r#"
types:
  - type: Blog
    links:
      - rel: ""
        href: "/blogs/{blogId}"
"#,
    )
    .unwrap();

    let err = HyperExpress::builder()
        .register_type::<Blog>()
        .with_config(config)
        .build()
        .unwrap_err();

    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

//! Blog API demo
//!
//! Configures blog, entry and comment relationships once, then serves a few
//! simulated requests from worker threads, each with its own request scope.
//!
//! Run with `RUST_LOG=hyperexpress=debug cargo run --example blog_api` to see
//! dropped optional links.

use anyhow::Result;
use hyperexpress::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

const HAL_JSON: &str = "application/hal+json";

const RELATIONSHIPS_YAML: &str = r#"
namespaces:
  - name: ea
    href: "http://namespaces.example.com/{rel}"
types:
  - type: Comment
    links:
      - rel: self
        href: "/blogs/{blogId}/entries/{entryId}/comments/{commentId}"
        title: This very comment
      - rel: up
        href: "/blogs/{blogId}/entries/{entryId}"
        title: The parent blog entry
      - rel: "ea:author"
        href: "/users/{userId}"
        title: The comment author
        optional: true
    collection_links:
      - rel: self
        href: "/blogs/{blogId}/entries/{entryId}/comments"
"#;

#[derive(Debug, Serialize)]
struct Blog {
    id: u64,
    title: String,
}

#[derive(Debug, Serialize)]
struct Entry {
    blog_id: u64,
    id: u64,
    title: String,
}

#[derive(Debug, Serialize)]
struct Comment {
    blog_id: u64,
    entry_id: u64,
    id: u64,
    author_id: Option<u64>,
    text: String,
}

impl_representable!(Blog, Entry, Comment);

fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

fn build_express() -> Result<HyperExpress> {
    let express = HyperExpress::builder()
        .register_type::<Comment>()
        .with_config(RelationshipsConfig::from_yaml_str(RELATIONSHIPS_YAML)?)
        .define(|def| {
            def.add_namespaces([Namespace::new("blog", "http://namespaces.example.com/{rel}")])
                .for_collection_of::<Blog>()
                .rel(rel_types::SELF, "/blogs")
                .for_type::<Blog>()
                .rel(rel_types::SELF, "/blogs/{blogId}")
                .rel("blog:entries", "/blogs/{blogId}/entries")
                .for_collection_of::<Entry>()
                .rel(rel_types::SELF, "/blogs/{blogId}/entries")
                .rel(rel_types::UP, "/blogs/{blogId}")
                .for_type::<Entry>()
                .rel(rel_types::SELF, "/blogs/{blogId}/entries/{entryId}")
                .rel("blog:comments", "/blogs/{blogId}/entries/{entryId}/comments")
                .rel(rel_types::UP, "/blogs/{blogId}/entries");
        })
        .with_strategy(HAL_JSON, GenericResourceStrategy)
        .build()?;

    Ok(express)
}

fn comment_binder() -> impl TokenBinder {
    TypedBinder::new(|comment: &Comment| {
        let mut tokens = HashMap::from([
            ("blogId".to_string(), comment.blog_id.to_string()),
            ("entryId".to_string(), comment.entry_id.to_string()),
            ("commentId".to_string(), comment.id.to_string()),
        ]);
        if let Some(author_id) = comment.author_id {
            tokens.insert("userId".to_string(), author_id.to_string());
        }
        tokens
    })
}

fn list_comments(express: &HyperExpress, blog_id: u64, entry_id: u64) -> Result<serde_json::Value> {
    let comments = vec![
        Comment {
            blog_id,
            entry_id,
            id: 1,
            author_id: Some(7),
            text: "Great post".to_string(),
        },
        Comment {
            blog_id,
            entry_id,
            id: 2,
            author_id: None,
            text: "Anonymous drive-by".to_string(),
        },
    ];

    let mut scope = express.scope();
    scope.bind_token("blogId", blog_id.to_string());
    scope.bind_token("entryId", entry_id.to_string());
    scope.collection_token_binder(comment_binder());

    Ok(scope.create_collection_resource(&comments, HAL_JSON)?.to_json())
}

fn show_entry(express: &HyperExpress, blog_id: u64, entry_id: u64) -> Result<serde_json::Value> {
    let entry = Entry {
        blog_id,
        id: entry_id,
        title: "Learning Rust".to_string(),
    };

    let mut scope = express.scope();
    scope.add_token_binder(TypedBinder::new(|entry: &Entry| {
        HashMap::from([
            ("blogId".to_string(), entry.blog_id.to_string()),
            ("entryId".to_string(), entry.id.to_string()),
        ])
    }));

    Ok(scope.create_resource(&entry, HAL_JSON)?.to_json())
}

fn list_blogs(express: &HyperExpress) -> Result<serde_json::Value> {
    let blogs: Vec<Blog> = Vec::new();
    let scope = express.scope();

    Ok(scope.create_collection_resource(&blogs, HAL_JSON)?.to_json())
}

fn main() -> Result<()> {
    setup_tracing();

    let express = Arc::new(build_express()?);
    tracing::info!("Relationships configured");

    let responses = std::thread::scope(|s| {
        let comments = s.spawn(|| list_comments(&express, 1, 10));
        let entry = s.spawn(|| show_entry(&express, 1, 10));
        let blogs = s.spawn(|| list_blogs(&express));

        [comments.join(), entry.join(), blogs.join()]
    });

    for response in responses {
        match response {
            Ok(Ok(json)) => println!("{}", serde_json::to_string_pretty(&json)?),
            Ok(Err(e)) => tracing::error!("Request failed: {}", e),
            Err(_) => tracing::error!("Request thread panicked"),
        }
    }

    Ok(())
}

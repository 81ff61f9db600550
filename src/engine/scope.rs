//! Request-scoped token state
//!
//! A `RequestScope` is the explicit execution context of one unit of work.
//! Its resolver is created on first use and discarded when the scope is
//! cleared or dropped, so bindings never leak into the next unit of work.

use super::host::HyperExpress;
use crate::core::{Representable, Result};
use crate::links::{TokenBinder, TokenResolver};
use crate::resource::Resource;

/// Per-request view of a [`HyperExpress`] instance
///
/// # Example
///
/// ```
/// use hyperexpress::prelude::*;
///
/// #[derive(Serialize)]
/// struct Entry {
///     id: u64,
/// }
///
/// impl_representable!(Entry);
///
/// let mut express = HyperExpress::new();
/// express.register_resource_factory_strategy(GenericResourceStrategy, "application/json");
/// express
///     .define_relationships()
///     .for_type::<Entry>()
///     .rel(rel_types::SELF, "/blogs/{blogId}/entries/{entryId}");
///
/// let mut scope = express.scope();
/// scope.bind_token("blogId", "5");
/// scope.collection_token_binder(TypedBinder::new(|entry: &Entry| {
///     [("entryId".to_string(), entry.id.to_string())].into()
/// }));
///
/// let resource = scope.create_resource(&Entry { id: 42 }, "application/json").unwrap();
/// assert_eq!(resource.links()[0].href, "/blogs/5/entries/42");
/// ```
#[derive(Debug)]
pub struct RequestScope<'a> {
    express: &'a HyperExpress,
    resolver: Option<TokenResolver>,
}

impl<'a> RequestScope<'a> {
    pub fn new(express: &'a HyperExpress) -> Self {
        Self {
            express,
            resolver: None,
        }
    }

    /// Bind an explicit token value, creating the resolver if needed
    pub fn bind_token(
        &mut self,
        token: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut TokenResolver {
        self.resolver_mut().bind_token(token, value)
    }

    /// Register a token binder, creating the resolver if needed
    pub fn add_token_binder(&mut self, binder: impl TokenBinder + 'static) -> &mut TokenResolver {
        self.resolver_mut().add_token_binder(binder)
    }

    /// Register a binder used while resolving collection components
    ///
    /// Binders only run against a source object, so they contribute nothing to
    /// the links of the collection root.
    pub fn collection_token_binder(
        &mut self,
        binder: impl TokenBinder + 'static,
    ) -> &mut TokenResolver {
        self.add_token_binder(binder)
    }

    /// Discard every binding and binder of this scope
    pub fn clear_token_bindings(&mut self) {
        if let Some(mut resolver) = self.resolver.take() {
            resolver.clear();
        }
    }

    /// The resolver of this scope, if one has been created
    pub fn resolver(&self) -> Option<&TokenResolver> {
        self.resolver.as_ref()
    }

    /// Build the resource for `object` with this scope's bindings
    pub fn create_resource(
        &self,
        object: &dyn Representable,
        content_type: &str,
    ) -> Result<Box<dyn Resource>> {
        match &self.resolver {
            Some(resolver) => self.express.create_resource(object, content_type, resolver),
            None => self
                .express
                .create_resource(object, content_type, &TokenResolver::new()),
        }
    }

    /// Build a collection resource with this scope's bindings
    pub fn create_collection_resource<T: Representable>(
        &self,
        components: &[T],
        content_type: &str,
    ) -> Result<Box<dyn Resource>> {
        match &self.resolver {
            Some(resolver) => {
                self.express
                    .create_collection_resource(components, content_type, resolver)
            }
            None => self.express.create_collection_resource(
                components,
                content_type,
                &TokenResolver::new(),
            ),
        }
    }

    fn resolver_mut(&mut self) -> &mut TokenResolver {
        self.resolver.get_or_insert_with(TokenResolver::new)
    }
}

impl Drop for RequestScope<'_> {
    fn drop(&mut self) {
        self.clear_token_bindings();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rel_types::SELF;
    use crate::links::TypedBinder;
    use crate::resource::GenericResourceStrategy;
    use serde::Serialize;
    use std::collections::HashMap;

    const JSON: &str = "application/json";

    #[derive(Serialize)]
    struct User {
        id: u32,
    }

    crate::impl_representable!(User);

    fn express() -> HyperExpress {
        let mut express = HyperExpress::new();
        express.register_resource_factory_strategy(GenericResourceStrategy, JSON);
        express
            .define_relationships()
            .for_type::<User>()
            .rel(SELF, "/users/{userId}")
            .rel("ea:org", "/orgs/{orgId}")
            .optional();
        express
    }

    #[test]
    fn test_resolver_created_lazily() {
        let express = express();
        let mut scope = express.scope();
        assert!(scope.resolver().is_none());

        scope.bind_token("orgId", "3");
        assert!(scope.resolver().is_some());
    }

    #[test]
    fn test_scope_without_bindings_still_builds() {
        let express = express();
        let scope = express.scope();

        let resource = scope.create_resource(&User { id: 1 }, JSON).unwrap();

        assert_eq!(resource.links().len(), 1);
        assert_eq!(resource.links()[0].href, "/users/{userId}");
    }

    #[test]
    fn test_clear_token_bindings() {
        let express = express();
        let mut scope = express.scope();
        scope.bind_token("orgId", "3");
        scope.add_token_binder(TypedBinder::new(|user: &User| {
            HashMap::from([("userId".to_string(), user.id.to_string())])
        }));

        let before = scope.create_resource(&User { id: 1 }, JSON).unwrap();
        assert_eq!(before.links().len(), 2);

        scope.clear_token_bindings();
        assert!(scope.resolver().is_none());

        let after = scope.create_resource(&User { id: 1 }, JSON).unwrap();
        assert_eq!(after.links().len(), 1);
        assert_eq!(after.links()[0].href, "/users/{userId}");
    }

    #[test]
    fn test_scopes_are_isolated() {
        let express = express();
        let mut first = express.scope();
        first.bind_token("userId", "1");

        let second = express.scope();
        let resource = second.create_resource(&User { id: 2 }, JSON).unwrap();

        assert_eq!(resource.links()[0].href, "/users/{userId}");
    }
}

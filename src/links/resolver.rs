//! Token resolution for URI templates
//!
//! A `TokenResolver` belongs to a single unit of work (typically one request).
//! It holds explicit token bindings plus binder callbacks that compute token
//! values from the object currently being resolved.

use regex::{Captures, Regex};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").expect("token pattern is valid"));

/// Computes token values from the object being resolved
///
/// Binders are read-only with respect to the object. Any closure taking
/// `&dyn Any` is a binder; use [`TypedBinder`] to work with a concrete type.
pub trait TokenBinder: Send + Sync {
    /// Produce token values for the given object
    fn bind(&self, object: &dyn Any) -> HashMap<String, String>;
}

impl<F> TokenBinder for F
where
    F: Fn(&dyn Any) -> HashMap<String, String> + Send + Sync,
{
    fn bind(&self, object: &dyn Any) -> HashMap<String, String> {
        self(object)
    }
}

/// A binder that only contributes tokens for objects of type `T`
///
/// Objects of any other type contribute nothing.
///
/// # Example
///
/// ```
/// use hyperexpress::links::resolver::{TokenResolver, TypedBinder};
/// use std::collections::HashMap;
///
/// struct Entry { id: u64 }
///
/// let mut resolver = TokenResolver::new();
/// resolver.add_token_binder(TypedBinder::new(|entry: &Entry| {
///     HashMap::from([("entryId".to_string(), entry.id.to_string())])
/// }));
///
/// let href = resolver.resolve("/entries/{entryId}", Some(&Entry { id: 3 }));
/// assert_eq!(href, "/entries/3");
/// ```
pub struct TypedBinder<T, F> {
    callback: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> TypedBinder<T, F>
where
    T: Any,
    F: Fn(&T) -> HashMap<String, String> + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self {
            callback,
            _marker: PhantomData,
        }
    }
}

impl<T, F> TokenBinder for TypedBinder<T, F>
where
    T: Any,
    F: Fn(&T) -> HashMap<String, String> + Send + Sync,
{
    fn bind(&self, object: &dyn Any) -> HashMap<String, String> {
        object
            .downcast_ref::<T>()
            .map(|typed| (self.callback)(typed))
            .unwrap_or_default()
    }
}

/// Substitutes `{token}` placeholders in URI templates
#[derive(Default)]
pub struct TokenResolver {
    bound_values: HashMap<String, String>,
    binders: Vec<Box<dyn TokenBinder>>,
}

impl TokenResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an explicit value for a token
    pub fn bind_token(
        &mut self,
        token: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.bound_values.insert(token.into(), value.into());
        self
    }

    /// Register a binder, invoked once per resolved object in registration order
    pub fn add_token_binder(&mut self, binder: impl TokenBinder + 'static) -> &mut Self {
        self.binders.push(Box::new(binder));
        self
    }

    /// Compute the token values in effect for `object`
    ///
    /// Explicit bindings act as defaults. Binder output overrides them, and
    /// later binders override earlier ones. Binders are skipped when there is
    /// no object.
    pub fn tokens_for(&self, object: Option<&dyn Any>) -> HashMap<String, String> {
        let mut tokens = self.bound_values.clone();

        if let Some(object) = object {
            for binder in &self.binders {
                tokens.extend(binder.bind(object));
            }
        }

        tokens
    }

    /// Resolve a template against the bindings and `object`
    ///
    /// Tokens without a value are left as literal `{token}` text.
    pub fn resolve(&self, template: &str, object: Option<&dyn Any>) -> String {
        Self::substitute(template, &self.tokens_for(object))
    }

    /// Replace every `{token}` that has a value in `tokens`
    pub fn substitute(template: &str, tokens: &HashMap<String, String>) -> String {
        TOKEN_PATTERN
            .replace_all(template, |caps: &Captures| match tokens.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Whether `href` still contains an unresolved `{token}`
    pub fn has_token(href: &str) -> bool {
        TOKEN_PATTERN.is_match(href)
    }

    /// Discard all bindings and binders
    pub fn clear(&mut self) {
        self.bound_values.clear();
        self.binders.clear();
    }

    /// Whether the resolver holds no bindings and no binders
    pub fn is_empty(&self) -> bool {
        self.bound_values.is_empty() && self.binders.is_empty()
    }
}

impl fmt::Debug for TokenResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResolver")
            .field("bound_values", &self.bound_values)
            .field("binders", &self.binders.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct User {
        id: u32,
    }

    fn tokens(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_bound_tokens() {
        let mut resolver = TokenResolver::new();
        resolver.bind_token("blogId", "5").bind_token("entryId", "42");

        assert_eq!(
            resolver.resolve("/blogs/{blogId}/entries/{entryId}", None),
            "/blogs/5/entries/42"
        );
    }

    #[test]
    fn test_unresolved_token_left_in_place() {
        let mut resolver = TokenResolver::new();
        resolver.bind_token("blogId", "5");

        let href = resolver.resolve("/blogs/{blogId}/entries/{entryId}", None);

        assert_eq!(href, "/blogs/5/entries/{entryId}");
        assert!(TokenResolver::has_token(&href));
    }

    #[test]
    fn test_template_without_tokens() {
        let resolver = TokenResolver::new();
        assert_eq!(resolver.resolve("/blogs", None), "/blogs");
        assert!(!TokenResolver::has_token("/blogs"));
    }

    #[test]
    fn test_repeated_token() {
        let mut resolver = TokenResolver::new();
        resolver.bind_token("id", "9");

        assert_eq!(resolver.resolve("/{id}/{id}", None), "/9/9");
    }

    #[test]
    fn test_binder_reads_object() {
        let mut resolver = TokenResolver::new();
        resolver.add_token_binder(TypedBinder::new(|user: &User| {
            HashMap::from([("userId".to_string(), user.id.to_string())])
        }));

        let user = User { id: 12 };
        assert_eq!(resolver.resolve("/users/{userId}", Some(&user)), "/users/12");
    }

    #[test]
    fn test_binder_output_overrides_bound_value() {
        let mut resolver = TokenResolver::new();
        resolver
            .bind_token("userId", "1")
            .add_token_binder(|_: &dyn Any| tokens(&[("userId", "2")]));

        assert_eq!(resolver.resolve("{userId}", Some(&())), "2");
    }

    #[test]
    fn test_later_binder_overrides_earlier() {
        let mut resolver = TokenResolver::new();
        resolver
            .add_token_binder(|_: &dyn Any| tokens(&[("a", "first"), ("b", "kept")]))
            .add_token_binder(|_: &dyn Any| tokens(&[("a", "second")]));

        assert_eq!(resolver.resolve("{a}/{b}", Some(&())), "second/kept");
    }

    #[test]
    fn test_binders_skipped_without_object() {
        let mut resolver = TokenResolver::new();
        resolver
            .bind_token("userId", "1")
            .add_token_binder(|_: &dyn Any| tokens(&[("userId", "2")]));

        assert_eq!(resolver.resolve("{userId}", None), "1");
    }

    #[test]
    fn test_typed_binder_ignores_other_types() {
        let mut resolver = TokenResolver::new();
        resolver.add_token_binder(TypedBinder::new(|user: &User| {
            HashMap::from([("userId".to_string(), user.id.to_string())])
        }));

        assert_eq!(
            resolver.resolve("/users/{userId}", Some(&"not a user")),
            "/users/{userId}"
        );
    }

    #[test]
    fn test_clear() {
        let mut resolver = TokenResolver::new();
        resolver
            .bind_token("blogId", "5")
            .add_token_binder(|_: &dyn Any| tokens(&[("entryId", "1")]));
        assert!(!resolver.is_empty());

        resolver.clear();

        assert!(resolver.is_empty());
        assert_eq!(
            resolver.resolve("/blogs/{blogId}/entries/{entryId}", Some(&())),
            "/blogs/{blogId}/entries/{entryId}"
        );
    }

    #[test]
    fn test_empty_braces_are_not_tokens() {
        assert!(!TokenResolver::has_token("/search?q={}"));
    }
}

//! Domain object contract and type identity

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A domain object that can be turned into a hypermedia resource
///
/// Implement it with [`impl_representable!`](crate::impl_representable) for
/// each serializable domain type. `Box<T>` and `Arc<T>` forward to `T`, so a
/// wrapped object resolves the same templates and binders as the bare one.
pub trait Representable: Any + Send + Sync {
    /// Access the concrete value, used for runtime type lookup and by token binders
    fn as_any(&self) -> &dyn Any;

    /// Serialize the object into the generic property representation
    fn to_properties(&self) -> Result<serde_json::Value, serde_json::Error>;

    /// Identity of the concrete type
    fn type_key(&self) -> TypeKey;

    /// Identity of the domain type behind `Self`, without an instance
    fn domain_type() -> TypeKey
    where
        Self: Sized,
    {
        TypeKey::of::<Self>()
    }
}

impl<T: Representable> Representable for Box<T> {
    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn to_properties(&self) -> Result<serde_json::Value, serde_json::Error> {
        (**self).to_properties()
    }

    fn type_key(&self) -> TypeKey {
        (**self).type_key()
    }

    fn domain_type() -> TypeKey {
        T::domain_type()
    }
}

impl<T: Representable> Representable for Arc<T> {
    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn to_properties(&self) -> Result<serde_json::Value, serde_json::Error> {
        (**self).to_properties()
    }

    fn type_key(&self) -> TypeKey {
        (**self).type_key()
    }

    fn domain_type() -> TypeKey {
        T::domain_type()
    }
}

/// Implement [`Representable`] for one or more `Serialize` types
///
/// # Example
///
/// ```
/// use hyperexpress::prelude::*;
///
/// #[derive(Serialize)]
/// struct Blog {
///     id: u64,
/// }
///
/// impl_representable!(Blog);
///
/// let blog: &dyn Representable = &Blog { id: 1 };
/// assert_eq!(blog.type_key(), TypeKey::of::<Blog>());
/// ```
#[macro_export]
macro_rules! impl_representable {
    ($($type:ty),+ $(,)?) => {
        $(
            impl $crate::core::Representable for $type {
                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }

                fn to_properties(
                    &self,
                ) -> ::std::result::Result<
                    $crate::__private::serde_json::Value,
                    $crate::__private::serde_json::Error,
                > {
                    $crate::__private::serde_json::to_value(self)
                }

                fn type_key(&self) -> $crate::core::TypeKey {
                    $crate::core::TypeKey::of::<Self>()
                }
            }
        )+
    };
}

/// Identity of a domain type: its `TypeId` plus a printable simple name
///
/// Equality and hashing only consider the `TypeId`.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for the type `T`
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: simple_name(std::any::type_name::<T>()),
        }
    }

    /// The underlying `TypeId`
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The last path segment of the type name, without generic arguments
    ///
    /// `my_app::domain::Entry` → `Entry`
    pub fn simple_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl std::hash::Hash for TypeKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn simple_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

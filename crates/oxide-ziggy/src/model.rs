//! Route-bindable entities.
//!
//! A route parameter typed as an entity is resolved from the URL segment by
//! looking the entity up on its route key field. Extraction only needs to
//! know the name of that field, so entities are registered in a
//! [`ModelRegistry`] under the type name the router reports for the
//! parameter.

use indexmap::IndexMap;

/// Key field used when an entity does not choose its own.
pub const DEFAULT_ROUTE_KEY: &str = "id";

/// An entity that can be resolved from a URL segment.
pub trait UrlRoutable: Send + Sync {
    /// Returns the field used to look the entity up from a URL segment.
    fn route_key_name(&self) -> String {
        DEFAULT_ROUTE_KEY.to_string()
    }
}

/// An entity type that can be registered for route binding.
///
/// # Example
///
/// ```
/// use oxide_ziggy::{RouteModel, UrlRoutable};
///
/// struct Post;
///
/// impl UrlRoutable for Post {
///     fn route_key_name(&self) -> String {
///         "slug".to_string()
///     }
/// }
///
/// impl RouteModel for Post {
///     const NAME: &'static str = "Post";
///     const OVERRIDES_ROUTE_KEY: bool = true;
///
///     fn make() -> Self {
///         Post
///     }
/// }
/// ```
pub trait RouteModel: UrlRoutable + Sized + 'static {
    /// Type name the router reports for parameters bound to this entity.
    const NAME: &'static str;

    /// Whether [`UrlRoutable::route_key_name`] is overridden.
    ///
    /// When false the resolver records [`DEFAULT_ROUTE_KEY`] without ever
    /// calling [`RouteModel::make`].
    const OVERRIDES_ROUTE_KEY: bool = false;

    /// Builds a bare instance. Never a lookup.
    fn make() -> Self;

    /// Parameter to field mappings this entity imposes on scoped child
    /// parameters, e.g. `[("comment", "uuid")]`.
    fn scoped_binding_fields() -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }
}

fn boot<T: RouteModel>() -> Box<dyn UrlRoutable> {
    Box::new(T::make())
}

/// Binding capabilities of a registered entity type.
#[derive(Debug, Clone, Copy)]
pub struct ModelBinding {
    name: &'static str,
    overrides_route_key: bool,
    boot: fn() -> Box<dyn UrlRoutable>,
    scoped: fn() -> Vec<(&'static str, &'static str)>,
}

impl ModelBinding {
    fn of<T: RouteModel>() -> Self {
        Self {
            name: T::NAME,
            overrides_route_key: T::OVERRIDES_ROUTE_KEY,
            boot: boot::<T>,
            scoped: T::scoped_binding_fields,
        }
    }

    /// Returns the registered type name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns whether the entity chooses its own route key.
    pub const fn overrides_route_key(&self) -> bool {
        self.overrides_route_key
    }

    /// Returns the route key field.
    ///
    /// Entities that keep the default are not instantiated.
    pub fn route_key_name(&self) -> String {
        if self.overrides_route_key {
            (self.boot)().route_key_name()
        } else {
            DEFAULT_ROUTE_KEY.to_string()
        }
    }

    /// Returns the scoped binding fields declared by the entity.
    pub fn scoped_binding_fields(&self) -> IndexMap<String, String> {
        (self.scoped)()
            .into_iter()
            .map(|(param, field)| (param.to_string(), field.to_string()))
            .collect()
    }
}

/// Entity types available for route binding, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: IndexMap<String, ModelBinding>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under [`RouteModel::NAME`].
    #[must_use]
    pub fn register<T: RouteModel>(self) -> Self {
        self.register_as::<T>(T::NAME)
    }

    /// Registers `T` under an additional type name, e.g. a fully qualified
    /// path.
    #[must_use]
    pub fn register_as<T: RouteModel>(mut self, name: impl Into<String>) -> Self {
        self.models.insert(name.into(), ModelBinding::of::<T>());
        self
    }

    /// Returns the binding capabilities registered under `name`.
    pub fn get(&self, name: &str) -> Option<&ModelBinding> {
        self.models.get(name)
    }

    /// Returns the number of registered type names.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

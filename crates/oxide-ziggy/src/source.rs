//! The router collaborator.
//!
//! Extraction never talks to a concrete router. Anything that can list its
//! registered routes as [`RawRoute`] values implements [`RouteSource`];
//! [`crate::RouteTable`] is the in-memory implementation shipped with this
//! crate.

use std::convert::Infallible;

use crate::method::Method;
use crate::template::UriTemplate;

/// How a handler parameter is typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterKind {
    /// A plain value (string, integer). Never bound to an entity.
    Plain,
    /// Bound to the entity registered under this type name.
    Model(String),
    /// Declared as bindable but its concrete type cannot be named,
    /// e.g. a union of several entity types.
    Unresolved,
}

/// A handler parameter as reported by the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Parameter name, matching the `{name}` segment of the URI.
    pub name: String,
    /// Declared type of the parameter.
    pub kind: ParameterKind,
}

impl ParameterDescriptor {
    /// Creates a plain parameter.
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::Plain,
        }
    }

    /// Creates a parameter bound to the entity registered as `model`.
    pub fn model(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::Model(model.into()),
        }
    }

    /// Creates a bindable parameter whose type cannot be named.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::Unresolved,
        }
    }

    /// Returns true if the parameter is declared as entity-bindable.
    pub const fn is_bindable(&self) -> bool {
        !matches!(self.kind, ParameterKind::Plain)
    }
}

/// A route exactly as the router knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRoute {
    /// Route name, if one was assigned.
    pub name: Option<String>,
    /// Parsed URI template.
    pub template: UriTemplate,
    /// Methods the route answers to.
    pub methods: Vec<Method>,
    /// Domain constraint, if any.
    pub domain: Option<String>,
    /// Handler parameters.
    pub parameters: Vec<ParameterDescriptor>,
}

impl RawRoute {
    /// Creates an unnamed route.
    pub fn new(methods: impl IntoIterator<Item = Method>, uri: &str) -> Self {
        Self {
            name: None,
            template: UriTemplate::parse(uri),
            methods: methods.into_iter().collect(),
            domain: None,
            parameters: Vec::new(),
        }
    }

    /// Sets the route name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the domain constraint.
    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Adds a handler parameter.
    #[must_use]
    pub fn parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// Anything that can enumerate its registered routes.
///
/// Errors are propagated as-is by [`crate::Ziggy::new`]; extraction does not
/// try to recover from a router that fails.
pub trait RouteSource {
    /// Error raised when listing fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Lists every registered route, named or not, in registration order.
    fn list_routes(&self) -> Result<Vec<RawRoute>, Self::Error>;
}

impl RouteSource for [RawRoute] {
    type Error = Infallible;

    fn list_routes(&self) -> Result<Vec<RawRoute>, Self::Error> {
        Ok(self.to_vec())
    }
}

impl RouteSource for Vec<RawRoute> {
    type Error = Infallible;

    fn list_routes(&self) -> Result<Vec<RawRoute>, Self::Error> {
        Ok(self.clone())
    }
}

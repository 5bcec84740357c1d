//! Name-keyed route snapshots.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::method::Method;
use crate::source::{ParameterDescriptor, RawRoute};

/// Route name prefixes reserved for debugging and auto-generated routes.
pub const DEFAULT_IGNORE_PREFIXES: [&str; 2] = ["debugbar.", "generated::"];

/// Parameter name to entity key field, attached per route.
pub type BindingMap = IndexMap<String, String>;

/// The exposed description of a named route.
///
/// Only `uri`, `methods`, `domain` and `bindings` are serialized. The
/// handler parameters, template parameter names and template binding fields
/// are carried along for the binding resolver and never leave the process.
/// Methods are kept sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    uri: String,
    methods: Vec<Method>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    bindings: BindingMap,
    #[serde(skip)]
    parameters: Vec<ParameterDescriptor>,
    #[serde(skip)]
    template_params: Vec<String>,
    #[serde(skip)]
    binding_fields: IndexMap<String, String>,
}

impl RouteDescriptor {
    fn from_raw(route: RawRoute) -> Self {
        let mut methods = route.methods;
        methods.sort_unstable();
        methods.dedup();

        Self {
            uri: route.template.uri().to_string(),
            template_params: route
                .template
                .params()
                .iter()
                .map(|p| p.name.clone())
                .collect(),
            binding_fields: route.template.binding_fields().clone(),
            methods,
            domain: route.domain,
            bindings: BindingMap::new(),
            parameters: route.parameters,
        }
    }

    /// Returns the URI template.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the HTTP methods.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Returns the domain constraint, if any.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Returns the resolved bindings. Empty until bindings are resolved.
    pub fn bindings(&self) -> &BindingMap {
        &self.bindings
    }

    /// Returns the handler parameters reported by the router.
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Returns the parameter names written in the URI template, in order.
    pub fn template_params(&self) -> &[String] {
        &self.template_params
    }

    /// Returns true if `name` is a URI template parameter or a handler
    /// parameter of this route.
    pub fn declares_parameter(&self, name: &str) -> bool {
        self.template_params.iter().any(|p| p == name)
            || self.parameters.iter().any(|p| p.name == name)
    }

    /// Returns the binding fields declared in the URI template (`{post:slug}`).
    pub fn binding_fields(&self) -> &IndexMap<String, String> {
        &self.binding_fields
    }

    /// Returns a copy of this descriptor carrying `bindings`.
    #[must_use]
    pub fn with_bindings(&self, bindings: BindingMap) -> Self {
        Self {
            bindings,
            ..self.clone()
        }
    }
}

/// Route name to descriptor, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteRegistry {
    routes: IndexMap<String, RouteDescriptor>,
}

impl RouteRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the descriptor registered under `name`.
    pub fn get(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.get(name)
    }

    /// Returns true if a route named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// Returns the number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if there are no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterates over route names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Iterates over `(name, descriptor)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteDescriptor)> {
        self.routes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns a new registry holding the routes whose name satisfies `keep`.
    #[must_use]
    pub fn retain_names(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        self.routes
            .iter()
            .filter(|(name, _)| keep(name))
            .map(|(name, route)| (name.clone(), route.clone()))
            .collect()
    }
}

impl FromIterator<(String, RouteDescriptor)> for RouteRegistry {
    fn from_iter<I: IntoIterator<Item = (String, RouteDescriptor)>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RouteRegistry {
    type Item = (&'a String, &'a RouteDescriptor);
    type IntoIter = indexmap::map::Iter<'a, String, RouteDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// Builds a name-keyed registry from the router's route list.
///
/// Unnamed routes and routes whose name starts with one of
/// `ignore_prefixes` are dropped. Names are unique per router; should a
/// name repeat anyway, the last route wins and keeps the first position.
pub fn build_snapshot<P: AsRef<str>>(routes: Vec<RawRoute>, ignore_prefixes: &[P]) -> RouteRegistry {
    let mut registry = IndexMap::new();

    for route in routes {
        let Some(name) = route.name.clone() else {
            continue;
        };
        if let Some(prefix) = ignore_prefixes
            .iter()
            .map(AsRef::<str>::as_ref)
            .find(|p| name.starts_with(p))
        {
            debug!(route = %name, prefix = %prefix, "Skipping reserved route");
            continue;
        }
        registry.insert(name, RouteDescriptor::from_raw(route));
    }

    debug!(routes = registry.len(), "Built route snapshot");
    RouteRegistry { routes: registry }
}

//! In-memory route table.

use std::convert::Infallible;

use crate::method::Method;
use crate::source::{ParameterDescriptor, RawRoute, RouteSource};
use crate::template::UriTemplate;

/// A single route definition.
#[derive(Debug, Clone)]
pub struct Route {
    name: Option<String>,
    methods: Vec<Method>,
    path: String,
    domain: Option<String>,
    parameters: Vec<ParameterDescriptor>,
}

impl Route {
    /// Creates a new route answering to `methods`.
    pub fn new(methods: impl IntoIterator<Item = Method>, path: &str) -> Self {
        let mut methods: Vec<Method> = methods.into_iter().collect();
        methods.sort();
        methods.dedup();
        Self {
            name: None,
            methods,
            path: path.to_string(),
            domain: None,
            parameters: Vec::new(),
        }
    }

    /// Creates a GET route. HEAD is registered alongside.
    pub fn get(path: &str) -> Self {
        Self::new([Method::Get, Method::Head], path)
    }

    /// Creates a POST route.
    pub fn post(path: &str) -> Self {
        Self::new([Method::Post], path)
    }

    /// Creates a PUT route.
    pub fn put(path: &str) -> Self {
        Self::new([Method::Put], path)
    }

    /// Creates a PATCH route.
    pub fn patch(path: &str) -> Self {
        Self::new([Method::Patch], path)
    }

    /// Creates a DELETE route.
    pub fn delete(path: &str) -> Self {
        Self::new([Method::Delete], path)
    }

    /// Creates a route answering to every method.
    pub fn any(path: &str) -> Self {
        Self::new(Method::ALL, path)
    }

    /// Sets the route name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the domain constraint.
    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Declares `param` as bound to the entity registered as `model`.
    #[must_use]
    pub fn bind(mut self, param: impl Into<String>, model: impl Into<String>) -> Self {
        self.parameters.push(ParameterDescriptor::model(param, model));
        self
    }

    /// Declares an arbitrary handler parameter.
    #[must_use]
    pub fn parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    fn into_raw(self, group: Option<&RouteGroup>) -> RawRoute {
        let (prefix, name_prefix, group_domain) = group.map_or(("", "", None), |g| {
            (g.prefix.as_str(), g.name_prefix.as_str(), g.domain.clone())
        });

        RawRoute {
            name: self.name.map(|n| format!("{name_prefix}{n}")),
            template: UriTemplate::join(prefix, &self.path),
            methods: self.methods,
            domain: self.domain.or(group_domain),
            parameters: self.parameters,
        }
    }
}

/// A group of routes sharing a URI prefix, a name prefix and a domain.
#[derive(Debug, Clone, Default)]
pub struct RouteGroup {
    prefix: String,
    name_prefix: String,
    domain: Option<String>,
    routes: Vec<Route>,
}

impl RouteGroup {
    /// Creates a new route group with the given URI prefix.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            ..Self::default()
        }
    }

    /// Prefixes every route name in this group, e.g. `admin.`.
    #[must_use]
    pub fn name_prefix(mut self, name_prefix: impl Into<String>) -> Self {
        self.name_prefix = name_prefix.into();
        self
    }

    /// Constrains every route in this group to a domain.
    ///
    /// A domain set on an individual route takes precedence.
    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Adds a route to this group.
    #[must_use]
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    fn into_raw(mut self) -> Vec<RawRoute> {
        let routes = std::mem::take(&mut self.routes);
        routes.into_iter().map(|r| r.into_raw(Some(&self))).collect()
    }
}

/// An in-memory table of registered routes.
///
/// # Example
///
/// ```
/// use oxide_ziggy::{Route, RouteGroup, RouteTable};
///
/// let table = RouteTable::new()
///     .route(Route::get("/").name("home"))
///     .group(
///         RouteGroup::new("/admin")
///             .name_prefix("admin.")
///             .route(Route::get("/users/{user}").name("users.show").bind("user", "User")),
///     );
///
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RawRoute>,
}

impl RouteTable {
    /// Creates a new empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route.
    #[must_use]
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route.into_raw(None));
        self
    }

    /// Adds an unnamed GET route.
    #[must_use]
    pub fn get(self, path: &str) -> Self {
        self.route(Route::get(path))
    }

    /// Adds an unnamed POST route.
    #[must_use]
    pub fn post(self, path: &str) -> Self {
        self.route(Route::post(path))
    }

    /// Adds a named route.
    #[must_use]
    pub fn named_route(self, name: &str, method: Method, path: &str) -> Self {
        let route = if method == Method::Get {
            Route::get(path)
        } else {
            Route::new([method], path)
        };
        self.route(route.name(name))
    }

    /// Adds a route group.
    #[must_use]
    pub fn group(mut self, group: RouteGroup) -> Self {
        self.routes.extend(group.into_raw());
        self
    }

    /// Adds an already-built raw route.
    #[must_use]
    pub fn raw(mut self, route: RawRoute) -> Self {
        self.routes.push(route);
        self
    }

    /// Returns the number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterates over the registered routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RawRoute> {
        self.routes.iter()
    }
}

impl RouteSource for RouteTable {
    type Error = Infallible;

    fn list_routes(&self) -> Result<Vec<RawRoute>, Self::Error> {
        Ok(self.routes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ParameterKind;

    #[test]
    fn test_get_registers_head() {
        let table = RouteTable::new().route(Route::get("/posts").name("posts.index"));
        let route = table.iter().next().unwrap();
        assert_eq!(route.methods, vec![Method::Get, Method::Head]);
        assert_eq!(route.name.as_deref(), Some("posts.index"));
        assert_eq!(route.template.uri(), "posts");
    }

    #[test]
    fn test_unnamed_route() {
        let table = RouteTable::new().get("/health").post("/webhooks");
        assert_eq!(table.len(), 2);
        assert!(table.iter().all(|r| r.name.is_none()));
    }

    #[test]
    fn test_named_route() {
        let table = RouteTable::new().named_route("users.store", Method::Post, "/users");
        let route = table.iter().next().unwrap();
        assert_eq!(route.methods, vec![Method::Post]);
        assert_eq!(route.name.as_deref(), Some("users.store"));
    }

    #[test]
    fn test_route_group() {
        let group = RouteGroup::new("/api/v1")
            .name_prefix("api.")
            .domain("api.example.com")
            .route(Route::get("/users").name("users.index"))
            .route(
                Route::delete("/users/{user}")
                    .name("users.destroy")
                    .domain("admin.example.com"),
            );

        let table = RouteTable::new().group(group);
        let routes: Vec<_> = table.iter().collect();

        assert_eq!(routes[0].name.as_deref(), Some("api.users.index"));
        assert_eq!(routes[0].template.uri(), "api/v1/users");
        assert_eq!(routes[0].domain.as_deref(), Some("api.example.com"));
        assert_eq!(routes[1].domain.as_deref(), Some("admin.example.com"));
    }

    #[test]
    fn test_bind_declares_model_parameter() {
        let table = RouteTable::new().route(
            Route::get("/posts/{post}")
                .name("posts.show")
                .bind("post", "Post"),
        );
        let route = table.iter().next().unwrap();
        assert_eq!(route.parameters.len(), 1);
        assert_eq!(
            route.parameters[0].kind,
            ParameterKind::Model("Post".to_string())
        );
    }
}

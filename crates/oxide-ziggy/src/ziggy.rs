//! The extraction pipeline and its serialized snapshot.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::base_url::{normalize_base_url, parse_port, UrlResolver};
use crate::binding::{resolve_bindings, BindingResolution};
use crate::config::ZiggyConfig;
use crate::error::{Result, ZiggyError};
use crate::filter::{self, apply_filters, FilterContext, GroupSelection};
use crate::model::ModelRegistry;
use crate::route::{build_snapshot, RouteRegistry};
use crate::source::RouteSource;

/// The complete output of one extraction.
///
/// `defaults` always encodes as a JSON object, `{}` when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZiggySnapshot {
    url: String,
    port: Option<u16>,
    defaults: IndexMap<String, String>,
    routes: RouteRegistry,
}

impl ZiggySnapshot {
    /// Assembles a snapshot. The port is derived from `base_url`.
    pub fn new(
        base_url: &str,
        defaults: Option<IndexMap<String, String>>,
        routes: RouteRegistry,
    ) -> Self {
        let url = normalize_base_url(base_url);
        Self {
            port: parse_port(&url),
            url,
            defaults: defaults.unwrap_or_default(),
            routes,
        }
    }

    /// Returns the base URL without trailing slashes.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the explicit port of the base URL.
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the default route parameter values.
    pub fn defaults(&self) -> &IndexMap<String, String> {
        &self.defaults
    }

    /// Returns the exposed routes.
    pub fn routes(&self) -> &RouteRegistry {
        &self.routes
    }

    /// Encodes the snapshot as JSON bytes.
    pub fn to_wire(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Encodes the snapshot as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encodes the snapshot as an indented JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Extracts the named routes of an application.
///
/// Routes are read from the router once, in [`Ziggy::new`]. Filters and
/// bindings are applied when a snapshot is materialized.
///
/// # Example
///
/// ```
/// use oxide_ziggy::{Route, RouteTable, StaticUrlResolver, Ziggy, ZiggyConfig};
///
/// let router = RouteTable::new()
///     .route(Route::get("/").name("home"))
///     .route(Route::get("/admin/users").name("admin.users"));
/// let urls = StaticUrlResolver::new("https://example.com:8443/");
/// let config = ZiggyConfig::new().except("admin.*");
///
/// let snapshot = Ziggy::new(&router, &urls, config).unwrap().snapshot();
/// assert_eq!(snapshot.url(), "https://example.com:8443");
/// assert_eq!(snapshot.port(), Some(8443));
/// assert_eq!(snapshot.routes().names().collect::<Vec<_>>(), vec!["home"]);
/// ```
#[derive(Debug, Clone)]
pub struct Ziggy {
    url: String,
    defaults: Option<IndexMap<String, String>>,
    group: Option<GroupSelection>,
    config: ZiggyConfig,
    models: ModelRegistry,
    routes: RouteRegistry,
}

impl Ziggy {
    /// Reads the named routes from `source`.
    ///
    /// Fails only if the router itself fails to list its routes.
    pub fn new<S, U>(source: &S, urls: &U, config: ZiggyConfig) -> Result<Self>
    where
        S: RouteSource + ?Sized,
        U: UrlResolver + ?Sized,
    {
        let raw = source
            .list_routes()
            .map_err(|e| ZiggyError::Router(Box::new(e)))?;
        let routes = build_snapshot(raw, config.ignore_prefixes.as_slice());

        Ok(Self {
            url: normalize_base_url(&urls.base_url()),
            defaults: urls.default_parameters(),
            group: None,
            config,
            models: ModelRegistry::new(),
            routes,
        })
    }

    /// Restricts the output to the given group or groups.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<GroupSelection>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Overrides the base URL reported by the URL resolver.
    #[must_use]
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = normalize_base_url(url);
        self
    }

    /// Sets the entity types used to resolve route bindings.
    #[must_use]
    pub fn with_models(mut self, models: ModelRegistry) -> Self {
        self.models = models;
        self
    }

    /// Returns a copy keeping (`include = true`) or dropping
    /// (`include = false`) the routes matching `patterns`.
    ///
    /// Configured filters still apply on top when the snapshot is built.
    #[must_use]
    pub fn filter<P: AsRef<str>>(&self, patterns: &[P], include: bool) -> Self {
        Self {
            routes: filter::filter(&self.routes, patterns, include),
            ..self.clone()
        }
    }

    /// Returns the base URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the explicit port of the base URL.
    pub fn port(&self) -> Option<u16> {
        parse_port(&self.url)
    }

    /// Returns the routes read from the router, before configured filters.
    pub fn routes(&self) -> &RouteRegistry {
        &self.routes
    }

    /// Returns the routes that survive the configured filters.
    pub fn filtered_routes(&self) -> RouteRegistry {
        let ctx = FilterContext::new(&self.config, self.group.as_ref());
        apply_filters(&self.routes, &ctx)
    }

    /// Filters the routes and resolves their bindings, keeping the
    /// per-route binding errors.
    pub fn resolve(&self) -> BindingResolution {
        resolve_bindings(&self.filtered_routes(), &self.models)
    }

    /// Materializes the snapshot.
    ///
    /// Binding errors are logged and the affected parameters omitted; use
    /// [`Ziggy::resolve`] to inspect them.
    pub fn snapshot(&self) -> ZiggySnapshot {
        let resolution = self.resolve();
        debug!(
            routes = resolution.routes.len(),
            binding_errors = resolution.errors.len(),
            "Materialized route snapshot"
        );
        ZiggySnapshot::new(&self.url, self.defaults.clone(), resolution.routes)
    }

    /// Encodes the snapshot as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        self.snapshot().to_json()
    }

    /// Encodes the snapshot as an indented JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        self.snapshot().to_json_pretty()
    }
}

impl Serialize for Ziggy {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}

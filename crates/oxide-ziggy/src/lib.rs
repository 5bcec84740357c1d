//! # oxide-ziggy
//!
//! Exposes an application's named routes to clients that build URLs
//! outside the framework, such as a JavaScript `route()` helper.
//!
//! This crate provides:
//! - A name-keyed snapshot of the routes a router has registered
//! - Allow/deny lists and named groups of shell-style name patterns
//! - Route model binding metadata (which entity field a parameter binds to)
//! - A JSON document with the base URL, port and default parameters
//!
//! ## Quick Start
//!
//! ```
//! use oxide_ziggy::{Route, RouteTable, StaticUrlResolver, Ziggy, ZiggyConfig};
//!
//! let router = RouteTable::new()
//!     .route(Route::get("/").name("home"))
//!     .route(Route::get("/posts/{post}").name("posts.show"));
//!
//! let urls = StaticUrlResolver::new("https://example.com");
//! let ziggy = Ziggy::new(&router, &urls, ZiggyConfig::default()).unwrap();
//!
//! let json = ziggy.to_json().unwrap();
//! assert!(json.contains(r#""posts.show":{"uri":"posts/{post}""#));
//! ```
//!
//! ## Filtering
//!
//! Configure `except` to hide routes, `only` to expose a subset, or named
//! `groups` selected per extraction:
//!
//! ```
//! use oxide_ziggy::{Route, RouteTable, StaticUrlResolver, Ziggy, ZiggyConfig};
//!
//! let router = RouteTable::new()
//!     .route(Route::get("/").name("home"))
//!     .route(Route::get("/admin/users").name("admin.users"));
//! let urls = StaticUrlResolver::new("https://example.com");
//! let config = ZiggyConfig::new().group("admin", "admin.*");
//!
//! let ziggy = Ziggy::new(&router, &urls, config).unwrap().with_group("admin");
//! let snapshot = ziggy.snapshot();
//! assert!(snapshot.routes().contains("admin.users"));
//! assert!(!snapshot.routes().contains("home"));
//! ```
//!
//! Setting both `except` and `only` is treated as a configuration mistake:
//! a warning is logged and no filter is applied.
//!
//! ## Route Model Binding
//!
//! ```
//! use oxide_ziggy::{ModelRegistry, Route, RouteModel, RouteTable, StaticUrlResolver,
//!     UrlRoutable, Ziggy, ZiggyConfig};
//!
//! struct Post;
//!
//! impl UrlRoutable for Post {
//!     fn route_key_name(&self) -> String {
//!         "slug".to_string()
//!     }
//! }
//!
//! impl RouteModel for Post {
//!     const NAME: &'static str = "Post";
//!     const OVERRIDES_ROUTE_KEY: bool = true;
//!
//!     fn make() -> Self {
//!         Post
//!     }
//! }
//!
//! let router = RouteTable::new()
//!     .route(Route::get("/posts/{post}").name("posts.show").bind("post", "Post"));
//! let urls = StaticUrlResolver::new("https://example.com");
//!
//! let snapshot = Ziggy::new(&router, &urls, ZiggyConfig::default())
//!     .unwrap()
//!     .with_models(ModelRegistry::new().register::<Post>())
//!     .snapshot();
//!
//! let route = snapshot.routes().get("posts.show").unwrap();
//! assert_eq!(route.bindings()["post"], "slug");
//! ```

mod base_url;
mod binding;
mod config;
mod error;
mod filter;
mod method;
mod model;
mod pattern;
mod route;
mod router;
mod source;
mod template;
mod ziggy;

pub use base_url::{normalize_base_url, parse_port, StaticUrlResolver, UrlResolver};
pub use binding::{resolve_bindings, BindingResolution};
pub use config::ZiggyConfig;
pub use error::{BindingError, ConfigError, Result, ZiggyError};
pub use filter::{
    apply_filters, filter, FilterContext, FilterPolicy, FilterSpec, GroupSelection, Unfiltered,
};
pub use method::Method;
pub use model::{ModelBinding, ModelRegistry, RouteModel, UrlRoutable, DEFAULT_ROUTE_KEY};
pub use pattern::{matches_any, NamePattern};
pub use route::{build_snapshot, BindingMap, RouteDescriptor, RouteRegistry, DEFAULT_IGNORE_PREFIXES};
pub use router::{Route, RouteGroup, RouteTable};
pub use source::{ParameterDescriptor, ParameterKind, RawRoute, RouteSource};
pub use template::{TemplateParam, UriTemplate};
pub use ziggy::{Ziggy, ZiggySnapshot};

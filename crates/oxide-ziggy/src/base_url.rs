//! Base URL and default parameter resolution.

use indexmap::IndexMap;
use tracing::{debug, warn};
use url::Url;

/// Supplies the application's canonical base URL and the default values
/// applied to route parameters.
pub trait UrlResolver {
    /// Returns the base URL, e.g. `https://example.com`.
    fn base_url(&self) -> String;

    /// Returns default route parameter values, if the host supports them.
    fn default_parameters(&self) -> Option<IndexMap<String, String>> {
        None
    }
}

/// A fixed base URL with optional default parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticUrlResolver {
    base_url: String,
    defaults: Option<IndexMap<String, String>>,
}

impl StaticUrlResolver {
    /// Creates a resolver without default parameters.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            defaults: None,
        }
    }

    /// Adds a default parameter value.
    #[must_use]
    pub fn default_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value.into());
        self
    }
}

impl UrlResolver for StaticUrlResolver {
    fn base_url(&self) -> String {
        self.base_url.clone()
    }

    fn default_parameters(&self) -> Option<IndexMap<String, String>> {
        self.defaults.clone()
    }
}

/// Removes trailing slashes from a base URL.
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Extracts the port written in a base URL.
///
/// The port is read from the authority as written, so a port equal to the
/// scheme's default (`https://example.com:443`) is still reported, as is the
/// port of a scheme-less `localhost:8000` or `//example.com:8080`. Returns
/// `None` when no port is written or the written port is not a number.
pub fn parse_port(base_url: &str) -> Option<u16> {
    if let Err(e) = Url::parse(base_url) {
        debug!(url = %base_url, error = %e, "Base URL is not an absolute URL");
    }

    let rest = base_url
        .split_once("://")
        .map_or_else(|| base_url.strip_prefix("//").unwrap_or(base_url), |(_, r)| r);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);

    let port = if host_port.starts_with('[') {
        host_port.split_once("]:").map(|(_, p)| p)
    } else {
        host_port.rsplit_once(':').map(|(_, p)| p)
    }?;

    if port.is_empty() {
        return None;
    }
    match port.parse() {
        Ok(port) => Some(port),
        Err(e) => {
            warn!(url = %base_url, port = %port, error = %e, "Cannot parse base URL port, treating it as absent");
            None
        }
    }
}

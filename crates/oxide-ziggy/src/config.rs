//! Typed extraction configuration.
//!
//! ```toml
//! except = ["_debugbar.*", "horizon.*"]
//! ignore_prefixes = ["debugbar.", "generated::", "telescope."]
//!
//! [groups]
//! admin = ["admin.*", "users.*"]
//! author = ["posts.*"]
//! ```
//!
//! The same document in JSON:
//!
//! ```json
//! {
//!   "only": "posts.*",
//!   "groups": { "admin": ["admin.*"] }
//! }
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::filter::FilterSpec;
use crate::route::DEFAULT_IGNORE_PREFIXES;

/// Route filtering configuration.
///
/// `except` and `only` are checked for presence, not content: an explicitly
/// empty `only` keeps no routes at all.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZiggyConfig {
    /// Routes to drop.
    pub except: Option<FilterSpec>,
    /// Routes to keep.
    pub only: Option<FilterSpec>,
    /// Named pattern groups, selectable per extraction.
    pub groups: IndexMap<String, FilterSpec>,
    /// Route name prefixes that are never exposed.
    pub ignore_prefixes: Vec<String>,
}

impl Default for ZiggyConfig {
    fn default() -> Self {
        Self {
            except: None,
            only: None,
            groups: IndexMap::new(),
            ignore_prefixes: DEFAULT_IGNORE_PREFIXES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl ZiggyConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `except` patterns.
    #[must_use]
    pub fn except(mut self, spec: impl Into<FilterSpec>) -> Self {
        self.except = Some(spec.into());
        self
    }

    /// Sets the `only` patterns.
    #[must_use]
    pub fn only(mut self, spec: impl Into<FilterSpec>) -> Self {
        self.only = Some(spec.into());
        self
    }

    /// Adds a named group.
    #[must_use]
    pub fn group(mut self, name: impl Into<String>, spec: impl Into<FilterSpec>) -> Self {
        self.groups.insert(name.into(), spec.into());
        self
    }

    /// Adds a reserved route name prefix.
    #[must_use]
    pub fn ignore_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.ignore_prefixes.push(prefix.into());
        self
    }

    /// Parses a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a TOML configuration document.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml)?)
    }

    /// Loads configuration from a `.json` or `.toml` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("toml") => Self::from_toml_str(&contents),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

//! Error types for route extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort an extraction.
///
/// Everything the pipeline can recover from locally (conflicting filters,
/// unknown groups, unresolvable parameter types, a base URL without a port)
/// is logged instead and never shows up here.
#[derive(Debug, Error)]
pub enum ZiggyError {
    /// The router collaborator failed to list its routes.
    #[error("router error: {0}")]
    Router(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A route name pattern could not be compiled.
    #[error("invalid route name pattern: {0}")]
    InvalidPattern(String),

    /// JSON encoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The JSON document did not match the configuration schema.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// The TOML document did not match the configuration schema.
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension is neither `.json` nor `.toml`.
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),
}

/// A recoverable, per-route failure raised while resolving bindings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// The entity type bound to a parameter could not be determined.
    #[error("cannot resolve type of parameter '{parameter}' on route '{route}': {reason}")]
    UnresolvableParameterType {
        /// Route name.
        route: String,
        /// Parameter name.
        parameter: String,
        /// Why resolution failed.
        reason: String,
    },
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ZiggyError>;

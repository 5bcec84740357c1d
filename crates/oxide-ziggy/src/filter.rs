//! Route name filters.
//!
//! A [`FilterContext`] gathers everything that can narrow the exposed route
//! set: an explicit group chosen by the caller plus the configured `except`,
//! `only` and `groups` settings. [`FilterPolicy::resolve`] turns it into a
//! single decision, evaluated in this order:
//!
//! 1. An explicit group keeps only the routes matching that group.
//! 2. `except` and `only` both configured is a conflict; nothing is filtered.
//! 3. `except` drops the routes it matches.
//! 4. `only` keeps the routes it matches.
//! 5. Otherwise nothing is filtered.
//!
//! Unknown groups never fail the extraction: the registry is returned
//! unfiltered and a warning is logged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ZiggyConfig;
use crate::pattern::{matches_any, NamePattern};
use crate::route::RouteRegistry;

/// A set of route name patterns, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterSpec {
    /// A single pattern, e.g. `"admin.*"`.
    Pattern(String),
    /// Several patterns, any of which may match.
    Patterns(Vec<String>),
    /// The patterns of a configured group.
    Group {
        /// Group name.
        group: String,
    },
}

impl FilterSpec {
    /// Resolves this spec to a flat pattern list.
    ///
    /// Returns `None` if it references a group that is not configured, or
    /// groups that reference each other in a cycle.
    pub fn resolve(&self, groups: &IndexMap<String, Self>) -> Option<Vec<String>> {
        self.resolve_inner(groups, &mut Vec::new())
    }

    fn resolve_inner<'a>(
        &'a self,
        groups: &'a IndexMap<String, Self>,
        seen: &mut Vec<&'a str>,
    ) -> Option<Vec<String>> {
        match self {
            Self::Pattern(p) => Some(vec![p.clone()]),
            Self::Patterns(ps) => Some(ps.clone()),
            Self::Group { group } => {
                if seen.contains(&group.as_str()) {
                    return None;
                }
                seen.push(group);
                groups.get(group)?.resolve_inner(groups, seen)
            }
        }
    }
}

impl From<&str> for FilterSpec {
    fn from(pattern: &str) -> Self {
        Self::Pattern(pattern.to_string())
    }
}

impl From<Vec<&str>> for FilterSpec {
    fn from(patterns: Vec<&str>) -> Self {
        Self::Patterns(patterns.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for FilterSpec {
    fn from(patterns: Vec<String>) -> Self {
        Self::Patterns(patterns)
    }
}

/// The group (or groups) a caller explicitly asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupSelection {
    /// A single group name.
    One(String),
    /// Several group names whose patterns are unioned.
    Many(Vec<String>),
}

impl GroupSelection {
    /// An empty name or empty list selects nothing and is ignored.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(name) => name.is_empty(),
            Self::Many(names) => names.is_empty(),
        }
    }
}

impl From<&str> for GroupSelection {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<String> for GroupSelection {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl From<Vec<&str>> for GroupSelection {
    fn from(names: Vec<&str>) -> Self {
        Self::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for GroupSelection {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

/// Inputs to filter resolution.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    /// Group explicitly requested by the caller.
    pub explicit_group: Option<&'a GroupSelection>,
    /// Configured `except` patterns.
    pub except: Option<&'a FilterSpec>,
    /// Configured `only` patterns.
    pub only: Option<&'a FilterSpec>,
    /// Configured named groups.
    pub groups: &'a IndexMap<String, FilterSpec>,
}

impl<'a> FilterContext<'a> {
    /// Builds a context from configuration and an optional explicit group.
    pub fn new(config: &'a ZiggyConfig, explicit_group: Option<&'a GroupSelection>) -> Self {
        Self {
            explicit_group,
            except: config.except.as_ref(),
            only: config.only.as_ref(),
            groups: &config.groups,
        }
    }
}

/// Why a policy leaves the registry untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unfiltered {
    /// No filter is configured.
    NoFilter,
    /// Both `except` and `only` are configured.
    Conflict,
    /// A referenced group is not configured.
    UnresolvedGroup(String),
}

/// A resolved filtering decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Return the registry as-is.
    Unfiltered(Unfiltered),
    /// Keep (`include = true`) or drop (`include = false`) matching routes.
    Filter {
        /// Route name patterns.
        patterns: Vec<String>,
        /// Whether matches are kept or dropped.
        include: bool,
    },
}

impl FilterPolicy {
    /// Resolves the policy for `ctx`.
    pub fn resolve(ctx: &FilterContext<'_>) -> Self {
        if let Some(selection) = ctx.explicit_group.filter(|g| !g.is_empty()) {
            return Self::for_group(selection, ctx.groups);
        }

        match (ctx.except, ctx.only) {
            (Some(_), Some(_)) => {
                warn!("Both `except` and `only` are configured, returning unfiltered routes");
                Self::Unfiltered(Unfiltered::Conflict)
            }
            (Some(except), None) => Self::for_spec(except, false, ctx.groups),
            (None, Some(only)) => Self::for_spec(only, true, ctx.groups),
            (None, None) => Self::Unfiltered(Unfiltered::NoFilter),
        }
    }

    fn for_spec(spec: &FilterSpec, include: bool, groups: &IndexMap<String, FilterSpec>) -> Self {
        spec.resolve(groups).map_or_else(
            || {
                let name = match spec {
                    FilterSpec::Group { group } => group.clone(),
                    _ => String::new(),
                };
                warn!(group = %name, "Filter references an unknown group, returning unfiltered routes");
                Self::Unfiltered(Unfiltered::UnresolvedGroup(name))
            },
            |patterns| Self::Filter { patterns, include },
        )
    }

    fn for_group(selection: &GroupSelection, groups: &IndexMap<String, FilterSpec>) -> Self {
        let names: &[String] = match selection {
            GroupSelection::One(name) => std::slice::from_ref(name),
            GroupSelection::Many(names) => names,
        };

        let mut patterns = Vec::new();
        let mut resolved_any = false;
        for name in names {
            match groups.get(name).and_then(|spec| spec.resolve(groups)) {
                Some(group_patterns) => {
                    resolved_any = true;
                    patterns.extend(group_patterns);
                }
                None => warn!(group = %name, "Unknown route group"),
            }
        }

        if resolved_any {
            Self::Filter {
                patterns,
                include: true,
            }
        } else {
            Self::Unfiltered(Unfiltered::UnresolvedGroup(names.join(",")))
        }
    }

    /// Applies this policy to `registry`, returning a new registry.
    pub fn apply(&self, registry: &RouteRegistry) -> RouteRegistry {
        match self {
            Self::Unfiltered(_) => registry.clone(),
            Self::Filter { patterns, include } => filter(registry, patterns, *include),
        }
    }
}

/// Keeps (`include = true`) or drops (`include = false`) the routes whose
/// name matches any of `patterns`.
///
/// Patterns that fail to compile are skipped with a warning.
pub fn filter<P: AsRef<str>>(registry: &RouteRegistry, patterns: &[P], include: bool) -> RouteRegistry {
    let compiled: Vec<NamePattern> = patterns
        .iter()
        .filter_map(|p| match NamePattern::new(p.as_ref()) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!(error = %e, "Skipping route name pattern");
                None
            }
        })
        .collect();

    let filtered = registry.retain_names(|name| matches_any(&compiled, name) == include);
    debug!(
        include,
        before = registry.len(),
        after = filtered.len(),
        "Filtered routes"
    );
    filtered
}

/// Resolves the policy for `ctx` and applies it to `registry`.
pub fn apply_filters(registry: &RouteRegistry, ctx: &FilterContext<'_>) -> RouteRegistry {
    FilterPolicy::resolve(ctx).apply(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Method;
    use crate::route::{build_snapshot, DEFAULT_IGNORE_PREFIXES};
    use crate::source::RawRoute;

    fn registry(names: &[&str]) -> RouteRegistry {
        let routes = names
            .iter()
            .map(|n| RawRoute::new([Method::Get], &n.replace('.', "/")).named(*n))
            .collect();
        build_snapshot(routes, &DEFAULT_IGNORE_PREFIXES)
    }

    fn names(registry: &RouteRegistry) -> Vec<&str> {
        registry.names().collect()
    }

    fn groups(entries: &[(&str, FilterSpec)]) -> IndexMap<String, FilterSpec> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_filter_include() {
        let routes = registry(&["home", "posts.index", "posts.show"]);
        let filtered = filter(&routes, &["posts.*"], true);
        assert_eq!(names(&filtered), vec!["posts.index", "posts.show"]);
    }

    #[test]
    fn test_filter_exclude() {
        let routes = registry(&["home", "posts.index", "posts.show"]);
        let filtered = filter(&routes, &["posts.*"], false);
        assert_eq!(names(&filtered), vec!["home"]);
    }

    #[test]
    fn test_filter_empty_patterns() {
        let routes = registry(&["home", "posts.index"]);
        let none: [&str; 0] = [];
        assert!(filter(&routes, &none, true).is_empty());
        assert_eq!(filter(&routes, &none, false), routes);
    }

    #[test]
    fn test_filter_is_chainable() {
        let routes = registry(&["home", "posts.index", "posts.show", "posts.edit"]);
        let filtered = filter(&filter(&routes, &["posts.*"], true), &["*.edit"], false);
        assert_eq!(names(&filtered), vec!["posts.index", "posts.show"]);
    }

    #[test]
    fn test_no_filter() {
        let groups = IndexMap::new();
        let ctx = FilterContext {
            explicit_group: None,
            except: None,
            only: None,
            groups: &groups,
        };
        assert_eq!(
            FilterPolicy::resolve(&ctx),
            FilterPolicy::Unfiltered(Unfiltered::NoFilter)
        );
    }

    #[test]
    fn test_conflict_returns_unfiltered() {
        let groups = IndexMap::new();
        let except = FilterSpec::from("admin.*");
        let only = FilterSpec::from("posts.*");
        let ctx = FilterContext {
            explicit_group: None,
            except: Some(&except),
            only: Some(&only),
            groups: &groups,
        };
        assert_eq!(
            FilterPolicy::resolve(&ctx),
            FilterPolicy::Unfiltered(Unfiltered::Conflict)
        );
    }

    #[test]
    fn test_explicit_group_beats_conflict() {
        let groups = groups(&[("admin", FilterSpec::from("admin.*"))]);
        let except = FilterSpec::from("admin.*");
        let only = FilterSpec::from("posts.*");
        let selection = GroupSelection::from("admin");
        let ctx = FilterContext {
            explicit_group: Some(&selection),
            except: Some(&except),
            only: Some(&only),
            groups: &groups,
        };
        let routes = registry(&["admin.users", "posts.index"]);
        assert_eq!(names(&apply_filters(&routes, &ctx)), vec!["admin.users"]);
    }

    #[test]
    fn test_unknown_group_returns_unfiltered() {
        let groups = IndexMap::new();
        let only = FilterSpec::from("posts.*");
        let selection = GroupSelection::from("missing");
        let ctx = FilterContext {
            explicit_group: Some(&selection),
            except: None,
            only: Some(&only),
            groups: &groups,
        };
        assert_eq!(
            FilterPolicy::resolve(&ctx),
            FilterPolicy::Unfiltered(Unfiltered::UnresolvedGroup("missing".to_string()))
        );
    }

    #[test]
    fn test_empty_group_falls_through_to_config() {
        let groups = IndexMap::new();
        let only = FilterSpec::from("posts.*");
        let selection = GroupSelection::Many(Vec::new());
        let ctx = FilterContext {
            explicit_group: Some(&selection),
            except: None,
            only: Some(&only),
            groups: &groups,
        };
        assert_eq!(
            FilterPolicy::resolve(&ctx),
            FilterPolicy::Filter {
                patterns: vec!["posts.*".to_string()],
                include: true
            }
        );
    }

    #[test]
    fn test_group_list_unions_patterns() {
        let groups = groups(&[
            ("admin", FilterSpec::from("admin.*")),
            ("author", FilterSpec::from(vec!["posts.*", "home"])),
        ]);
        let selection = GroupSelection::from(vec!["admin", "missing", "author"]);
        let ctx = FilterContext {
            explicit_group: Some(&selection),
            except: None,
            only: None,
            groups: &groups,
        };
        let routes = registry(&["home", "admin.users", "posts.index", "users.index"]);
        assert_eq!(
            names(&apply_filters(&routes, &ctx)),
            vec!["home", "admin.users", "posts.index"]
        );
    }

    #[test]
    fn test_group_reference_in_spec() {
        let groups = groups(&[("admin", FilterSpec::from("admin.*"))]);
        let except = FilterSpec::Group {
            group: "admin".to_string(),
        };
        let ctx = FilterContext {
            explicit_group: None,
            except: Some(&except),
            only: None,
            groups: &groups,
        };
        let routes = registry(&["home", "admin.users"]);
        assert_eq!(names(&apply_filters(&routes, &ctx)), vec!["home"]);
    }

    #[test]
    fn test_missing_group_reference_in_only() {
        let groups = groups(&[("admin", FilterSpec::from("admin.*"))]);
        let only = FilterSpec::Group {
            group: "missing".to_string(),
        };
        let ctx = FilterContext {
            explicit_group: None,
            except: None,
            only: Some(&only),
            groups: &groups,
        };
        assert_eq!(
            FilterPolicy::resolve(&ctx),
            FilterPolicy::Unfiltered(Unfiltered::UnresolvedGroup("missing".to_string()))
        );
        let routes = registry(&["home", "admin.users"]);
        assert_eq!(names(&apply_filters(&routes, &ctx)), vec!["home", "admin.users"]);
    }

    #[test]
    fn test_group_cycle_is_unresolved() {
        let groups = groups(&[
            (
                "a",
                FilterSpec::Group {
                    group: "b".to_string(),
                },
            ),
            (
                "b",
                FilterSpec::Group {
                    group: "a".to_string(),
                },
            ),
        ]);
        let spec = FilterSpec::Group {
            group: "a".to_string(),
        };
        assert_eq!(spec.resolve(&groups), None);
    }

    #[test]
    fn test_filter_spec_deserialization() {
        let single: FilterSpec = serde_json::from_str(r#""admin.*""#).unwrap();
        assert_eq!(single, FilterSpec::from("admin.*"));

        let many: FilterSpec = serde_json::from_str(r#"["admin.*", "home"]"#).unwrap();
        assert_eq!(many, FilterSpec::from(vec!["admin.*", "home"]));

        let group: FilterSpec = serde_json::from_str(r#"{"group": "admin"}"#).unwrap();
        assert_eq!(
            group,
            FilterSpec::Group {
                group: "admin".to_string()
            }
        );
    }
}

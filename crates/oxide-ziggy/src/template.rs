//! URI template parsing.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

/// Matches `{name}`, `{name?}`, `{name:field}` and `{name:field?}`.
static PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)(?::(\w+))?(\?)?\}").expect("valid parameter regex"));

/// A parameter segment of a URI template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateParam {
    /// Parameter name.
    pub name: String,
    /// Whether the parameter may be omitted (`{name?}`).
    pub optional: bool,
}

/// A parsed URI template.
///
/// Templates are normalized without leading or trailing slashes, with the
/// root route written as `/`. Explicit binding fields (`{post:slug}`) are
/// stripped from the stored URI and kept in [`UriTemplate::binding_fields`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    uri: String,
    params: Vec<TemplateParam>,
    binding_fields: IndexMap<String, String>,
}

impl UriTemplate {
    /// Parses a URI template string.
    ///
    /// # Example
    ///
    /// ```
    /// use oxide_ziggy::UriTemplate;
    ///
    /// let template = UriTemplate::parse("/posts/{post:slug}/comments/{comment?}");
    /// assert_eq!(template.uri(), "posts/{post}/comments/{comment?}");
    /// assert_eq!(template.param_names(), vec!["post", "comment"]);
    /// assert_eq!(template.binding_fields().get("post").map(String::as_str), Some("slug"));
    /// ```
    pub fn parse(template: &str) -> Self {
        let trimmed = template.trim_matches('/');
        let mut params = Vec::new();
        let mut binding_fields = IndexMap::new();

        let uri = PARAM_RE.replace_all(trimmed, |caps: &regex::Captures<'_>| {
            let name = caps[1].to_string();
            let optional = caps.get(3).is_some();
            if let Some(field) = caps.get(2) {
                binding_fields.insert(name.clone(), field.as_str().to_string());
            }
            let rendered = format!("{{{name}{}}}", if optional { "?" } else { "" });
            params.push(TemplateParam { name, optional });
            rendered
        });

        let uri = if uri.is_empty() {
            "/".to_string()
        } else {
            uri.into_owned()
        };

        Self {
            uri,
            params,
            binding_fields,
        }
    }

    /// Joins a group prefix and a route path into one template.
    pub fn join(prefix: &str, path: &str) -> Self {
        let prefix = prefix.trim_matches('/');
        let path = path.trim_matches('/');
        match (prefix.is_empty(), path.is_empty()) {
            (true, _) => Self::parse(path),
            (false, true) => Self::parse(prefix),
            (false, false) => Self::parse(&format!("{prefix}/{path}")),
        }
    }

    /// Returns the normalized URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the template parameters in order.
    pub fn params(&self) -> &[TemplateParam] {
        &self.params
    }

    /// Returns the parameter names in order.
    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }

    /// Returns the explicit binding fields declared in the template.
    pub fn binding_fields(&self) -> &IndexMap<String, String> {
        &self.binding_fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_template() {
        let template = UriTemplate::parse("/users/");
        assert_eq!(template.uri(), "users");
        assert!(template.params().is_empty());
    }

    #[test]
    fn test_root_template() {
        assert_eq!(UriTemplate::parse("/").uri(), "/");
        assert_eq!(UriTemplate::parse("").uri(), "/");
    }

    #[test]
    fn test_optional_param() {
        let template = UriTemplate::parse("archive/{year}/{month?}");
        assert_eq!(
            template.params(),
            &[
                TemplateParam {
                    name: "year".to_string(),
                    optional: false
                },
                TemplateParam {
                    name: "month".to_string(),
                    optional: true
                },
            ]
        );
        assert_eq!(template.uri(), "archive/{year}/{month?}");
    }

    #[test]
    fn test_binding_field_is_stripped() {
        let template = UriTemplate::parse("users/{user}/posts/{post:slug?}");
        assert_eq!(template.uri(), "users/{user}/posts/{post?}");
        assert_eq!(template.binding_fields().len(), 1);
        assert_eq!(template.binding_fields()["post"], "slug");
    }

    #[test]
    fn test_join() {
        assert_eq!(UriTemplate::join("/admin/", "/users").uri(), "admin/users");
        assert_eq!(UriTemplate::join("", "users").uri(), "users");
        assert_eq!(UriTemplate::join("admin", "/").uri(), "admin");
        assert_eq!(UriTemplate::join("", "/").uri(), "/");
    }
}

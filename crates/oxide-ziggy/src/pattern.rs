//! Route name patterns.

use regex::Regex;

use crate::error::{Result, ZiggyError};

/// A shell-style route name pattern.
///
/// `*` matches any run of characters, dots included, so `admin.*` matches
/// `admin.users` as well as `admin.users.show`. Every other character is
/// literal. Matching is case-sensitive and anchored to the whole name.
#[derive(Debug, Clone)]
pub struct NamePattern {
    pattern: String,
    regex: Regex,
}

impl NamePattern {
    /// Compiles a pattern.
    ///
    /// # Example
    ///
    /// ```
    /// use oxide_ziggy::NamePattern;
    ///
    /// let pattern = NamePattern::new("posts.*").unwrap();
    /// assert!(pattern.matches("posts.show"));
    /// assert!(!pattern.matches("admin.posts.show"));
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        let regex_str = format!("^{}\\z", regex::escape(pattern).replace(r"\*", ".*"));
        let regex = Regex::new(&regex_str)
            .map_err(|e| ZiggyError::InvalidPattern(format!("{pattern}: {e}")))?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Returns the original pattern string.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns true if `name` matches this pattern.
    pub fn matches(&self, name: &str) -> bool {
        self.pattern == name || self.regex.is_match(name)
    }
}

/// Returns true if `name` matches any of `patterns`.
pub fn matches_any(patterns: &[NamePattern], name: &str) -> bool {
    patterns.iter().any(|p| p.matches(name))
}

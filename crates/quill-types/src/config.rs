//! Configuration types and structures.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use crate::{DisplayColor, SeverityLevel};

/// Flat string options handed to a sink factory.
///
/// Immutable once built. Keys a factory does not recognize are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SinkOptions(HashMap<String, String>);

impl SinkOptions {
    /// Create an empty option map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Get the value for `key`, or `default` when the key is absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SinkOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<HashMap<String, String>> for SinkOptions {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

/// Pairs a severity with the color its messages are painted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelColorRule {
    /// Breakpoint level
    pub level: SeverityLevel,
    /// Color for messages resolved to this breakpoint
    pub color: DisplayColor,
}

impl LevelColorRule {
    /// Create a rule.
    pub const fn new(level: SeverityLevel, color: DisplayColor) -> Self {
        Self { level, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_lookup() {
        let options: SinkOptions = [("file-name", "app.log"), ("unknown", "x")]
            .into_iter()
            .collect();

        assert_eq!(options.get("file-name"), Some("app.log"));
        assert_eq!(options.get_or("layout-pattern", "%message"), "%message");
        assert_eq!(options.get_or("file-name", "must.log"), "app.log");
        assert!(options.contains("unknown"));
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_options_deserialize_from_yaml() {
        let options: SinkOptions = serde_yaml::from_str("file-name: app.log\nlevel: DEBUG\n").unwrap();
        assert_eq!(options.get("level"), Some("DEBUG"));
    }

    #[test]
    fn test_rule_deserialize() {
        let rule: LevelColorRule = serde_yaml::from_str("level: ERROR\ncolor: red\n").unwrap();
        assert_eq!(rule, LevelColorRule::new(SeverityLevel::Error, DisplayColor::Red));
    }
}

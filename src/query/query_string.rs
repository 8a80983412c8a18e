//! # Query String
//!
//! Decoded query-string multimap. Keys keep their first-seen order and
//! every occurrence of a repeated key is retained.

use indexmap::IndexMap;
use url::form_urlencoded;

/// Decoded query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    values: IndexMap<String, Vec<String>>,
}

impl QueryString {
    /// Parse a raw query string (without the leading `?`).
    ///
    /// Values are percent-decoded exactly once; `+` decodes to a space.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut values: IndexMap<String, Vec<String>> = IndexMap::new();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            values
                .entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }
        Self { values }
    }

    /// Build from already-decoded pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut values: IndexMap<String, Vec<String>> = IndexMap::new();
        for (key, value) in pairs {
            values.entry(key.into()).or_default().push(value.into());
        }
        Self { values }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Every value given for `key`, in request order
    pub fn all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The last value given for `key`
    pub fn last(&self, key: &str) -> Option<&str> {
        self.all(key).last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_keys() {
        let qs = QueryString::parse("Tags=big&Tags=brown&Age=4");
        assert_eq!(qs.all("Tags"), ["big", "brown"]);
        assert_eq!(qs.last("Age"), Some("4"));
        assert_eq!(qs.keys().collect::<Vec<_>>(), vec!["Tags", "Age"]);
    }

    #[test]
    fn test_decodes_once() {
        let qs = QueryString::parse("?Tags=big%20brown&Name=a+b&Pct=%2541");
        assert_eq!(qs.last("Tags"), Some("big brown"));
        assert_eq!(qs.last("Name"), Some("a b"));
        assert_eq!(qs.last("Pct"), Some("%41"));
    }

    #[test]
    fn test_missing_key() {
        let qs = QueryString::parse("");
        assert!(qs.is_empty());
        assert!(qs.all("Age").is_empty());
        assert_eq!(qs.last("Age"), None);
    }
}

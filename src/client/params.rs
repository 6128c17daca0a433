//! Query parameters in the bracketed form Canvas expects.

use serde_json::Value;

/// Ordered query parameters.
///
/// Nested JSON is flattened the way Canvas reads form and query input:
///
/// ```
/// use canvasapi::Params;
/// use serde_json::json;
///
/// let params = Params::from_json(&json!({
///     "course": {"name": "Biology"},
///     "include": ["email", "avatar_url"],
/// }));
///
/// assert_eq!(params.get("course[name]"), Some("Biology"));
/// assert_eq!(params.get_all("include[]"), vec!["email", "avatar_url"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a JSON object into parameters. Non-object values yield nothing.
    pub fn from_json(value: &Value) -> Self {
        let mut params = Self::new();
        if let Value::Object(map) = value {
            for (key, value) in map {
                params.push_value(key, value);
            }
        }
        params
    }

    /// Append a single key/value pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Append every pair of `other`.
    pub fn extend(&mut self, other: Params) {
        self.0.extend(other.0);
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values stored under `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Check if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Check if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the pairs.
    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }

    fn push_value(&mut self, key: &str, value: &Value) {
        match value {
            Value::Null => {}
            Value::String(s) => self.push(key, s.as_str()),
            Value::Bool(b) => self.push(key, b.to_string()),
            Value::Number(n) => self.push(key, n.to_string()),
            Value::Array(items) => {
                let key = format!("{key}[]");
                for item in items {
                    self.push_value(&key, item);
                }
            }
            Value::Object(map) => {
                for (sub, value) in map {
                    self.push_value(&format!("{key}[{sub}]"), value);
                }
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_objects() {
        let params = Params::from_json(&json!({
            "assignment": {"name": "Essay", "points_possible": 10, "published": true}
        }));
        assert_eq!(params.get("assignment[name]"), Some("Essay"));
        assert_eq!(params.get("assignment[points_possible]"), Some("10"));
        assert_eq!(params.get("assignment[published]"), Some("true"));
    }

    #[test]
    fn test_arrays_and_nested_arrays() {
        let params = Params::from_json(&json!({
            "enrollment_type": ["student", "ta"],
            "module": {"prerequisite_module_ids": [1, 2]}
        }));
        assert_eq!(params.get_all("enrollment_type[]"), vec!["student", "ta"]);
        assert_eq!(
            params.get_all("module[prerequisite_module_ids][]"),
            vec!["1", "2"]
        );
    }

    #[test]
    fn test_nulls_are_dropped() {
        let params = Params::from_json(&json!({"search_term": null, "page": 2}));
        assert!(!params.contains_key("search_term"));
        assert_eq!(params.get("page"), Some("2"));
    }

    #[test]
    fn test_non_object_is_empty() {
        assert!(Params::from_json(&json!([1, 2])).is_empty());
        assert!(Params::from_json(&json!("x")).is_empty());
    }

    #[test]
    fn test_builder_and_collect() {
        let params = Params::new().with("event", "conclude");
        assert_eq!(params.as_slice(), &[("event".to_string(), "conclude".to_string())]);

        let collected: Params = vec![("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(collected.get("b"), Some("2"));
    }
}

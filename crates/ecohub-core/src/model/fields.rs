use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{EcoHubError, Result};

/// Field names the store assigns itself; callers cannot set them
pub const SYSTEM_FIELDS: [&str; 3] = ["id", "created_date", "updated_date"];

/// Schema-less field mapping for a record
///
/// Any key may hold any JSON value; nothing is enforced across records of
/// the same collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(Map<String, Value>);

impl Fields {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build from an arbitrary JSON value, which must be an object
    ///
    /// # Errors
    ///
    /// Returns `InvalidFields` if `value` is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(EcoHubError::InvalidFields {
                reason: format!("expected a mapping, got {}", json_type_name(&other)),
            }),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of any store-assigned fields present in this mapping
    pub fn system_keys(&self) -> Vec<&'static str> {
        SYSTEM_FIELDS
            .iter()
            .copied()
            .filter(|key| self.0.contains_key(*key))
            .collect()
    }

    /// Drop store-assigned fields; they are never taken from callers
    pub(crate) fn strip_system_fields(&mut self) {
        for key in SYSTEM_FIELDS {
            self.0.remove(key);
        }
    }

    /// Shallow merge: keys in `updates` replace keys here
    pub(crate) fn merge(&mut self, updates: Fields) {
        for (key, value) in updates.0 {
            self.0.insert(key, value);
        }
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Fields {
    type Error = EcoHubError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_requires_object() {
        assert!(Fields::from_value(json!({"title": "t"})).is_ok());

        let err = Fields::from_value(json!(["not", "a", "map"])).unwrap_err();
        match err {
            EcoHubError::InvalidFields { reason } => assert!(reason.contains("sequence")),
            other => panic!("Expected InvalidFields, got {:?}", other),
        }
    }

    #[test]
    fn test_strip_system_fields() {
        let mut fields = Fields::new()
            .with("id", 99)
            .with("created_date", "1970-01-01T00:00:00.000Z")
            .with("title", "kept");

        assert_eq!(fields.system_keys(), vec!["id", "created_date"]);
        fields.strip_system_fields();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("title"), Some(&json!("kept")));
    }

    #[test]
    fn test_merge_replaces_and_preserves() {
        let mut fields = Fields::new().with("title", "old").with("points", 10);
        fields.merge(Fields::new().with("title", "new").with("likes", 3));

        assert_eq!(fields.get("title"), Some(&json!("new")));
        assert_eq!(fields.get("points"), Some(&json!(10)));
        assert_eq!(fields.get("likes"), Some(&json!(3)));
    }
}

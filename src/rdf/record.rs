//! Serialized records handed over by the REST layer
//!
//! A record is the flat field → value mapping produced for one resource,
//! plus its `resource_uri`. Related resources may be inlined as nested
//! records, which carry their own `resource_uri`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const RESOURCE_URI: &str = "resource_uri";

/// One serialized resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedRecord {
    /// Canonical identifier of the resource, usually a path such as
    /// `/api/v1/entry/1/`
    pub resource_uri: String,
    /// Field values in serialization order
    #[serde(flatten)]
    pub fields: IndexMap<String, Value>,
}

impl SerializedRecord {
    pub fn new(resource_uri: impl Into<String>) -> Self {
        Self {
            resource_uri: resource_uri.into(),
            fields: IndexMap::new(),
        }
    }

    /// Builder-style field setter
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }
}

/// `resource_uri` of a nested record value, if the value is one
pub fn nested_resource_uri(value: &Value) -> Option<&str> {
    value.as_object()?.get(RESOURCE_URI)?.as_str()
}

/// Plain string form of a scalar value, as used in URI templates
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_field_order() {
        let record = SerializedRecord::from_json(
            r#"{"title": "Hello", "resource_uri": "/api/v1/entry/1/", "body": "Text", "id": 1}"#,
        )
        .unwrap();
        assert_eq!(record.resource_uri, "/api/v1/entry/1/");
        let names: Vec<_> = record.fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["title", "body", "id"]);
    }

    #[test]
    fn test_nested_resource_uri() {
        let user = json!({"resource_uri": "/api/v1/user/1/", "username": "alice"});
        assert_eq!(nested_resource_uri(&user), Some("/api/v1/user/1/"));
        assert_eq!(nested_resource_uri(&json!("/api/v1/user/1/")), None);
        assert_eq!(nested_resource_uri(&json!({"username": "bob"})), None);
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!("hello-world")), "hello-world");
        assert_eq!(scalar_text(&json!(7)), "7");
    }
}

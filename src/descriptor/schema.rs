//! # Response Schemas
//!
//! The subset of JSON Schema that drives response shaping: type, format,
//! array items, object properties (declaration order preserved) and
//! defaults.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    File,
    Null,
}

/// A (possibly nested) schema
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Schema {
    /// A schema of the given type
    pub fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Default::default()
        }
    }

    /// An array of `items`
    pub fn array_of(items: Schema) -> Self {
        Self {
            schema_type: Some(SchemaType::Array),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    /// Set the format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn is_array(&self) -> bool {
        self.schema_type == Some(SchemaType::Array)
    }

    /// Whether the schema describes an object (explicitly or by properties)
    pub fn is_object(&self) -> bool {
        match self.schema_type {
            Some(SchemaType::Object) => true,
            None => self.properties.is_some(),
            _ => false,
        }
    }

    /// The single array-typed property of an envelope object.
    ///
    /// Returns `None` unless the schema is an object with exactly one
    /// array property.
    pub fn envelope_property(&self) -> Option<(&str, &Schema)> {
        if !self.is_object() {
            return None;
        }

        let mut arrays = self
            .properties
            .as_ref()?
            .iter()
            .filter(|(_, prop)| prop.is_array());

        let (name, prop) = arrays.next()?;
        if arrays.next().is_some() {
            return None;
        }
        Some((name.as_str(), prop))
    }

    /// Item schema of an array schema
    pub fn item_schema(&self) -> Option<&Schema> {
        self.items.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope() -> Schema {
        serde_json::from_value(json!({
            "properties": {
                "code": {"type": "integer", "default": 42},
                "message": {"type": "string", "default": "hello world"},
                "error": {},
                "result": {"type": "array", "items": {"type": "object"}}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_envelope_detection() {
        let schema = envelope();
        assert!(schema.is_object());
        let (name, prop) = schema.envelope_property().unwrap();
        assert_eq!(name, "result");
        assert!(prop.is_array());
    }

    #[test]
    fn test_bare_array_is_not_envelope() {
        let schema = Schema::array_of(Schema::of(SchemaType::String));
        assert!(schema.envelope_property().is_none());
    }

    #[test]
    fn test_two_arrays_is_not_envelope() {
        let schema: Schema = serde_json::from_value(json!({
            "type": "object",
            "properties": {
                "a": {"type": "array"},
                "b": {"type": "array"}
            }
        }))
        .unwrap();
        assert!(schema.envelope_property().is_none());
    }

    #[test]
    fn test_property_order_is_preserved() {
        let schema = envelope();
        let names: Vec<&String> = schema.properties.as_ref().unwrap().keys().collect();
        assert_eq!(names, vec!["code", "message", "error", "result"]);
    }

    #[test]
    fn test_unknown_keywords_are_ignored() {
        let schema: Schema = serde_json::from_value(json!({
            "type": "string",
            "format": "date",
            "description": "Birthday",
            "example": "2000-01-01"
        }))
        .unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::String));
        assert_eq!(schema.format.as_deref(), Some("date"));
    }
}

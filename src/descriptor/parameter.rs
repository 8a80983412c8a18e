//! # Parameter Declarations
//!
//! Swagger 2.0 style parameter objects. Only `in: query` parameters take
//! part in collection filtering.

use serde::{Deserialize, Serialize};

use super::schema::Schema;

/// Where a parameter is carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamLocation {
    Query,
    Path,
    Header,
    FormData,
    Body,
}

/// Primitive parameter types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    File,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::File => "file",
        }
    }
}

/// Encoding of multi-valued parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionFormat {
    /// Comma separated (`a,b`)
    #[default]
    Csv,
    /// Space separated (`a b`)
    Ssv,
    /// Tab separated
    Tsv,
    /// Pipe separated (`a|b`)
    Pipes,
    /// Repeated key (`k=a&k=b`)
    Multi,
}

impl CollectionFormat {
    /// Split one decoded query value into candidates.
    ///
    /// `Multi` never splits; each occurrence of the key is one value.
    pub fn split<'a>(&self, raw: &'a str) -> Vec<&'a str> {
        match self {
            CollectionFormat::Csv => raw.split(',').collect(),
            CollectionFormat::Ssv => raw.split(' ').collect(),
            CollectionFormat::Tsv => raw.split('\t').collect(),
            CollectionFormat::Pipes => raw.split('|').collect(),
            CollectionFormat::Multi => vec![raw],
        }
    }
}

/// Array item declaration of a parameter
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemsDescriptor {
    #[serde(rename = "type", default)]
    pub item_type: Option<ParamType>,

    #[serde(default)]
    pub format: Option<String>,
}

/// A declared operation parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParamLocation,

    #[serde(rename = "type", default)]
    pub param_type: Option<ParamType>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub items: Option<ItemsDescriptor>,

    #[serde(rename = "collectionFormat", default)]
    pub collection_format: CollectionFormat,

    #[serde(default)]
    pub required: bool,

    /// Body parameters carry a schema instead of a type
    #[serde(default)]
    pub schema: Option<Schema>,
}

impl ParameterDescriptor {
    /// A query parameter of the given type
    pub fn query(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            location: ParamLocation::Query,
            param_type: Some(param_type),
            format: None,
            items: None,
            collection_format: CollectionFormat::default(),
            required: false,
            schema: None,
        }
    }

    /// An array query parameter with string items
    pub fn query_array(name: impl Into<String>, format: CollectionFormat) -> Self {
        Self {
            items: Some(ItemsDescriptor {
                item_type: Some(ParamType::String),
                format: None,
            }),
            collection_format: format,
            ..Self::query(name, ParamType::Array)
        }
    }

    pub fn is_query(&self) -> bool {
        self.location == ParamLocation::Query
    }

    pub fn is_array(&self) -> bool {
        self.param_type == Some(ParamType::Array)
    }

    /// Declared type of array items (string when unspecified)
    pub fn item_type(&self) -> ParamType {
        self.items
            .as_ref()
            .and_then(|items| items.item_type)
            .unwrap_or(ParamType::String)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_format_split() {
        assert_eq!(CollectionFormat::Csv.split("big,brown"), vec!["big", "brown"]);
        assert_eq!(CollectionFormat::Pipes.split("big|brown"), vec!["big", "brown"]);
        assert_eq!(CollectionFormat::Ssv.split("big brown"), vec!["big", "brown"]);
        assert_eq!(CollectionFormat::Tsv.split("big\tbrown"), vec!["big", "brown"]);
        assert_eq!(CollectionFormat::Multi.split("big,brown"), vec!["big,brown"]);
    }

    #[test]
    fn test_deserialize_swagger_parameter() {
        let param: ParameterDescriptor = serde_json::from_value(json!({
            "name": "Tags",
            "in": "query",
            "type": "array",
            "items": {"type": "string"},
            "collectionFormat": "pipes"
        }))
        .unwrap();

        assert!(param.is_query());
        assert!(param.is_array());
        assert_eq!(param.collection_format, CollectionFormat::Pipes);
        assert_eq!(param.item_type(), ParamType::String);
    }

    #[test]
    fn test_collection_format_defaults_to_csv() {
        let param: ParameterDescriptor = serde_json::from_value(json!({
            "name": "Age", "in": "query", "type": "integer"
        }))
        .unwrap();
        assert_eq!(param.collection_format, CollectionFormat::Csv);
        assert!(!param.required);
    }

    #[test]
    fn test_form_data_location() {
        let param: ParameterDescriptor = serde_json::from_value(json!({
            "name": "Photo", "in": "formData", "type": "file"
        }))
        .unwrap();
        assert_eq!(param.location, ParamLocation::FormData);
        assert_eq!(param.param_type, Some(ParamType::File));
    }
}

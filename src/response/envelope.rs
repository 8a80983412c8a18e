//! # Response Shaping
//!
//! Decides whether rendered items go out as a bare array or nested in an
//! envelope object, and which schema describes each item.

use serde_json::{Map, Value};

use crate::descriptor::Schema;

/// Body layout derived from a response schema
#[derive(Debug, Clone, PartialEq)]
pub enum BodyShape<'a> {
    /// A bare array of items
    Bare { items: Option<&'a Schema> },
    /// An object with one array property plus defaulted siblings
    Envelope {
        schema: &'a Schema,
        property: &'a str,
        items: Option<&'a Schema>,
    },
}

impl<'a> BodyShape<'a> {
    /// Classify a response schema
    pub fn of(schema: &'a Schema) -> Self {
        if let Some((property, array)) = schema.envelope_property() {
            return BodyShape::Envelope {
                schema,
                property,
                items: array.item_schema(),
            };
        }

        if schema.is_array() {
            BodyShape::Bare {
                items: schema.item_schema(),
            }
        } else {
            BodyShape::Bare {
                items: Some(schema),
            }
        }
    }

    /// Schema of each item
    pub fn item_schema(&self) -> Option<&'a Schema> {
        match self {
            BodyShape::Bare { items } => *items,
            BodyShape::Envelope { items, .. } => *items,
        }
    }

    /// Wrap rendered items into the final body
    pub fn wrap(&self, items: Vec<Value>) -> Value {
        match self {
            BodyShape::Bare { .. } => Value::Array(items),
            BodyShape::Envelope {
                schema, property, ..
            } => {
                let mut body = Map::new();
                let mut items = Some(items);
                for (name, prop) in schema.properties.iter().flatten() {
                    if name == property {
                        body.insert(name.clone(), Value::Array(items.take().unwrap_or_default()));
                    } else if let Some(default) = &prop.default {
                        body.insert(name.clone(), default.clone());
                    }
                }
                Value::Object(body)
            }
        }
    }
}

//! # Item Coercion
//!
//! Each resource's data is rendered as JSON according to the declared
//! item schema. The schema is classified once per response into an
//! [`ItemKind`] and applied to every item.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::descriptor::{Schema, SchemaType};
use crate::store::ResourceData;
use crate::upload;

/// Rendering rule for response items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// No declared type
    Any,
    /// `type: string` without a date format
    Text,
    /// `type: string, format: date`
    Date,
    /// `type: string, format: date-time`
    DateTime,
    /// number, integer and boolean
    Primitive,
    /// Objects and arrays
    Structured,
    /// `type: file`
    File,
}

impl ItemKind {
    /// Classify an item schema
    pub fn from_schema(schema: Option<&Schema>) -> Self {
        let Some(schema) = schema else {
            return ItemKind::Any;
        };

        match schema.schema_type {
            Some(SchemaType::String) => match schema.format.as_deref() {
                Some("date") => ItemKind::Date,
                Some("date-time") => ItemKind::DateTime,
                _ => ItemKind::Text,
            },
            Some(SchemaType::Number | SchemaType::Integer | SchemaType::Boolean) => {
                ItemKind::Primitive
            }
            Some(SchemaType::Array | SchemaType::Object) => ItemKind::Structured,
            Some(SchemaType::File) => ItemKind::File,
            Some(SchemaType::Null) => ItemKind::Any,
            None if schema.properties.is_some() => ItemKind::Structured,
            None => ItemKind::Any,
        }
    }

    /// Render one resource's data.
    ///
    /// File items expand to every upload record held by the data, so one
    /// resource may yield several values.
    pub fn render(&self, data: &ResourceData) -> Vec<Value> {
        match (self, data) {
            (_, ResourceData::Undefined) => vec![Value::Null],
            (ItemKind::File, ResourceData::Json(value)) => {
                let records = upload::records_in(value);
                if records.is_empty() {
                    vec![value.clone()]
                } else {
                    records.iter().map(|r| r.to_value()).collect()
                }
            }
            (kind, data) => vec![kind.render_one(data)],
        }
    }

    fn render_one(&self, data: &ResourceData) -> Value {
        match (self, data) {
            (_, ResourceData::Undefined) => Value::Null,

            (ItemKind::Date, ResourceData::Timestamp(at)) => Value::String(format_date(at)),
            (_, ResourceData::Timestamp(at)) => Value::String(format_date_time(at)),

            (ItemKind::Text | ItemKind::Date | ItemKind::DateTime, ResourceData::Binary(bytes)) => {
                Value::String(String::from_utf8_lossy(bytes).into_owned())
            }
            (_, ResourceData::Binary(bytes)) => buffer_json(bytes),

            (ItemKind::Date, ResourceData::Json(Value::String(s))) => parse_timestamp(s)
                .map(|at| Value::String(format_date(&at)))
                .unwrap_or_else(|| Value::String(s.clone())),
            (ItemKind::DateTime, ResourceData::Json(Value::String(s))) => parse_timestamp(s)
                .map(|at| Value::String(format_date_time(&at)))
                .unwrap_or_else(|| Value::String(s.clone())),
            (_, ResourceData::Json(value)) => value.clone(),
        }
    }
}

/// `{"type":"Buffer","data":[..]}` representation of raw bytes
pub fn buffer_json(bytes: &[u8]) -> Value {
    json!({ "type": "Buffer", "data": bytes })
}

/// `YYYY-MM-DD`
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// ISO-8601 with milliseconds and a `Z` suffix
pub fn format_date_time(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

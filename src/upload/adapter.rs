//! # Upload Record Adapter
//!
//! Merges decoded form fields and uploaded files into the data stored for
//! a resource, and finds the records again when a response is built.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::record::{final_segment, UploadDescriptor, UploadRecord};

/// Merge form fields and upload records into one object.
///
/// A field name carrying several files maps to an array of records.
pub fn adapt(descriptors: &[UploadDescriptor], fields: &IndexMap<String, Value>) -> Value {
    let mut data: Map<String, Value> = fields
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let mut grouped: IndexMap<&str, Vec<Value>> = IndexMap::new();
    for descriptor in descriptors {
        grouped
            .entry(descriptor.fieldname.as_str())
            .or_default()
            .push(UploadRecord::from_descriptor(descriptor).to_value());
    }

    for (fieldname, mut records) in grouped {
        let value = if records.len() == 1 {
            records.remove(0)
        } else {
            Value::Array(records)
        };
        data.insert(fieldname.to_string(), value);
    }

    Value::Object(data)
}

/// Every upload record held by resource data.
///
/// The data itself may be a record; otherwise each top-level property
/// holding a record or an array of records contributes.
pub fn records_in(data: &Value) -> Vec<UploadRecord> {
    if let Some(record) = UploadRecord::from_value(data) {
        return vec![record];
    }

    let Some(obj) = data.as_object() else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for value in obj.values() {
        match value {
            Value::Array(items) => {
                records.extend(items.iter().filter_map(UploadRecord::from_value));
            }
            other => records.extend(UploadRecord::from_value(other)),
        }
    }
    records
}

/// `Content-Disposition` naming the whole response after the request URL
pub fn attachment_disposition(request_path: &str) -> String {
    let path = request_path.split(['?', '#']).next().unwrap_or("");
    format!("attachment; filename=\"{}\"", final_segment(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upload(field: &str, original: &str, stored: &str) -> UploadDescriptor {
        UploadDescriptor {
            fieldname: field.to_string(),
            originalname: original.to_string(),
            encoding: "7bit".to_string(),
            mimetype: "image/jpeg".to_string(),
            path: format!("/uploads/{}", stored),
            size: 100,
        }
    }

    #[test]
    fn test_adapt_merges_fields_and_files() {
        let mut fields = IndexMap::new();
        fields.insert("Name".to_string(), json!("Fido"));
        fields.insert("Type".to_string(), json!("dog"));

        let data = adapt(&[upload("Photo", "fido.jpg", "a1")], &fields);
        assert_eq!(data["Name"], json!("Fido"));
        assert_eq!(data["Photo"]["name"], json!("a1"));
        assert_eq!(data["Photo"]["extension"], json!("jpg"));
    }

    #[test]
    fn test_adapt_groups_repeated_fields() {
        let data = adapt(
            &[upload("Photos", "a.png", "a1"), upload("Photos", "b.gif", "b2")],
            &IndexMap::new(),
        );
        let photos = data["Photos"].as_array().unwrap();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[1]["originalname"], json!("b.gif"));
    }

    #[test]
    fn test_records_in_data() {
        let data = adapt(
            &[
                upload("Photo", "a.png", "a1"),
                upload("Thumbs", "b.png", "b2"),
                upload("Thumbs", "c.png", "c3"),
            ],
            &IndexMap::new(),
        );
        let records = records_in(&data);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a1", "b2", "c3"]);

        let single = records_in(&data["Photo"]);
        assert_eq!(single.len(), 1);
        assert!(records_in(&json!({"Name": "Fido"})).is_empty());
        assert!(records_in(&json!("text")).is_empty());
    }

    #[test]
    fn test_attachment_disposition() {
        assert_eq!(
            attachment_disposition("/api/pets/Fido/photos"),
            "attachment; filename=\"photos\""
        );
        assert_eq!(
            attachment_disposition("/api/pets/Fido/photos/?x=1"),
            "attachment; filename=\"photos\""
        );
    }
}

//! # Upload Records

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An already-decoded uploaded file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadDescriptor {
    pub fieldname: String,
    pub originalname: String,
    pub encoding: String,
    pub mimetype: String,
    /// Where the file was written
    pub path: String,
    pub size: u64,
}

/// Persisted form of an uploaded file.
///
/// `buffer` is always `null`: the record references storage, not content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub fieldname: String,
    pub originalname: String,
    pub name: String,
    pub encoding: String,
    pub mimetype: String,
    pub path: String,
    pub extension: String,
    pub size: u64,
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub buffer: Option<Value>,
}

impl UploadRecord {
    /// Build the record for a stored file
    pub fn from_descriptor(descriptor: &UploadDescriptor) -> Self {
        Self {
            fieldname: descriptor.fieldname.clone(),
            originalname: descriptor.originalname.clone(),
            name: final_segment(&descriptor.path).to_string(),
            encoding: descriptor.encoding.clone(),
            mimetype: descriptor.mimetype.clone(),
            path: descriptor.path.clone(),
            extension: extension_of(&descriptor.originalname),
            size: descriptor.size,
            truncated: false,
            buffer: None,
        }
    }

    /// Read a record back out of resource data
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        if !(obj.contains_key("fieldname") && obj.contains_key("path")) {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Lower-case extension of a file name, without the dot
pub fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Final segment of a `/` or `\` separated path
pub fn final_segment(path: &str) -> &str {
    path.trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
}

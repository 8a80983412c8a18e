//! # Resources
//!
//! A resource is one stored item, addressed by its collection path and
//! name. The name `/` is reserved for the collection's own root resource.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Payload carried by a resource
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResourceData {
    /// No data at all (rendered as `null`)
    #[default]
    Undefined,
    /// Structured JSON data (objects, arrays, scalars)
    Json(Value),
    /// Raw bytes
    Binary(Vec<u8>),
    /// A point in time
    Timestamp(DateTime<Utc>),
}

impl ResourceData {
    /// Borrow the JSON payload, if any
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResourceData::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, ResourceData::Undefined)
    }
}

impl From<Value> for ResourceData {
    fn from(value: Value) -> Self {
        ResourceData::Json(value)
    }
}

impl From<&str> for ResourceData {
    fn from(value: &str) -> Self {
        ResourceData::Json(Value::String(value.to_string()))
    }
}

impl From<String> for ResourceData {
    fn from(value: String) -> Self {
        ResourceData::Json(Value::String(value))
    }
}

impl From<Vec<u8>> for ResourceData {
    fn from(bytes: Vec<u8>) -> Self {
        ResourceData::Binary(bytes)
    }
}

impl From<&[u8]> for ResourceData {
    fn from(bytes: &[u8]) -> Self {
        ResourceData::Binary(bytes.to_vec())
    }
}

impl From<DateTime<Utc>> for ResourceData {
    fn from(at: DateTime<Utc>) -> Self {
        ResourceData::Timestamp(at)
    }
}

/// A stored item
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Collection path, e.g. `/api/pets`
    pub collection: String,
    /// Name within the collection, always with a leading slash
    pub name: String,
    pub data: ResourceData,
    /// Refreshed by the store on every save
    pub modified_on: DateTime<Utc>,
}

impl Resource {
    /// Create a resource in `collection` named `name`
    pub fn new(
        collection: impl AsRef<str>,
        name: impl AsRef<str>,
        data: impl Into<ResourceData>,
    ) -> Self {
        Self {
            collection: normalize_collection(collection.as_ref()),
            name: normalize_name(name.as_ref()),
            data: data.into(),
            modified_on: Utc::now(),
        }
    }

    /// Create a resource from its full path.
    ///
    /// The last path segment becomes the name: `/api/pets/Fido` is the
    /// resource `/Fido` in the collection `/api/pets`. A trailing slash
    /// addresses the root resource: `/api/pets/` is `/` in `/api/pets`.
    pub fn from_path(path: impl AsRef<str>, data: impl Into<ResourceData>) -> Self {
        let path = path.as_ref();
        if path.len() > 1 && path.ends_with('/') {
            return Self::new(path, "/", data);
        }

        let path = normalize_collection(path);
        let (collection, name) = match path.rfind('/') {
            Some(0) if path.len() == 1 => ("/", "/"),
            Some(idx) => (&path[..idx], &path[idx..]),
            None => ("/", path.as_str()),
        };
        Self::new(collection, name, data)
    }

    /// Create a resource without data
    pub fn empty(path: impl AsRef<str>) -> Self {
        Self::from_path(path, ResourceData::Undefined)
    }

    /// Whether this is the collection's root resource
    pub fn is_root(&self) -> bool {
        self.name == "/"
    }

    /// Full path of the resource (collection + name)
    pub fn path(&self) -> String {
        if self.collection == "/" {
            self.name.clone()
        } else {
            format!("{}{}", self.collection, self.name)
        }
    }
}

/// Strip a trailing slash and make sure the path is absolute
pub fn normalize_collection(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn normalize_name(name: &str) -> String {
    if name.starts_with('/') {
        name.to_string()
    } else {
        format!("/{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_path_splits_last_segment() {
        let res = Resource::from_path("/api/pets/Fido", json!({"Name": "Fido"}));
        assert_eq!(res.collection, "/api/pets");
        assert_eq!(res.name, "/Fido");
        assert_eq!(res.path(), "/api/pets/Fido");
    }

    #[test]
    fn test_root_resource() {
        let res = Resource::new("/api/pets", "/", "This is the root resource");
        assert!(res.is_root());
        assert_eq!(res.collection, "/api/pets");
        assert_eq!(res.path(), "/api/pets/");
    }

    #[test]
    fn test_trailing_slash_addresses_root() {
        let res = Resource::from_path("/api/pets/", "This is the root resource");
        assert!(res.is_root());
        assert_eq!(res.collection, "/api/pets");
        assert_eq!(res.path(), "/api/pets/");

        let res = Resource::from_path("/", json!(1));
        assert_eq!(res.collection, "/");
        assert_eq!(res.name, "/");
    }

    #[test]
    fn test_name_gets_leading_slash() {
        let res = Resource::new("/api/pets/", "Fido", ResourceData::Undefined);
        assert_eq!(res.collection, "/api/pets");
        assert_eq!(res.name, "/Fido");
    }

    #[test]
    fn test_top_level_resource() {
        let res = Resource::from_path("/pets", json!(1));
        assert_eq!(res.collection, "/");
        assert_eq!(res.name, "/pets");
        assert_eq!(res.path(), "/pets");
    }

    #[test]
    fn test_data_conversions() {
        assert_eq!(ResourceData::from("x"), ResourceData::Json(json!("x")));
        assert_eq!(
            ResourceData::from(b"hi".as_slice()),
            ResourceData::Binary(vec![104, 105])
        );
        assert!(ResourceData::default().is_undefined());
    }
}

//! # Mock Requests

use indexmap::IndexMap;
use serde_json::Value;

use crate::descriptor::HttpMethod;
use crate::query::QueryString;
use crate::upload::UploadDescriptor;

/// Decoded request body
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// Form fields plus files already written to the upload directory
    Multipart {
        fields: IndexMap<String, Value>,
        files: Vec<UploadDescriptor>,
    },
}

/// A request as seen by operation handlers
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: HttpMethod,
    /// Full request path; doubles as the collection path
    pub path: String,
    pub query: QueryString,
    /// Values captured by the path template
    pub params: IndexMap<String, String>,
    pub body: RequestBody,
    /// Body produced by an earlier stage; replaces the rendered body
    pub upstream_body: Option<Value>,
}

impl MockRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryString::default(),
            params: IndexMap::new(),
            body: RequestBody::Empty,
            upstream_body: None,
        }
    }

    /// A GET request; a `?query` suffix is split off and decoded
    pub fn get(uri: &str) -> Self {
        Self::with_uri(HttpMethod::Get, uri)
    }

    /// Split `uri` into path and decoded query
    pub fn with_uri(method: HttpMethod, uri: &str) -> Self {
        match uri.split_once('?') {
            Some((path, query)) => Self::new(method, path).with_query(QueryString::parse(query)),
            None => Self::new(method, uri),
        }
    }

    pub fn with_query(mut self, query: QueryString) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn with_upstream_body(mut self, body: Value) -> Self {
        self.upstream_body = Some(body);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_split() {
        let request = MockRequest::get("/api/pets?Type=dog&Age=4");
        assert_eq!(request.path, "/api/pets");
        assert_eq!(request.query.last("Type"), Some("dog"));
        assert_eq!(request.body, RequestBody::Empty);

        let bare = MockRequest::with_uri(HttpMethod::Head, "/api/pets");
        assert!(bare.query.is_empty());
    }
}

//! # Response Formatter
//!
//! Produces the body and headers for a collection response from the
//! filtered resources and the operation's declared success response.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::descriptor::{HttpMethod, ResponseDescriptor};
use crate::store::Resource;
use crate::upload;

use super::coerce::ItemKind;
use super::envelope::BodyShape;
use super::headers::{self, CONTENT_TYPE_JSON};

/// A computed response, ready to be written to the wire
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedResponse {
    pub status: u16,
    /// Absent for HEAD/OPTIONS and when no schema is declared
    pub body: Option<Vec<u8>>,
    pub content_type: Option<&'static str>,
    /// Byte length of the body that would be sent
    pub content_length: Option<usize>,
    pub last_modified: Option<DateTime<Utc>>,
    pub content_disposition: Option<String>,
    /// Set for created resources
    pub location: Option<String>,
}

impl FormattedResponse {
    /// A response with only a status
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: None,
            content_type: None,
            content_length: None,
            last_modified: None,
            content_disposition: None,
            location: None,
        }
    }

    /// Body as UTF-8 text, for inspection
    pub fn body_text(&self) -> Option<&str> {
        self.body
            .as_deref()
            .and_then(|b| std::str::from_utf8(b).ok())
    }
}

/// Formats collection responses for one operation
#[derive(Debug, Clone, Copy)]
pub struct ResponseFormatter<'a> {
    status: u16,
    response: Option<&'a ResponseDescriptor>,
    method: HttpMethod,
    request_path: &'a str,
}

impl<'a> ResponseFormatter<'a> {
    pub fn new(
        status: u16,
        response: Option<&'a ResponseDescriptor>,
        method: HttpMethod,
        request_path: &'a str,
    ) -> Self {
        Self {
            status,
            response,
            method,
            request_path,
        }
    }

    /// Format `resources` (already filtered, in store order).
    ///
    /// An upstream body, when present, replaces the rendered one.
    pub fn format(
        &self,
        resources: &[Resource],
        upstream_body: Option<&Value>,
    ) -> serde_json::Result<FormattedResponse> {
        let Some(response) = self.response else {
            return Ok(FormattedResponse::empty(self.status));
        };
        let Some(schema) = response.schema.as_ref() else {
            return Ok(FormattedResponse::empty(self.status));
        };

        let body = match upstream_body {
            Some(body) => serde_json::to_vec(body)?,
            None => {
                let shape = BodyShape::of(schema);
                let kind = ItemKind::from_schema(shape.item_schema());
                let items = resources
                    .iter()
                    .flat_map(|r| kind.render(&r.data))
                    .collect();
                serde_json::to_vec(&shape.wrap(items))?
            }
        };

        let last_modified = if response.declares_header("Last-Modified") {
            headers::last_modified(resources)
        } else {
            None
        };

        let content_disposition = if response.declares_header("Content-Disposition") {
            Some(upload::attachment_disposition(self.request_path))
        } else {
            None
        };

        let content_length = body.len();
        let body = if self.method.suppresses_body() {
            None
        } else {
            Some(body)
        };

        Ok(FormattedResponse {
            status: self.status,
            body,
            content_type: Some(CONTENT_TYPE_JSON),
            content_length: Some(content_length),
            last_modified,
            content_disposition,
            location: None,
        })
    }
}

impl IntoResponse for FormattedResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        let mut response = Response::new(Body::from(self.body.unwrap_or_default()));
        *response.status_mut() = status;

        let map = response.headers_mut();
        if let Some(content_type) = self.content_type {
            map.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        if let Some(length) = self.content_length {
            map.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
        }
        if let Some(at) = self.last_modified {
            if let Ok(value) = HeaderValue::from_str(&headers::http_date(&at)) {
                map.insert(header::LAST_MODIFIED, value);
            }
        }
        if let Some(disposition) = self.content_disposition {
            if let Ok(value) = HeaderValue::from_str(&disposition) {
                map.insert(header::CONTENT_DISPOSITION, value);
            }
        }
        if let Some(location) = self.location {
            if let Ok(value) = HeaderValue::from_str(&location) {
                map.insert(header::LOCATION, value);
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Schema, SchemaType};
    use chrono::TimeZone;
    use serde_json::json;

    fn array_response() -> ResponseDescriptor {
        ResponseDescriptor::with_schema(Schema::array_of(Schema::default()))
            .with_header("Last-Modified")
    }

    fn pets() -> Vec<Resource> {
        vec![
            Resource::new("/api/pets", "Fido", json!({"Name": "Fido", "Type": "dog"})),
            Resource::new("/api/pets", "Polly", json!({"Name": "Polly", "Type": "bird"})),
        ]
    }

    #[test]
    fn test_no_schema_means_no_body() {
        let response = ResponseDescriptor::default().with_header("Last-Modified");
        let formatter = ResponseFormatter::new(200, Some(&response), HttpMethod::Get, "/api/pets");
        let formatted = formatter.format(&pets(), None).unwrap();
        assert_eq!(formatted, FormattedResponse::empty(200));

        let formatter = ResponseFormatter::new(200, None, HttpMethod::Get, "/api/pets");
        assert_eq!(formatter.format(&pets(), None).unwrap().content_length, None);
    }

    #[test]
    fn test_bare_array_body() {
        let response = array_response();
        let formatter = ResponseFormatter::new(200, Some(&response), HttpMethod::Get, "/api/pets");
        let formatted = formatter.format(&pets(), None).unwrap();

        let expected = r#"[{"Name":"Fido","Type":"dog"},{"Name":"Polly","Type":"bird"}]"#;
        assert_eq!(formatted.body_text(), Some(expected));
        assert_eq!(formatted.content_length, Some(expected.len()));
        assert_eq!(formatted.content_type, Some(CONTENT_TYPE_JSON));
        assert!(formatted.last_modified.is_some());
        assert_eq!(formatted.content_disposition, None);
    }

    #[test]
    fn test_empty_result() {
        let response = array_response();
        let formatter = ResponseFormatter::new(200, Some(&response), HttpMethod::Get, "/api/pets");
        let formatted = formatter.format(&[], None).unwrap();
        assert_eq!(formatted.body_text(), Some("[]"));
        assert_eq!(formatted.content_length, Some(2));
        assert_eq!(formatted.last_modified, None);
    }

    #[test]
    fn test_head_and_options_keep_headers() {
        let response = array_response();
        for method in [HttpMethod::Head, HttpMethod::Options] {
            let formatter = ResponseFormatter::new(200, Some(&response), method, "/api/pets");
            let formatted = formatter.format(&[], None).unwrap();
            assert_eq!(formatted.body, None);
            assert_eq!(formatted.content_length, Some(2));
        }
    }

    #[test]
    fn test_upstream_body_wins() {
        let response = array_response();
        let formatter = ResponseFormatter::new(200, Some(&response), HttpMethod::Get, "/api/pets");
        let upstream = json!({"message": "Not the response you expected"});
        let formatted = formatter.format(&pets(), Some(&upstream)).unwrap();
        assert_eq!(
            formatted.body_text(),
            Some(r#"{"message":"Not the response you expected"}"#)
        );
        assert_eq!(formatted.content_length, Some(43));
    }

    #[test]
    fn test_last_modified_only_when_declared() {
        let response = ResponseDescriptor::with_schema(Schema::array_of(Schema::default()));
        let formatter = ResponseFormatter::new(200, Some(&response), HttpMethod::Get, "/api/pets");
        assert_eq!(formatter.format(&pets(), None).unwrap().last_modified, None);
    }

    #[test]
    fn test_content_disposition() {
        let response = ResponseDescriptor::with_schema(Schema::array_of(Schema::of(SchemaType::File)))
            .with_header("Content-Disposition");
        let formatter =
            ResponseFormatter::new(200, Some(&response), HttpMethod::Get, "/api/pets/Fido/photos");
        let formatted = formatter.format(&[], None).unwrap();
        assert_eq!(
            formatted.content_disposition.as_deref(),
            Some("attachment; filename=\"photos\"")
        );
    }

    #[test]
    fn test_into_response_headers() {
        let formatted = FormattedResponse {
            status: 200,
            body: None,
            content_type: Some(CONTENT_TYPE_JSON),
            content_length: Some(2),
            last_modified: Some(Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap()),
            content_disposition: None,
            location: None,
        };
        let response = formatted.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "2");
        assert_eq!(
            response.headers()[header::LAST_MODIFIED],
            "Wed, 21 Oct 2015 07:28:00 GMT"
        );
    }
}

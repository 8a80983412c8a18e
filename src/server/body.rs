//! # Request Body Decoding
//!
//! Turns the raw axum request body into a [`RequestBody`]. Multipart
//! files are written to the upload directory as they are read.

use axum::body;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{header, HeaderMap, Method};
use indexmap::IndexMap;
use serde_json::Value;

use crate::dispatch::{MockError, MockResult, RequestBody};
use crate::upload::{UploadDir, UploadError};

/// Largest JSON body accepted
pub const MAX_JSON_BODY: usize = 2 * 1024 * 1024;

fn content_type(headers: &HeaderMap) -> &str {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Decode a request body according to its content type
pub async fn decode(request: Request, uploads: &UploadDir) -> MockResult<RequestBody> {
    let kind = content_type(request.headers()).to_ascii_lowercase();

    if kind.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| UploadError::Multipart(e.to_string()))?;
        return decode_multipart(multipart, uploads).await;
    }

    let bytes = body::to_bytes(request.into_body(), MAX_JSON_BODY)
        .await
        .map_err(|e| MockError::InvalidBody(e.to_string()))?;
    if bytes.is_empty() {
        return Ok(RequestBody::Empty);
    }

    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| MockError::InvalidBody(e.to_string()))?;
    Ok(RequestBody::Json(value))
}

async fn decode_multipart(mut multipart: Multipart, uploads: &UploadDir) -> MockResult<RequestBody> {
    let mut fields = IndexMap::new();
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let mimetype = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| UploadError::Multipart(e.to_string()))?;
                files.push(uploads.persist(&name, &file_name, &mimetype, &data).await?);
            }
            None => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| UploadError::Multipart(e.to_string()))?;
                fields.insert(name, Value::String(text));
            }
        }
    }

    Ok(RequestBody::Multipart { fields, files })
}

/// Whether requests with `method` carry a body worth decoding
pub fn has_body(method: &Method) -> bool {
    [Method::POST, Method::PUT, Method::PATCH].contains(method)
}

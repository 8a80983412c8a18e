//! # Dispatch Errors
//!
//! Errors raised while serving a mock operation and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::descriptor::HttpMethod;
use crate::query::QueryError;
use crate::response::FormattedResponse;
use crate::store::StoreError;
use crate::upload::UploadError;

/// Result type for mock operations
pub type MockResult<T> = Result<T, MockError>;

pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Mock operation errors
#[derive(Debug, Error)]
pub enum MockError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// A declared query parameter could not be coerced
    #[error("{0}")]
    Query(#[from] QueryError),

    /// Request body missing or unusable
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// No declared operation matches the path and method
    #[error("Resource not found: {method} {path}")]
    NotFound { method: String, path: String },

    // ==================
    // Server Errors (5xx)
    // ==================
    /// The resource store failed
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Storing an upload failed
    #[error("{0}")]
    Upload(#[from] UploadError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The operation is declared but nothing serves it
    #[error("No handler for operation {0}")]
    NotImplemented(String),
}

impl MockError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            MockError::Query(_) => StatusCode::BAD_REQUEST,
            MockError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            MockError::Upload(UploadError::Multipart(_)) => StatusCode::BAD_REQUEST,

            MockError::NotFound { .. } => StatusCode::NOT_FOUND,

            MockError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MockError::Upload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MockError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,

            MockError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
        }
    }

    /// Plain-text error response, as produced by a failing handler.
    ///
    /// HEAD and OPTIONS report the length but carry no body.
    pub fn to_formatted(&self, method: HttpMethod) -> FormattedResponse {
        let text = format!("Error: {}", self);
        let content_length = text.len();

        FormattedResponse {
            body: (!method.suppresses_body()).then(|| text.into_bytes()),
            content_type: Some(CONTENT_TYPE_TEXT),
            content_length: Some(content_length),
            ..FormattedResponse::empty(self.status_code().as_u16())
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&MockError> for ErrorResponse {
    fn from(err: &MockError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

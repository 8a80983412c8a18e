//! # Descriptor Errors

use thiserror::Error;

/// Result type for descriptor loading
pub type DescriptorResult<T> = Result<T, DescriptorError>;

/// Errors raised while loading an API descriptor document
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("Cannot read API document {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid API document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate operationId: {0}")]
    DuplicateOperationId(String),

    #[error("Invalid path template: {0}")]
    InvalidTemplate(String),
}

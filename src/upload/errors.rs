//! # Upload Errors

use thiserror::Error;

/// Result type for upload handling
pub type UploadResult<T> = Result<T, UploadError>;

/// Upload errors
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            UploadError::IoError("disk full".to_string()).to_string(),
            "I/O error: disk full"
        );
    }
}

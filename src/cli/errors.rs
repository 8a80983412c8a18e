//! CLI-specific error types
//!
//! All CLI errors are fatal: they are printed and the process exits.

use std::io;

use thiserror::Error;

use crate::descriptor::DescriptorError;
use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// API document error
    ApiError,
    /// Seed data error
    DataError,
    /// I/O error (stdout, files)
    IoError,
    /// Server failed to start or stopped with an error
    ServeFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "MOCKAPI_CLI_CONFIG_ERROR",
            Self::ApiError => "MOCKAPI_CLI_API_ERROR",
            Self::DataError => "MOCKAPI_CLI_DATA_ERROR",
            Self::IoError => "MOCKAPI_CLI_IO_ERROR",
            Self::ServeFailed => "MOCKAPI_CLI_SERVE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug, Error)]
#[error("{}: {message}", .code.code())]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Seed data error
    pub fn data_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::DataError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Serve failed
    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServeFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<DescriptorError> for CliError {
    fn from(e: DescriptorError) -> Self {
        Self::new(CliErrorCode::ApiError, e.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::data_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("missing port");
        assert_eq!(err.to_string(), "MOCKAPI_CLI_CONFIG_ERROR: missing port");
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
        assert_eq!(err.message(), "missing port");
    }

    #[test]
    fn test_descriptor_error_conversion() {
        let err: CliError = DescriptorError::DuplicateOperationId("findPets".to_string()).into();
        assert_eq!(err.code_str(), "MOCKAPI_CLI_API_ERROR");
    }
}

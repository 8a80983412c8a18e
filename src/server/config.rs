//! Mock Server Configuration
//!
//! Bind address, upload directory, filter semantics and logging.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::observability::LogFormat;
use crate::query::ArrayMatch;

/// Mock server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    /// Host to bind to (default: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Where uploaded files are written
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// How array query parameters match array properties (default: any)
    #[serde(default)]
    pub array_match: ArrayMatch,

    /// Log filter used when `RUST_LOG` is unset (default: "info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Log line format (default: text)
    #[serde(default)]
    pub log_format: LogFormat,

    /// CORS allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_upload_dir() -> PathBuf {
    std::env::temp_dir().join("mockapi_uploads")
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upload_dir: default_upload_dir(),
            array_match: ArrayMatch::default(),
            log_filter: default_log_filter(),
            log_format: LogFormat::default(),
            cors_origins: Vec::new(),
        }
    }
}

impl MockConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

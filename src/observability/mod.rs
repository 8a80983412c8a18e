//! Observability for mockapi
//!
//! Structured `tracing` events, one per significant step, named with an
//! upper-case event field:
//!
//! ```ignore
//! tracing::info!(event = "QUERY_COLLECTION", collection = %path, matched = 3);
//! ```
//!
//! `init` installs the subscriber once per process. `RUST_LOG` wins over
//! the configured filter.

use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Build the filter: `RUST_LOG` if set, else `default_filter`
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed.
pub fn init(default_filter: &str, format: LogFormat) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter(default_filter));

    let installed = match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init(),
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_config() {
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, LogFormat::Json);
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }

    #[test]
    fn test_second_init_is_refused() {
        init("info", LogFormat::Text);
        assert!(!init("debug", LogFormat::Json));
    }
}

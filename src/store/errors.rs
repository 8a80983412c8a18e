//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Resource store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The collection could not be opened (also raised by injected failures)
    #[error("{message}")]
    Open {
        collection: String,
        message: String,
    },

    /// The underlying map is unusable
    #[error("Lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Create an open failure for a collection
    pub fn open(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Open {
            collection: collection.into(),
            message: message.into(),
        }
    }
}

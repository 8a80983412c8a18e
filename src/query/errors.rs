//! # Query Errors

use thiserror::Error;

/// Result type for query evaluation
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while building a filter from a query string
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// A declared parameter carried a value of the wrong type
    #[error("Invalid value {value:?} for query parameter {name} (expected {expected})")]
    InvalidParameter {
        name: String,
        value: String,
        expected: &'static str,
    },
}

impl QueryError {
    pub fn invalid(name: impl Into<String>, value: impl Into<String>, expected: &'static str) -> Self {
        QueryError::InvalidParameter {
            name: name.into(),
            value: value.into(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = QueryError::invalid("Age", "old", "integer");
        assert_eq!(
            err.to_string(),
            "Invalid value \"old\" for query parameter Age (expected integer)"
        );
    }
}

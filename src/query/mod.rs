//! # Query Filter Engine
//!
//! Turns declared query parameters plus a decoded query string into a
//! predicate over resource data.

pub mod errors;
pub mod filter;
pub mod path;
pub mod query_string;

pub use errors::{QueryError, QueryResult};
pub use filter::{ArrayMatch, Criterion, Expected, FilterPredicate};
pub use path::{resolve, Lookup};
pub use query_string::QueryString;

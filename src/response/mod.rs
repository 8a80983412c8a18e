//! # Response Formatting
//!
//! Shapes filtered resources into a body (bare array or envelope) with
//! per-item coercion, and derives `Content-Length`, `Last-Modified` and
//! `Content-Disposition`.

pub mod coerce;
pub mod envelope;
pub mod formatter;
pub mod headers;

pub use coerce::ItemKind;
pub use envelope::BodyShape;
pub use formatter::{FormattedResponse, ResponseFormatter};
pub use headers::{http_date, CONTENT_TYPE_JSON};

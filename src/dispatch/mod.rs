//! # Operation Dispatch
//!
//! Maps operation ids to handlers and turns handler failures into
//! responses.

pub mod errors;
pub mod handler;
pub mod registry;
pub mod request;

pub use errors::{ErrorResponse, MockError, MockResult};
pub use handler::{AddResource, OperationHandler, QueryCollection};
pub use registry::HandlerRegistry;
pub use request::{MockRequest, RequestBody};

//! # Operation Descriptors
//!
//! Read-only model of the API document: operations, their query
//! parameters and their declared responses.

pub mod document;
pub mod errors;
pub mod operation;
pub mod parameter;
pub mod schema;
pub mod template;

pub use document::{ApiDocument, PathItem, RoutedOperation};
pub use errors::{DescriptorError, DescriptorResult};
pub use operation::{HeaderDescriptor, HttpMethod, OperationDescriptor, ResponseDescriptor};
pub use parameter::{CollectionFormat, ItemsDescriptor, ParamLocation, ParamType, ParameterDescriptor};
pub use schema::{Schema, SchemaType};
pub use template::PathTemplate;

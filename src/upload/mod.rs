//! # Upload Records
//!
//! Uploaded files become records that reference their stored location.

pub mod adapter;
pub mod errors;
pub mod record;
pub mod storage;

pub use adapter::{adapt, attachment_disposition, records_in};
pub use errors::{UploadError, UploadResult};
pub use record::{UploadDescriptor, UploadRecord};
pub use storage::UploadDir;

//! # Resource Store
//!
//! Ordered, in-memory keyed collections of resources with injectable
//! failures for testing.

pub mod backend;
pub mod errors;
pub mod memory;
pub mod resource;

pub use backend::{Assign, DataStore, Predicate};
pub use errors::{StoreError, StoreResult};
pub use memory::{MemoryDataStore, OpenHook};
pub use resource::{Resource, ResourceData};

//! mockapi - A schema-driven mock backend
//!
//! Serves the collection operations of an API description from an
//! in-memory resource store: query filtering, response shaping and
//! multipart upload records.

pub mod cli;
pub mod descriptor;
pub mod dispatch;
pub mod observability;
pub mod query;
pub mod response;
pub mod server;
pub mod store;
pub mod upload;

//! # Mock HTTP Server
//!
//! Axum wiring around the dispatch layer: route resolution, body
//! decoding, configuration.

pub mod body;
pub mod config;
pub mod routes;
pub mod server;

pub use config::MockConfig;
pub use routes::RouteTable;
pub use server::{MockServer, MockState};

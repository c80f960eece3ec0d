//! HTTP API handlers for cadenza-cr

pub mod buildinfo;
pub mod composers;
pub mod health;
pub mod pieces;

pub use buildinfo::get_build_info;
pub use health::health_routes;

use serde::Serialize;

/// Confirmation response for create and delete operations
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

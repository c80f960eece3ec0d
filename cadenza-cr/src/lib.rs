//! cadenza-cr library - Composer Registry module
//!
//! In-memory CRUD service over composer and piece records loaded from JSON
//! seed files at startup. Edits are not written back to disk.

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::registry::Registry;

pub mod api;
pub mod error;
pub mod registry;
pub mod store;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Shared catalog, many concurrent readers or one writer
    pub registry: Arc<RwLock<Registry>>,
    /// Service start time for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create new application state around a loaded registry
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// Composer update and delete are routed both with and without a trailing id
/// segment; the id-less shapes carry `None` into the registry.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, put};
    use tower_http::cors::CorsLayer;

    // Composer collection routes
    let composers = Router::new()
        .route(
            "/composers",
            get(api::composers::list_composers)
                .post(api::composers::create_composer)
                .put(api::composers::update_composer_without_id)
                .delete(api::composers::delete_composer_without_id),
        )
        .route(
            "/composers/:composer_id",
            put(api::composers::update_composer).delete(api::composers::delete_composer),
        );

    // Piece collection routes
    let pieces = Router::new()
        .route(
            "/pieces",
            get(api::pieces::list_pieces).post(api::pieces::create_piece),
        )
        .route(
            "/pieces/:name",
            put(api::pieces::update_piece).delete(api::pieces::delete_piece),
        );

    // Combine routers
    Router::new()
        .merge(composers)
        .merge(pieces)
        .route("/build_info", get(api::get_build_info))
        .merge(api::health_routes())
        .with_state(state)
        // Enable CORS for local access
        .layer(CorsLayer::permissive())
}

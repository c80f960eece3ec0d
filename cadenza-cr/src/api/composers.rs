//! Composer catalog endpoints
//!
//! Update and delete exist in two route shapes: with the composer id as a
//! path segment, and without one. Both shapes feed the same registry calls
//! through an optional id, which is where the two apply different rules
//! (update without an id creates; delete without an id is rejected).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::api::StatusResponse;
use crate::error::ApiResult;
use crate::AppState;
use cadenza_common::models::{Composer, NewComposer};

/// Response for composer creation
#[derive(Debug, Serialize)]
pub struct CreateComposerResponse {
    pub status: String,
    pub composer_id: i64,
}

/// GET /composers - List all composers, sorted ascending by id
pub async fn list_composers(State(state): State<AppState>) -> Json<Vec<Composer>> {
    let registry = state.registry.read().await;
    Json(registry.list_composers())
}

/// POST /composers - Register a new composer
///
/// Assigns the lowest free id, reusing ids released by deletion.
pub async fn create_composer(
    State(state): State<AppState>,
    Json(req): Json<NewComposer>,
) -> (StatusCode, Json<CreateComposerResponse>) {
    let mut registry = state.registry.write().await;
    let composer = registry.create_composer(req);
    info!(
        "Created composer {}: {}",
        composer.composer_id, composer.name
    );

    (
        StatusCode::CREATED,
        Json(CreateComposerResponse {
            status: "Composer created successfully".to_string(),
            composer_id: composer.composer_id,
        }),
    )
}

/// PUT /composers/:composer_id - Replace an existing composer
///
/// Returns 404 when the id is unknown; this shape never creates.
pub async fn update_composer(
    Path(composer_id): Path<i64>,
    State(state): State<AppState>,
    Json(req): Json<NewComposer>,
) -> ApiResult<Json<Composer>> {
    let mut registry = state.registry.write().await;
    let composer = registry.upsert_composer(Some(composer_id), req)?;
    info!("Updated composer {}: {}", composer_id, composer.name);

    Ok(Json(composer))
}

/// PUT /composers - Register a new composer without giving an id
///
/// Assigns max(existing ids) + 1; deleted ids are not reused on this path.
pub async fn update_composer_without_id(
    State(state): State<AppState>,
    Json(req): Json<NewComposer>,
) -> ApiResult<(StatusCode, Json<Composer>)> {
    let mut registry = state.registry.write().await;
    let composer = registry.upsert_composer(None, req)?;
    info!(
        "Created composer {} via update without id: {}",
        composer.composer_id, composer.name
    );

    Ok((StatusCode::CREATED, Json(composer)))
}

/// DELETE /composers/:composer_id - Remove a composer
///
/// Dependent pieces are left in place.
pub async fn delete_composer(
    Path(composer_id): Path<i64>,
    State(state): State<AppState>,
) -> ApiResult<Json<StatusResponse>> {
    let mut registry = state.registry.write().await;
    let composer = registry.delete_composer(Some(composer_id))?;
    info!("Removed composer {}: {}", composer_id, composer.name);

    Ok(Json(StatusResponse {
        status: "Composer removed successfully".to_string(),
    }))
}

/// DELETE /composers - Always rejected, an id is required
pub async fn delete_composer_without_id(
    State(state): State<AppState>,
) -> ApiResult<Json<StatusResponse>> {
    let mut registry = state.registry.write().await;
    registry.delete_composer(None)?;

    // delete_composer(None) always errors, this is unreachable
    Ok(Json(StatusResponse {
        status: "Composer removed successfully".to_string(),
    }))
}

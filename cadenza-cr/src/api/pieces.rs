//! Piece catalog endpoints
//!
//! Pieces are addressed by name, not id, and names are not guaranteed unique;
//! update and delete act on the first match in insertion order.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::api::StatusResponse;
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use cadenza_common::models::Piece;

/// Query parameters for piece listing
#[derive(Debug, Deserialize)]
pub struct PieceQuery {
    /// Restrict the listing to one composer's pieces
    pub composer_id: Option<i64>,
}

/// GET /pieces - List pieces, optionally filtered by composer
///
/// An explicit composer_id filter must be a positive integer. A filter that
/// matches no pieces yields an empty list, not an error.
pub async fn list_pieces(
    Query(query): Query<PieceQuery>,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Piece>>> {
    if let Some(id) = query.composer_id {
        if id <= 0 {
            return Err(ApiError::BadRequest(
                "composer_id must be a positive integer".to_string(),
            ));
        }
    }

    let registry = state.registry.read().await;
    Ok(Json(registry.list_pieces(query.composer_id)))
}

/// POST /pieces - Register a new piece
///
/// The referenced composer must exist at creation time (404 otherwise).
pub async fn create_piece(
    State(state): State<AppState>,
    Json(req): Json<Piece>,
) -> ApiResult<(StatusCode, Json<StatusResponse>)> {
    let mut registry = state.registry.write().await;
    let piece = registry.create_piece(req)?;
    info!(
        "Created piece '{}' for composer {}",
        piece.name, piece.composer_id
    );

    Ok((
        StatusCode::CREATED,
        Json(StatusResponse {
            status: "Piece created successfully".to_string(),
        }),
    ))
}

/// PUT /pieces/:name - Replace the first piece with the given name
///
/// The body replaces the record wholesale, renaming included; its composer_id
/// is not re-validated.
pub async fn update_piece(
    Path(name): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<Piece>,
) -> ApiResult<Json<Piece>> {
    let mut registry = state.registry.write().await;
    let piece = registry.update_piece(&name, req)?;
    info!("Updated piece '{}' (now '{}')", name, piece.name);

    Ok(Json(piece))
}

/// DELETE /pieces/:name - Remove the first piece with the given name
pub async fn delete_piece(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<StatusResponse>> {
    let mut registry = state.registry.write().await;
    registry.delete_piece(&name)?;
    info!("Removed piece '{}'", name);

    Ok(Json(StatusResponse {
        status: "Piece removed successfully".to_string(),
    }))
}

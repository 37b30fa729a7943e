//! HTTP handlers for the flavor catalog.
//!
//! Each handler maps one method+path pair to one catalog operation. rusqlite
//! is synchronous, so the database round trip runs on the blocking pool.
//! All failures funnel through [`flavor_err_to_status`] so every route
//! reports errors the same way: absence is 404, everything else is logged
//! and answered with 500.

use crate::AppState;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use creamery_flavors::{
    create_flavor, delete_flavor, get_flavor, list_flavors, update_flavor, Flavor, FlavorError,
    FlavorUpdate, NewFlavor,
};
use serde::Deserialize;
use std::sync::Arc;

/// Maps a [`FlavorError`] to the HTTP status code, logging non-404 errors.
///
/// `NotFound` → 404, everything else → 500 (with error logged).
fn flavor_err_to_status(e: FlavorError) -> StatusCode {
    match e {
        FlavorError::NotFound(id) => {
            tracing::debug!(id, "flavor not found");
            StatusCode::NOT_FOUND
        }
        ref err => {
            tracing::error!(error = %err, "flavor operation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn pool_err_to_status(e: r2d2::Error) -> StatusCode {
    tracing::error!(error = %e, "failed to get database connection");
    StatusCode::INTERNAL_SERVER_ERROR
}

#[derive(Deserialize)]
pub struct CreateFlavorRequest {
    pub name: String,
    /// Absent or null means "not a favorite".
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateFlavorRequest {
    pub name: String,
    pub is_favorite: bool,
}

/// GET /api/flavors
pub async fn list_flavors_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<Flavor>>, StatusCode> {
    let flavors = tokio::task::spawn_blocking(move || {
        let conn = state.pool.get().map_err(pool_err_to_status)?;
        list_flavors(&conn).map_err(flavor_err_to_status)
    })
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)??;

    Ok(Json(flavors))
}

/// GET /api/flavors/{id}
pub async fn get_flavor_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Flavor>, StatusCode> {
    let flavor = tokio::task::spawn_blocking(move || {
        let conn = state.pool.get().map_err(pool_err_to_status)?;
        get_flavor(&conn, id).map_err(flavor_err_to_status)
    })
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)??;

    Ok(Json(flavor))
}

/// POST /api/flavors
pub async fn create_flavor_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<CreateFlavorRequest>,
) -> Result<(StatusCode, Json<Flavor>), StatusCode> {
    let params = NewFlavor {
        name: payload.name,
        is_favorite: payload.is_favorite.unwrap_or(false),
    };

    let flavor = tokio::task::spawn_blocking(move || {
        let conn = state.pool.get().map_err(pool_err_to_status)?;
        create_flavor(&conn, &params).map_err(flavor_err_to_status)
    })
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)??;

    Ok((StatusCode::CREATED, Json(flavor)))
}

/// PUT /api/flavors/{id}
pub async fn update_flavor_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateFlavorRequest>,
) -> Result<Json<Flavor>, StatusCode> {
    let params = FlavorUpdate {
        name: payload.name,
        is_favorite: payload.is_favorite,
    };

    let flavor = tokio::task::spawn_blocking(move || {
        let conn = state.pool.get().map_err(pool_err_to_status)?;
        update_flavor(&conn, id, &params).map_err(flavor_err_to_status)
    })
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)??;

    Ok(Json(flavor))
}

/// DELETE /api/flavors/{id}
pub async fn delete_flavor_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    tokio::task::spawn_blocking(move || {
        let conn = state.pool.get().map_err(pool_err_to_status)?;
        delete_flavor(&conn, id).map_err(flavor_err_to_status)
    })
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)??;

    Ok(StatusCode::NO_CONTENT)
}

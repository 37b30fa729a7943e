//! Creamery server library logic.

pub mod api_flavors;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Extension, Json, Router,
};
use creamery_db::DbPool;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
}

/// Maximum request body size (64 KiB). Flavor payloads are tiny; anything
/// larger is rejected before it reaches a handler.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Health check handler.
///
/// Returns `200 OK` with server status and version. Used by load balancers,
/// monitoring, and CI to verify the server is running.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/flavors",
            get(api_flavors::list_flavors_handler).post(api_flavors::create_flavor_handler),
        )
        .route(
            "/api/flavors/{id}",
            get(api_flavors::get_flavor_handler)
                .put(api_flavors::update_flavor_handler)
                .delete(api_flavors::delete_flavor_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}

//! Liveness and health handlers.

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;

use crate::handlers::route_not_found;
use crate::state::AppState;

/// Body of the plain-text liveness check.
pub const LIVENESS_MESSAGE: &str = "Interval Server is running";

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Store connection state; reported, never probed
    pub store: &'static str,
}

/// Create health routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness).fallback(route_not_found))
        .route("/health", get(health_check).fallback(route_not_found))
}

pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

/// Health check endpoint. Reads the connection state without connecting.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        store: state.store.state().as_str(),
    })
}

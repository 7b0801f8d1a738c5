// src/routes/health.rs
//! API health check endpoint for the dashboard backend.
//!
//! This module defines the `/health` route used by container orchestrators
//! and CI pipelines to verify that the service is running. It is a sibling
//! module in the `routes` directory and follows the Explicit Module Boundary
//! Pattern (EMBP):
//! - Internal to this file: endpoint handler(s) and related types
//! - Exports to the gateway (`mod.rs`): a subrouter containing the `/health` route

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::AppState;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    /// Datasets currently held in memory.
    datasets: usize,
}

/// Handle `GET /health`.
///
/// Reports liveness plus the number of active dataset sessions. Never
/// touches dataset contents.
async fn health(State((store, _config)): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        datasets: store.len(),
    })
}

/// Create a subrouter containing the `/health` route.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

//! Dataset upload and lifecycle endpoints.
//!
//! - `POST   /datasets`              raw CSV body, returns the new dataset id
//! - `GET    /datasets/{id}/filters` value domain for every filter selector
//! - `DELETE /datasets/{id}`         discard the dataset

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::AppState;
use crate::sanitize::load_clean_table;
use crate::{DashboardError, FilterDomain, IngestStats};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/datasets", post(upload))
        .route("/datasets/{id}", delete(discard))
        .route("/datasets/{id}/filters", get(filters))
}

/// Response body for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    // ---
    pub dataset_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub stats: IngestStats,
    pub filters: FilterDomain,
}

async fn upload(
    State((store, _config)): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, DashboardError> {
    // ---
    info!("POST /datasets - {} bytes received", body.len());

    let table = load_clean_table(&body)?;
    let dataset = store.insert(table);

    info!(
        "POST /datasets - stored dataset {} with {} clean rows",
        dataset.id,
        dataset.records.len()
    );

    let response = UploadResponse {
        dataset_id: dataset.id,
        created_at: dataset.created_at,
        stats: dataset.stats,
        filters: dataset.domain.clone(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

async fn filters(
    Path(id): Path<Uuid>,
    State((store, _config)): State<AppState>,
) -> Result<Json<FilterDomain>, DashboardError> {
    // ---
    debug!("GET /datasets/{}/filters", id);
    let dataset = store.get(id)?;
    Ok(Json(dataset.domain.clone()))
}

async fn discard(
    Path(id): Path<Uuid>,
    State((store, _config)): State<AppState>,
) -> Result<StatusCode, DashboardError> {
    // ---
    store.remove(id)?;
    info!("DELETE /datasets/{} - removed", id);
    Ok(StatusCode::NO_CONTENT)
}

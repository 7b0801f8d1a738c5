//! Error taxonomy surfaced to dashboard clients.
//!
//! Each variant is one failure class with a single human-readable message.
//! Row-level data problems are not errors; the sanitizer absorbs them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

// ---

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The upload could not be read as a table at all.
    #[error("Failed to read uploaded file: {0}")]
    InputFormat(String),

    /// Required columns are absent after header normalization.
    #[error("Uploaded file is missing required column(s): {}", .0.join(", "))]
    Schema(Vec<String>),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Dataset {0} not found")]
    NotFound(Uuid),

    #[error("Please fill in every field of the form (missing: {})", .0.join(", "))]
    Validation(Vec<&'static str>),
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        DashboardError::InputFormat(err.to_string())
    }
}

impl DashboardError {
    // ---
    /// Stable machine-readable code for the failure class.
    pub fn code(&self) -> &'static str {
        match self {
            DashboardError::InputFormat(_) => "input_format",
            DashboardError::Schema(_) => "schema",
            DashboardError::InvalidFilter(_) => "invalid_filter",
            DashboardError::NotFound(_) => "not_found",
            DashboardError::Validation(_) => "validation_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            DashboardError::InputFormat(_)
            | DashboardError::Schema(_)
            | DashboardError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// JSON body for every error response.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        // ---
        tracing::warn!("Request failed ({}): {}", self.code(), self);

        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message: self.to_string(),
            },
        };
        (self.status(), Json(body)).into_response()
    }
}

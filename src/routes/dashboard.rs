use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::AppState;
use crate::pipeline;
use crate::sanitize::parse_date;
use crate::{DashboardError, DashboardOutcome, DateRange, FilterConfig, FilterDomain, Selector};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/datasets/{id}/dashboard", get(handler))
}

/// Query parameters selecting the dashboard filter.
///
/// Categorical selectors are comma-separated lists; absent or `all` accepts
/// everything. Dates default to the dataset's own span.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    platform: Option<String>,
    sentiment: Option<String>,
    media_type: Option<String>,
    location: Option<String>,
    start: Option<String>,
    end: Option<String>,
}

async fn handler(
    Path(id): Path<Uuid>,
    Query(params): Query<DashboardQuery>,
    State((store, _config)): State<AppState>,
) -> Result<Json<DashboardOutcome>, DashboardError> {
    // ---
    info!("GET /datasets/{}/dashboard - {:?}", id, params);

    let dataset = store.get(id)?;

    let Some(filter) = build_filter(&params, &dataset.domain)? else {
        info!("Dataset {} has no dated rows; nothing to chart", id);
        return Ok(Json(DashboardOutcome::no_data()));
    };

    let outcome = pipeline::run(&dataset.records, &filter);
    Ok(Json(outcome))
}

fn query_date(name: &str, value: &str) -> Result<NaiveDate, DashboardError> {
    // ---
    parse_date(value).ok_or_else(|| {
        DashboardError::InvalidFilter(format!("{name} date {value:?} is not a date"))
    })
}

/// Turn query parameters into a filter selection.
///
/// Returns `Ok(None)` when no date range can be formed because neither the
/// query nor the dataset provides one.
fn build_filter(
    params: &DashboardQuery,
    domain: &FilterDomain,
) -> Result<Option<FilterConfig>, DashboardError> {
    // ---
    let start = match params.start.as_deref() {
        Some(value) => Some(query_date("start", value)?),
        None => domain.first_date,
    };
    let end = match params.end.as_deref() {
        Some(value) => Some(query_date("end", value)?),
        None => domain.last_date,
    };

    let (Some(start), Some(end)) = (start, end) else {
        return Ok(None);
    };

    Ok(Some(FilterConfig {
        platforms: Selector::from_param(params.platform.as_deref()),
        sentiments: Selector::from_param(params.sentiment.as_deref()),
        media_types: Selector::from_param(params.media_type.as_deref()),
        locations: Selector::from_param(params.location.as_deref()),
        dates: DateRange::new(start, end)?,
    }))
}

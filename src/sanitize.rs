//! Upload sanitizer: CSV bytes in, clean table out.
//!
//! Structural problems (ragged rows, invalid UTF-8, no header) fail the
//! whole upload. Row-level problems never do: a row with an unusable date is
//! dropped and an unusable engagement count becomes zero.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::error::DashboardError;
use crate::models::{IngestStats, Record};
use crate::schema::ColumnMap;

// ---

/// Date-time layouts tried after RFC 3339. Only the date part is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Plain date layouts. Month-first comes before day-first, so an ambiguous
/// value such as `03/04/2025` reads as March 4th.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%Y%m%d",
];

/// Sanitized dataset plus the counters describing how it was produced.
#[derive(Debug, Clone, Default)]
pub struct CleanTable {
    // ---
    pub records: Vec<Record>,
    pub stats: IngestStats,
}

/// Parse a date written in any of the accepted layouts.
///
/// Returns `None` for anything unrecognised; time of day is discarded.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    // ---
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        })
}

/// Parse an engagement count, truncating any fractional part.
///
/// Plain integers are read exactly; anything else goes through `f64`.
/// Empty, non-numeric, non-finite and negative values yield `None`.
pub fn parse_engagements(value: &str) -> Option<u64> {
    // ---
    let value = value.trim();
    if let Ok(n) = value.parse::<u64>() {
        return Some(n);
    }

    let n: f64 = value.parse().ok()?;
    if !n.is_finite() || n < 0.0 {
        return None;
    }
    Some(n.trunc() as u64)
}

/// Read an uploaded CSV and produce the clean table.
///
/// Either the whole file is processed or an error is returned; there is no
/// partial result.
pub fn load_clean_table(bytes: &[u8]) -> Result<CleanTable, DashboardError> {
    // ---
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(DashboardError::InputFormat(
            "no columns to parse from file".to_string(),
        ));
    }
    let columns = ColumnMap::resolve(headers.iter())?;

    let mut stats = IngestStats::default();
    let mut records = Vec::new();

    for result in reader.records() {
        let row = result?;
        stats.rows_read += 1;

        let raw = columns.extract(&row);
        match raw.to_clean() {
            Some(record) => {
                if parse_engagements(&raw.engagements).is_none() {
                    stats.engagements_zero_filled += 1;
                }
                records.push(record);
            }
            None => {
                stats.rows_dropped += 1;
                debug!("Dropping row {}: unparsable date {:?}", stats.rows_read, raw.date);
            }
        }
    }

    info!(
        "Sanitized upload: {} rows read, {} kept, {} dropped, {} engagement values zero-filled",
        stats.rows_read,
        stats.rows_kept(),
        stats.rows_dropped,
        stats.engagements_zero_filled
    );

    Ok(CleanTable { records, stats })
}

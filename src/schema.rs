//! Column schema for uploaded datasets.
//!
//! Headers are matched after a fixed normalization: lowercase, every space
//! replaced by `_`. Nothing else is trimmed or aliased, so `" Date"`
//! becomes `"_date"` and will not satisfy the `date` column.

use csv::StringRecord;

use crate::error::DashboardError;
use crate::models::RawRecord;

// ---

/// Canonical column names every upload must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "date",
    "platform",
    "sentiment",
    "location",
    "engagements",
    "media_type",
];

/// Normalize a header cell to its canonical form.
pub fn normalize_header(header: &str) -> String {
    header.to_lowercase().replace(' ', "_")
}

/// Positions of the required columns inside an uploaded row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    // ---
    date: usize,
    platform: usize,
    sentiment: usize,
    location: usize,
    engagements: usize,
    media_type: usize,
}

impl ColumnMap {
    // ---
    /// Resolve the required columns from a header row.
    ///
    /// When a normalized name appears more than once the first column wins.
    /// Every missing column is reported in a single schema error.
    pub fn resolve<'a, I>(headers: I) -> Result<Self, DashboardError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        // ---
        let normalized: Vec<String> = headers.into_iter().map(normalize_header).collect();
        let position = |name: &str| normalized.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|&name| position(name).is_none())
            .map(String::from)
            .collect();

        if !missing.is_empty() {
            tracing::warn!("Upload is missing columns: {:?} (found {:?})", missing, normalized);
            return Err(DashboardError::Schema(missing));
        }

        // Every lookup below succeeded in the check above
        let index = |name: &str| position(name).unwrap_or_default();

        Ok(Self {
            date: index("date"),
            platform: index("platform"),
            sentiment: index("sentiment"),
            location: index("location"),
            engagements: index("engagements"),
            media_type: index("media_type"),
        })
    }

    /// Pull the required fields out of one CSV row.
    pub fn extract(&self, row: &StringRecord) -> RawRecord {
        // ---
        let field = |i: usize| row.get(i).unwrap_or_default().to_string();

        RawRecord {
            date: field(self.date),
            platform: field(self.platform),
            sentiment: field(self.sentiment),
            location: field(self.location),
            engagements: field(self.engagements),
            media_type: field(self.media_type),
        }
    }
}

//! Record models for the engagement pipeline.

use chrono::NaiveDate;
use serde::Serialize;

use crate::sanitize::{parse_date, parse_engagements};

// ---

/// One uploaded row after header normalization, all fields still raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    // ---
    pub date: String,
    pub platform: String,
    pub sentiment: String,
    pub location: String,
    pub engagements: String,
    pub media_type: String,
}

/// Cleaned row of the dataset.
///
/// Every `Record` has a real calendar date and a non-negative engagement
/// count; rows that could not satisfy this never become a `Record`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    // ---
    pub date: NaiveDate,
    pub platform: String,
    pub sentiment: String,
    pub location: String,
    pub engagements: u64,
    pub media_type: String,
}

/// Counters describing what the sanitizer did to an upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    // ---
    /// Data rows read from the file (header excluded).
    pub rows_read: usize,
    /// Rows dropped because the date could not be parsed.
    pub rows_dropped: usize,
    /// Rows kept with their engagement count forced to zero.
    pub engagements_zero_filled: usize,
}

impl IngestStats {
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.rows_dropped
    }
}

/// Cleaning helpers
impl RawRecord {
    // ---
    /// Convert to a clean record, or `None` when the date is unusable.
    ///
    /// Unparsable engagement values are zero-filled rather than rejected.
    pub fn to_clean(&self) -> Option<Record> {
        // ---
        let date = parse_date(&self.date)?;

        Some(Record {
            date,
            platform: self.platform.clone(),
            sentiment: self.sentiment.clone(),
            location: self.location.clone(),
            engagements: parse_engagements(&self.engagements).unwrap_or(0),
            media_type: self.media_type.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn create_test_raw_record(date: &str, engagements: &str) -> RawRecord {
        // ---
        RawRecord {
            date: date.to_string(),
            platform: "Instagram".to_string(),
            sentiment: "Positive".to_string(),
            location: "Jakarta".to_string(),
            engagements: engagements.to_string(),
            media_type: "Video".to_string(),
        }
    }

    #[test]
    fn test_clean_conversion() {
        // ---
        let raw = create_test_raw_record("2025-01-06", "120");
        let clean = raw.to_clean().unwrap();

        assert_eq!(clean.date, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert_eq!(clean.engagements, 120);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        // ---
        assert!(create_test_raw_record("not a date", "10").to_clean().is_none());
        assert!(create_test_raw_record("", "10").to_clean().is_none());
    }

    #[test]
    fn test_bad_engagements_zero_filled() {
        // ---
        let clean = create_test_raw_record("2025-01-06", "lots").to_clean().unwrap();
        assert_eq!(clean.engagements, 0);

        let clean = create_test_raw_record("2025-01-06", "").to_clean().unwrap();
        assert_eq!(clean.engagements, 0);
    }

    #[test]
    fn test_text_fields_preserved() {
        // ---
        let raw = RawRecord {
            date: "2025-02-01".to_string(),
            platform: " TikTok ".to_string(),
            sentiment: "mixed".to_string(),
            location: "Bandung".to_string(),
            engagements: "7".to_string(),
            media_type: "Carousel".to_string(),
        };

        let clean = raw.to_clean().unwrap();

        // Free text passes through untouched
        assert_eq!(clean.platform, " TikTok ");
        assert_eq!(clean.sentiment, "mixed");
        assert_eq!(clean.location, "Bandung");
        assert_eq!(clean.media_type, "Carousel");
    }
}

//! Filter engine for the clean table.
//!
//! A [`FilterConfig`] is an immutable value: four categorical selectors plus
//! an inclusive date range. A record passes only when every part accepts it.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::DashboardError;
use crate::models::Record;

// ---

/// Inclusion rule for one categorical dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selector {
    // ---
    #[default]
    All,
    /// Accept exactly these values (case-sensitive, never empty).
    Only(BTreeSet<String>),
}

impl Selector {
    // ---
    /// Build an explicit selector. An empty value list means no restriction.
    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        // ---
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if set.is_empty() {
            Selector::All
        } else {
            Selector::Only(set)
        }
    }

    /// Parse a comma-separated query value.
    ///
    /// Missing, blank or `all` (any case, anywhere in the list) selects
    /// everything.
    pub fn from_param(param: Option<&str>) -> Self {
        // ---
        let Some(param) = param else {
            return Selector::All;
        };

        let values: Vec<&str> = param
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect();

        if values.iter().any(|v| v.eq_ignore_ascii_case("all")) {
            return Selector::All;
        }
        Selector::only(values)
    }

    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(values) => values.contains(value),
        }
    }
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    // ---
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    // ---
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DashboardError> {
        // ---
        if start > end {
            return Err(DashboardError::InvalidFilter(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Complete filter selection for one dashboard pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    // ---
    pub platforms: Selector,
    pub sentiments: Selector,
    pub media_types: Selector,
    pub locations: Selector,
    pub dates: DateRange,
}

impl FilterConfig {
    // ---
    /// Selection that restricts nothing except the date range.
    pub fn accept_all(dates: DateRange) -> Self {
        Self {
            platforms: Selector::All,
            sentiments: Selector::All,
            media_types: Selector::All,
            locations: Selector::All,
            dates,
        }
    }

    pub fn accepts(&self, record: &Record) -> bool {
        // ---
        self.platforms.accepts(&record.platform)
            && self.sentiments.accepts(&record.sentiment)
            && self.media_types.accepts(&record.media_type)
            && self.locations.accepts(&record.location)
            && self.dates.contains(record.date)
    }

    /// Produce the filtered table, keeping clean-table order.
    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        // ---
        let filtered: Vec<Record> = records
            .iter()
            .filter(|r| self.accepts(r))
            .cloned()
            .collect();

        tracing::debug!("Filter kept {} of {} records: {:?}", filtered.len(), records.len(), self);
        filtered
    }
}

/// Value domain of each filter dimension, as offered to the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterDomain {
    // ---
    pub platforms: Vec<String>,
    pub sentiments: Vec<String>,
    pub media_types: Vec<String>,
    pub locations: Vec<String>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl FilterDomain {
    // ---
    /// Collect distinct values in first-encountered order and the date span.
    pub fn from_records(records: &[Record]) -> Self {
        // ---
        fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
            let mut seen = HashSet::new();
            values
                .filter(|v| seen.insert(*v))
                .map(str::to_string)
                .collect()
        }

        Self {
            platforms: distinct(records.iter().map(|r| r.platform.as_str())),
            sentiments: distinct(records.iter().map(|r| r.sentiment.as_str())),
            media_types: distinct(records.iter().map(|r| r.media_type.as_str())),
            locations: distinct(records.iter().map(|r| r.location.as_str())),
            first_date: records.iter().map(|r| r.date).min(),
            last_date: records.iter().map(|r| r.date).max(),
        }
    }

    /// Date range covering the whole dataset, if it has any rows.
    pub fn full_range(&self) -> Option<DateRange> {
        let (start, end) = (self.first_date?, self.last_date?);
        DateRange::new(start, end).ok()
    }
}

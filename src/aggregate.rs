//! The five dashboard aggregations.
//!
//! Every function is pure over the filtered table. Categories are grouped in
//! the order they are first encountered, and that order is the tie-breaker
//! for every later ranking.
//!
//! Weekly buckets use ISO 8601 weeks: a bucket is identified by its Monday.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::models::Record;

// ---

/// Number of entries kept by [`top_locations`].
pub const TOP_LOCATION_LIMIT: usize = 5;

/// The fixed set of dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    // ---
    SentimentBreakdown,
    WeeklyTrend,
    PlatformEngagements,
    MediaTypeMix,
    TopLocations,
}

impl ChartKind {
    /// Display order of the dashboard.
    pub const ALL: [ChartKind; 5] = [
        ChartKind::SentimentBreakdown,
        ChartKind::WeeklyTrend,
        ChartKind::PlatformEngagements,
        ChartKind::MediaTypeMix,
        ChartKind::TopLocations,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::SentimentBreakdown => "Sentiment Distribution",
            ChartKind::WeeklyTrend => "Weekly Engagement Trend",
            ChartKind::PlatformEngagements => "Engagements by Platform",
            ChartKind::MediaTypeMix => "Media Type Distribution",
            ChartKind::TopLocations => "Top 5 Locations by Engagement",
        }
    }
}

/// Occurrence count of one category and its fraction of all rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    // ---
    pub category: String,
    pub count: u64,
    /// Raw fraction in `[0, 1]`; formatting is left to the presentation layer.
    pub share: f64,
}

/// Engagement total of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    // ---
    pub category: String,
    pub engagements: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyTotal {
    // ---
    /// Monday of the ISO week.
    pub week_start: NaiveDate,
    pub engagements: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentBreakdown {
    pub entries: Vec<CategoryShare>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeeklyTrend {
    pub weeks: Vec<WeeklyTotal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlatformEngagements {
    pub entries: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaTypeMix {
    pub entries: Vec<CategoryShare>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopLocations {
    pub entries: Vec<CategoryTotal>,
}

/// One computed summary, tagged by the chart it feeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SummaryTable {
    // ---
    SentimentBreakdown(SentimentBreakdown),
    WeeklyTrend(WeeklyTrend),
    PlatformEngagements(PlatformEngagements),
    MediaTypeMix(MediaTypeMix),
    TopLocations(TopLocations),
}

impl SummaryTable {
    // ---
    pub fn kind(&self) -> ChartKind {
        match self {
            SummaryTable::SentimentBreakdown(_) => ChartKind::SentimentBreakdown,
            SummaryTable::WeeklyTrend(_) => ChartKind::WeeklyTrend,
            SummaryTable::PlatformEngagements(_) => ChartKind::PlatformEngagements,
            SummaryTable::MediaTypeMix(_) => ChartKind::MediaTypeMix,
            SummaryTable::TopLocations(_) => ChartKind::TopLocations,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SummaryTable::SentimentBreakdown(t) => t.entries.is_empty(),
            SummaryTable::WeeklyTrend(t) => t.weeks.is_empty(),
            SummaryTable::PlatformEngagements(t) => t.entries.is_empty(),
            SummaryTable::MediaTypeMix(t) => t.entries.is_empty(),
            SummaryTable::TopLocations(t) => t.entries.is_empty(),
        }
    }
}

/// Compute the summary backing `kind`.
pub fn summarize(kind: ChartKind, records: &[Record]) -> SummaryTable {
    // ---
    match kind {
        ChartKind::SentimentBreakdown => {
            SummaryTable::SentimentBreakdown(sentiment_breakdown(records))
        }
        ChartKind::WeeklyTrend => SummaryTable::WeeklyTrend(weekly_trend(records)),
        ChartKind::PlatformEngagements => {
            SummaryTable::PlatformEngagements(platform_engagements(records))
        }
        ChartKind::MediaTypeMix => SummaryTable::MediaTypeMix(media_type_mix(records)),
        ChartKind::TopLocations => SummaryTable::TopLocations(top_locations(records)),
    }
}

/// Group by a text key, folding a value per group, in first-encountered order.
///
/// Group totals saturate at `u64::MAX` instead of overflowing.
fn group_in_order<K, V>(records: &[Record], key: K, value: V) -> Vec<(String, u64)>
where
    K: Fn(&Record) -> &str,
    V: Fn(&Record) -> u64,
{
    // ---
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, u64)> = Vec::new();

    for record in records {
        let k = key(record);
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push((k.to_string(), 0));
            groups.len() - 1
        });
        groups[slot].1 = groups[slot].1.saturating_add(value(record));
    }
    groups
}

fn shares(groups: Vec<(String, u64)>, rows: usize) -> Vec<CategoryShare> {
    // ---
    groups
        .into_iter()
        .map(|(category, count)| CategoryShare {
            category,
            count,
            share: count as f64 / rows as f64,
        })
        .collect()
}

fn totals(groups: Vec<(String, u64)>) -> Vec<CategoryTotal> {
    groups
        .into_iter()
        .map(|(category, engagements)| CategoryTotal { category, engagements })
        .collect()
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    // ---
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

pub fn sentiment_breakdown(records: &[Record]) -> SentimentBreakdown {
    // ---
    let groups = group_in_order(records, |r| r.sentiment.as_str(), |_| 1);
    SentimentBreakdown {
        entries: shares(groups, records.len()),
    }
}

/// Engagement per ISO week, oldest first. Weeks with no rows are skipped.
pub fn weekly_trend(records: &[Record]) -> WeeklyTrend {
    // ---
    let mut buckets: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in records {
        let bucket = buckets.entry(week_start(record.date)).or_insert(0);
        *bucket = bucket.saturating_add(record.engagements);
    }

    WeeklyTrend {
        weeks: buckets
            .into_iter()
            .map(|(week_start, engagements)| WeeklyTotal { week_start, engagements })
            .collect(),
    }
}

pub fn platform_engagements(records: &[Record]) -> PlatformEngagements {
    // ---
    PlatformEngagements {
        entries: totals(group_in_order(
            records,
            |r| r.platform.as_str(),
            |r| r.engagements,
        )),
    }
}

pub fn media_type_mix(records: &[Record]) -> MediaTypeMix {
    // ---
    let groups = group_in_order(records, |r| r.media_type.as_str(), |_| 1);
    MediaTypeMix {
        entries: shares(groups, records.len()),
    }
}

/// The five locations with the most engagement, largest first.
///
/// The sort is stable, so equal totals keep first-encountered order and the
/// cut at the fifth place favours the location seen earlier.
pub fn top_locations(records: &[Record]) -> TopLocations {
    // ---
    let groups = group_in_order(records, |r| r.location.as_str(), |r| r.engagements);
    let mut entries = totals(groups);
    entries.sort_by(|a, b| b.engagements.cmp(&a.engagements));
    entries.truncate(TOP_LOCATION_LIMIT);

    TopLocations { entries }
}

//! Natural-language insights for each dashboard chart.
//!
//! Each summary type implements [`Insights`]; [`generate`] dispatches on the
//! closed [`SummaryTable`] enum. Emphasized spans are wrapped in `**` and
//! left for the rendering layer to style.
//!
//! Rankings never introduce a secondary sort key: "top" and "second" come
//! from a stable descending sort of the aggregator's grouping order, and
//! "lowest" is the first entry in grouping order holding the minimum.

use crate::aggregate::{
    CategoryShare, CategoryTotal, MediaTypeMix, PlatformEngagements, SentimentBreakdown,
    SummaryTable, TopLocations, WeeklyTrend,
};

// ---

/// Sole insight emitted for a chart without data.
pub const NO_DATA_INSIGHT: &str = "No data available.";

/// Turns a summary table into ordered display strings.
pub trait Insights {
    /// Insights for a non-empty table.
    fn insights(&self) -> Vec<String>;
}

/// Insights for any summary table, including the empty-data sentinel.
pub fn generate(table: &SummaryTable) -> Vec<String> {
    // ---
    if table.is_empty() {
        return vec![NO_DATA_INSIGHT.to_string()];
    }

    match table {
        SummaryTable::SentimentBreakdown(t) => t.insights(),
        SummaryTable::WeeklyTrend(t) => t.insights(),
        SummaryTable::PlatformEngagements(t) => t.insights(),
        SummaryTable::MediaTypeMix(t) => t.insights(),
        SummaryTable::TopLocations(t) => t.insights(),
    }
}

fn percent(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

/// Stable descending ranking; equal values keep their original order.
fn ranked<T, F>(entries: &[T], value: F) -> Vec<&T>
where
    F: Fn(&T) -> u64,
{
    // ---
    let mut ranking: Vec<&T> = entries.iter().collect();
    ranking.sort_by(|a, b| value(b).cmp(&value(a)));
    ranking
}

/// Sum of engagement values, capped at `u64::MAX`.
fn saturating_total(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0, u64::saturating_add)
}

fn share_of(entries: &[CategoryShare], category: &str) -> f64 {
    // ---
    entries
        .iter()
        .find(|e| e.category.trim().eq_ignore_ascii_case(category))
        .map_or(0.0, |e| e.share)
}

impl Insights for SentimentBreakdown {
    fn insights(&self) -> Vec<String> {
        // ---
        let ranking = ranked(&self.entries, |e| e.count);
        let mut out = Vec::with_capacity(3);

        if let Some(top) = ranking.first() {
            out.push(format!(
                "**{}** sentiment is the majority at **{}** of posts.",
                top.category,
                percent(top.share)
            ));
        }

        let negative = share_of(&self.entries, "negative");
        if negative > 0.0 {
            out.push(format!(
                "Negative sentiment makes up **{}** of posts, an area that needs improvement.",
                percent(negative)
            ));
        } else {
            out.push("No negative sentiment was detected in the selected data.".to_string());
        }

        let neutral = share_of(&self.entries, "neutral");
        out.push(format!(
            "Neutral sentiment accounts for **{}** of posts, an opportunity to turn passive viewers into engaged fans.",
            percent(neutral)
        ));

        out
    }
}

impl Insights for WeeklyTrend {
    fn insights(&self) -> Vec<String> {
        // ---
        let mut out = Vec::with_capacity(3);

        if let Some(peak) = ranked(&self.weeks, |w| w.engagements).first() {
            out.push(format!(
                "Engagement peaked in the week starting **{}** with **{}** engagements.",
                peak.week_start.format("%Y-%m-%d"),
                peak.engagements
            ));
        }

        // min_by_key keeps the earliest week on ties
        if let Some(low) = self.weeks.iter().min_by_key(|w| w.engagements) {
            out.push(format!(
                "The quietest week started on **{}** with **{}** engagements.",
                low.week_start.format("%Y-%m-%d"),
                low.engagements
            ));
        }

        let total = saturating_total(self.weeks.iter().map(|w| w.engagements));
        out.push(format!("Total engagement over the period: **{total}**."));

        out
    }
}

impl Insights for PlatformEngagements {
    fn insights(&self) -> Vec<String> {
        // ---
        tiered(
            &self.entries,
            |e| e.engagements,
            |e| e.engagements.to_string(),
            TierText {
                top: "**{name}** leads all platforms with **{value}** engagements.",
                second: "**{name}** is second with **{value}** engagements.",
                lowest: "**{name}** has the lowest engagement at **{value}** and may need a different content strategy.",
                few: "Activity is concentrated on few platforms; diversifying could reach a wider audience.",
            },
        )
    }
}

impl Insights for MediaTypeMix {
    fn insights(&self) -> Vec<String> {
        // ---
        tiered(
            &self.entries,
            |e| e.count,
            |e| percent(e.share),
            TierText {
                top: "**{name}** is the most used media type at **{value}** of posts.",
                second: "**{name}** comes second at **{value}** of posts.",
                lowest: "**{name}** is the least used media type at **{value}** of posts.",
                few: "Only a few media types are in use; experimenting with more formats could broaden engagement.",
            },
        )
    }
}

impl Insights for TopLocations {
    fn insights(&self) -> Vec<String> {
        // ---
        let mut out = Vec::with_capacity(3);

        if let Some(first) = self.entries.first() {
            out.push(format!(
                "**{}** is the top location with **{}** engagements.",
                first.category, first.engagements
            ));
        }
        if let Some(second) = self.entries.get(1) {
            out.push(format!(
                "**{}** ranks second with **{}** engagements.",
                second.category, second.engagements
            ));
        }

        if self.entries.len() >= 3 {
            let rest = &self.entries[2..];
            let combined = saturating_total(rest.iter().map(|e| e.engagements));
            let (noun, verb) = if rest.len() == 1 {
                ("location", "contributes")
            } else {
                ("locations", "contribute")
            };
            out.push(format!(
                "The remaining **{}** {noun} {verb} **{}** engagements combined.",
                rest.len(),
                combined
            ));
        } else {
            out.push(
                "Engagement comes from few locations; localized campaigns could reach new audiences."
                    .to_string(),
            );
        }

        out
    }
}

/// Templates for the top / second / lowest pattern. `{name}` and `{value}`
/// are substituted.
struct TierText {
    top: &'static str,
    second: &'static str,
    lowest: &'static str,
    few: &'static str,
}

trait Named {
    fn name(&self) -> &str;
}

impl Named for CategoryTotal {
    fn name(&self) -> &str {
        &self.category
    }
}

impl Named for CategoryShare {
    fn name(&self) -> &str {
        &self.category
    }
}

/// Top entry, second when there are two or more, lowest when there are
/// three or more; otherwise the generic remark takes the third slot.
///
/// Top and second follow the stable ranking. Lowest is the first entry in
/// grouping order holding the minimum value.
fn tiered<T, R, F>(entries: &[T], rank: R, value: F, text: TierText) -> Vec<String>
where
    T: Named,
    R: Fn(&T) -> u64,
    F: Fn(&T) -> String,
{
    // ---
    let fill = |template: &str, entry: &T| {
        template
            .replace("{value}", &value(entry))
            .replace("{name}", entry.name())
    };

    let ranking = ranked(entries, &rank);
    let mut out = Vec::with_capacity(3);
    if let Some(top) = ranking.first() {
        out.push(fill(text.top, *top));
    }
    if let Some(second) = ranking.get(1) {
        out.push(fill(text.second, *second));
    }
    match entries.iter().min_by_key(|e| rank(*e)) {
        Some(lowest) if entries.len() >= 3 => out.push(fill(text.lowest, lowest)),
        _ => out.push(text.few.to_string()),
    }
    out
}

//! Dashboard pipeline: clean table + filter selection in, charts out.
//!
//! `run` is a pure function. It filters, and if anything survives it builds
//! all five charts in display order; otherwise it stops with a notice.

use serde::Serialize;
use tracing::{debug, info};

use crate::aggregate::{self, ChartKind, SummaryTable};
use crate::filter::FilterConfig;
use crate::insights;
use crate::models::Record;

// ---

/// Shown instead of charts when the filter leaves no rows.
pub const NO_MATCH_NOTICE: &str = "No data matches the selected filters.";

/// One rendered chart: its summary table and the insights drawn from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    // ---
    pub kind: ChartKind,
    pub title: &'static str,
    pub summary: SummaryTable,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    // ---
    /// Rows in the filtered table.
    pub rows: usize,
    pub charts: Vec<Chart>,
}

/// Result of one pipeline pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardOutcome {
    // ---
    NoData { notice: String },
    #[serde(rename = "ok")]
    Report(Dashboard),
}

impl DashboardOutcome {
    pub fn no_data() -> Self {
        DashboardOutcome::NoData {
            notice: NO_MATCH_NOTICE.to_string(),
        }
    }
}

/// Build one chart from the filtered table.
pub fn build_chart(kind: ChartKind, filtered: &[Record]) -> Chart {
    // ---
    let summary = aggregate::summarize(kind, filtered);
    let insights = insights::generate(&summary);

    Chart {
        kind,
        title: kind.title(),
        summary,
        insights,
    }
}

/// Run a full pass over `clean` with the given selection.
pub fn run(clean: &[Record], filter: &FilterConfig) -> DashboardOutcome {
    // ---
    let filtered = filter.apply(clean);

    if filtered.is_empty() {
        info!("No rows match the current filter; skipping aggregation");
        return DashboardOutcome::no_data();
    }

    let charts: Vec<Chart> = ChartKind::ALL
        .iter()
        .map(|&kind| build_chart(kind, &filtered))
        .collect();

    debug!("Built {} charts from {} filtered rows", charts.len(), filtered.len());

    DashboardOutcome::Report(Dashboard {
        rows: filtered.len(),
        charts,
    })
}

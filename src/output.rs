//! Output formatting and persistence for the dashboard aggregate.
//!
//! Supports debug pretty-printing, the JSON data file read by the dashboard,
//! and a CSV export of the QC summary table.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::FeatureSummary;
use crate::analyzers::AggregateResult;
use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;

/// The file written for the dashboard: the aggregate plus when it was made.
///
/// The timestamp lives here rather than in [`AggregateResult`] so that
/// aggregating identical input stays byte-for-byte reproducible.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDocument<'a> {
    pub generated_at: DateTime<Utc>,
    pub data: &'a AggregateResult,
}

/// One row of the QC summary table.
#[derive(Debug, Serialize)]
struct QcSummaryRow<'a> {
    #[serde(rename = "Feature")]
    feature: &'static str,
    #[serde(rename = "Total Samples")]
    total: usize,
    #[serde(rename = "Within Range")]
    within_range: usize,
    #[serde(rename = "Below Threshold")]
    below_threshold: usize,
    #[serde(rename = "Above Threshold")]
    above_threshold: usize,
    #[serde(rename = "Violation Rate (%)")]
    violation_rate: String,
    #[serde(rename = "Status")]
    status: &'a str,
}

/// Logs the aggregate using Rust's debug pretty-print format.
pub fn print_pretty(result: &AggregateResult) {
    debug!("{:#?}", result);
}

/// Writes the dashboard data file, replacing any previous one.
pub fn write_json(path: &str, result: &AggregateResult) -> Result<()> {
    let document = DashboardDocument {
        generated_at: Utc::now(),
        data: result,
    };

    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    serde_json::to_writer_pretty(file, &document)?;

    info!(path, "Dashboard data written");
    Ok(())
}

/// Writes the per-feature QC summary as a CSV table, header row first.
pub fn write_feature_summary(path: &str, summaries: &[FeatureSummary]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for summary in summaries {
        writer.serialize(QcSummaryRow {
            feature: summary.feature.column(),
            total: summary.total,
            within_range: summary.within_range,
            below_threshold: summary.below_threshold,
            above_threshold: summary.above_threshold,
            violation_rate: format!("{:.1}", summary.violation_rate),
            status: summary.status.label(),
        })?;
    }
    writer.flush()?;

    debug!(path, rows = summaries.len(), "QC summary written");
    Ok(())
}

//! The aggregate document handed to the presentation layer.
//!
//! Field names serialize in camelCase because the dashboard scripts read them
//! directly.

use serde::Serialize;

use super::status::QcStatus;
use super::thresholds::Band;
use crate::normalize::{Eligibility, Feature};

/// A category with its count and share, e.g. one income group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub value: usize,
    /// Share of the denominator, one decimal, e.g. `"12.5"`.
    pub percentage: String,
}

/// Headline numbers for the metric cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    /// Unique participant identifiers.
    pub total_participants: usize,
    /// Participant rows that survived normalization.
    pub total_records: usize,
    pub active_cities: usize,
    pub avg_age: String,
    pub age_range: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub income_groups: Vec<LabelCount>,
    /// Multi-race participants count once per reported race, so the values
    /// can add up to more than the number of records.
    pub race_ethnicity: Vec<LabelCount>,
    pub hispanic_counts: Vec<LabelCount>,
}

/// Unique participants at one collection site with coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityCount {
    pub city: String,
    pub participants: usize,
    pub percentage: String,
    pub lat: f64,
    pub lon: f64,
}

/// Age in years over all records with a valid age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Age summary plus per-record arrays for distribution plots.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeData {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub average: Option<f64>,
    pub participant_ids: Vec<String>,
    /// Ages in months, aligned with `participant_ids`.
    pub ages: Vec<f64>,
    pub age_labels: Vec<Option<String>>,
}

/// Threshold results for one acoustic feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSummary {
    pub feature: Feature,
    pub low_threshold: f64,
    pub high_threshold: f64,
    pub total: usize,
    pub within_range: usize,
    pub below_threshold: usize,
    pub above_threshold: usize,
    pub violation_rate: f64,
    pub status: QcStatus,
}

/// One measurement of one segment and where it falls, for per-sample plots.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleBand {
    pub file_name: Option<String>,
    pub city: Option<String>,
    pub feature: Feature,
    pub value: f64,
    pub band: Band,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityControl {
    pub total_segments: usize,
    pub eligible_segments: usize,
    pub not_eligible_segments: usize,
    /// Segments whose eligibility is an unrecognized literal.
    pub other_segments: usize,
    pub pass_rate: f64,
    pub avg_signal_energy: Option<f64>,
    pub avg_spl: Option<f64>,
    pub feature_summary: Vec<FeatureSummary>,
    /// Grouped by feature in fixed order, segments in input order.
    pub sample_bands: Vec<SampleBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: Eligibility,
    pub count: usize,
    pub percentage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityStatusCount {
    pub city: String,
    pub status: Eligibility,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityData {
    /// Column the statuses were read from.
    pub column: Option<String>,
    pub overall: Vec<StatusCount>,
    pub by_city: Vec<CityStatusCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentMetrics {
    pub enrollment_target: usize,
    pub current_enrollment: usize,
    pub enrollment_rate: String,
    pub age_range: String,
    pub data_collection_sites: usize,
}

/// Complete aggregation result, serialized as the dashboard data file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub overview: Overview,
    pub demographics: Demographics,
    /// Sorted by participants, descending.
    pub geographic: Vec<CityCount>,
    pub age_data: AgeData,
    pub quality_control: QualityControl,
    pub eligibility_data: EligibilityData,
    pub metrics: EnrollmentMetrics,
    /// User-visible messages, e.g. an input that could not be loaded.
    pub notices: Vec<String>,
}

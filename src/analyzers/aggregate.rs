use tracing::debug;

use crate::analyzers::demographics::{age_data, age_stats, demographics};
use crate::analyzers::eligibility::eligibility_data;
use crate::analyzers::geography::{city_participant_counts, geographic, unique_participants};
use crate::analyzers::qc::quality_control;
use crate::analyzers::types::{AgeStats, AggregateResult, EnrollmentMetrics, Overview};
use crate::analyzers::utility::pct_label;
use crate::normalize::{ParticipantRecord, QualityBatch};

/// Default enrollment goal of the study.
pub const ENROLLMENT_TARGET: usize = 500;

/// Folds normalized records into the dashboard aggregate.
///
/// Stateless: the same input always yields the same output, and nothing in
/// the result depends on the clock.
#[derive(Debug, Clone)]
pub struct Aggregator {
    pub enrollment_target: usize,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            enrollment_target: ENROLLMENT_TARGET,
        }
    }
}

impl Aggregator {
    pub fn new(enrollment_target: usize) -> Self {
        Self { enrollment_target }
    }

    pub fn aggregate(&self, participants: &[ParticipantRecord], quality: &QualityBatch) -> AggregateResult {
        let unique = unique_participants(participants);
        let city_counts = city_participant_counts(participants);
        let stats = age_stats(participants);

        let eligibility = eligibility_data(quality);
        let quality_control = quality_control(quality, &eligibility);

        debug!(
            records = participants.len(),
            unique,
            cities = city_counts.len(),
            segments = quality.samples.len(),
            features = quality_control.feature_summary.len(),
            "Aggregation complete"
        );

        AggregateResult {
            overview: Overview {
                total_participants: unique,
                total_records: participants.len(),
                active_cities: city_counts.len(),
                avg_age: stats.map_or_else(not_available, |s| format!("{:.1} years", s.mean)),
                age_range: stats.map_or_else(not_available, |s| format!("{:.1} years", s.max - s.min)),
            },
            demographics: demographics(participants),
            geographic: geographic(&city_counts, unique),
            age_data: age_data(participants, stats),
            quality_control,
            eligibility_data: eligibility,
            metrics: EnrollmentMetrics {
                enrollment_target: self.enrollment_target,
                current_enrollment: unique,
                enrollment_rate: pct_label(unique, self.enrollment_target),
                age_range: age_span(stats),
                data_collection_sites: city_counts.len(),
            },
            notices: Vec::new(),
        }
    }
}

fn not_available() -> String {
    "N/A".to_string()
}

fn age_span(stats: Option<AgeStats>) -> String {
    match stats {
        Some(s) => format!("{:.1} - {:.1} years", s.min, s.max),
        None => not_available(),
    }
}

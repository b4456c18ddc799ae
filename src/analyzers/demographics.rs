use std::cmp::Reverse;
use std::collections::BTreeMap;

use super::types::{AgeData, AgeStats, Demographics, LabelCount};
use super::utility::{mean, pct_label};
use crate::normalize::tables::race_name;
use crate::normalize::{HispanicStatus, ParticipantRecord};

pub const UNKNOWN_INCOME: &str = "Unknown";

/// Counts records per income group, race bucket and Hispanic status.
///
/// Every percentage is relative to the number of records. A record reporting
/// several races is counted in each of their buckets.
pub fn demographics(records: &[ParticipantRecord]) -> Demographics {
    let total = records.len();

    let mut income: BTreeMap<String, usize> = BTreeMap::new();
    let mut race: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut hispanic: BTreeMap<HispanicStatus, usize> = BTreeMap::new();

    for record in records {
        let group = record
            .income_group
            .clone()
            .unwrap_or_else(|| UNKNOWN_INCOME.to_string());
        *income.entry(group).or_default() += 1;

        for code in &record.race_codes {
            *race.entry(race_name(code)).or_default() += 1;
        }

        *hispanic.entry(record.hispanic).or_default() += 1;
    }

    Demographics {
        income_groups: label_counts(income, total),
        race_ethnicity: label_counts(race, total),
        hispanic_counts: label_counts(hispanic.into_iter().map(|(s, n)| (s.label(), n)), total),
    }
}

/// Builds `{label, value, percentage}` entries ordered by count, largest
/// first, then by label.
pub fn label_counts<I, L>(counts: I, total: usize) -> Vec<LabelCount>
where
    I: IntoIterator<Item = (L, usize)>,
    L: Into<String>,
{
    let mut entries: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, value)| LabelCount {
            label: label.into(),
            value,
            percentage: pct_label(value, total),
        })
        .collect();
    entries.sort_by(|a, b| (Reverse(a.value), &a.label).cmp(&(Reverse(b.value), &b.label)));
    entries
}

/// Min, max and mean age in years, `None` when no record has an age.
pub fn age_stats(records: &[ParticipantRecord]) -> Option<AgeStats> {
    let years: Vec<f64> = records.iter().filter_map(ParticipantRecord::age_years).collect();
    let mean = mean(&years)?;

    Some(AgeStats {
        min: years.iter().copied().fold(f64::INFINITY, f64::min),
        max: years.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        mean,
    })
}

/// Per-record age arrays, in record order.
pub fn age_data(records: &[ParticipantRecord], stats: Option<AgeStats>) -> AgeData {
    let with_age: Vec<_> = records
        .iter()
        .filter_map(|r| r.age_months.map(|months| (r, months)))
        .collect();

    AgeData {
        min: stats.map(|s| s.min),
        max: stats.map(|s| s.max),
        average: stats.map(|s| s.mean),
        participant_ids: with_age.iter().map(|(r, _)| r.identifier.clone()).collect(),
        ages: with_age.iter().map(|(_, months)| *months).collect(),
        age_labels: with_age.iter().map(|(r, _)| r.age_label.clone()).collect(),
    }
}

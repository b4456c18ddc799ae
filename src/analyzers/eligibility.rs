use std::collections::BTreeMap;

use tracing::warn;

use super::types::{CityStatusCount, EligibilityData, StatusCount};
use super::utility::pct_label;
use crate::normalize::{Eligibility, QualityBatch};

/// Tallies eligibility overall and per city.
///
/// Returns empty lists when the batch has no eligibility column or no sample
/// carries a value. Samples without a site code count overall but not per
/// city. Statuses are ordered Eligible, Not Eligible, then other literals
/// alphabetically.
pub fn eligibility_data(batch: &QualityBatch) -> EligibilityData {
    let Some(column) = batch.eligibility_column.clone() else {
        return EligibilityData::default();
    };

    let mut overall: BTreeMap<&Eligibility, usize> = BTreeMap::new();
    let mut by_city: BTreeMap<(&str, &Eligibility), usize> = BTreeMap::new();

    for sample in &batch.samples {
        let Some(status) = sample.eligibility.as_ref() else {
            continue;
        };
        *overall.entry(status).or_default() += 1;
        if let Some(city) = sample.city.as_deref() {
            *by_city.entry((city, status)).or_default() += 1;
        }
    }

    if overall.is_empty() {
        warn!(column = %column, "Eligibility column has no values");
        return EligibilityData {
            column: Some(column),
            ..Default::default()
        };
    }

    let total: usize = overall.values().sum();
    EligibilityData {
        column: Some(column),
        overall: overall
            .into_iter()
            .map(|(status, count)| StatusCount {
                status: status.clone(),
                count,
                percentage: pct_label(count, total),
            })
            .collect(),
        by_city: by_city
            .into_iter()
            .map(|((city, status), count)| CityStatusCount {
                city: city.to_string(),
                status: status.clone(),
                count,
            })
            .collect(),
    }
}

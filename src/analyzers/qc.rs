use super::status::status_for;
use super::thresholds::{Band, ThresholdSpec};
use super::types::{EligibilityData, FeatureSummary, QualityControl, SampleBand};
use super::utility::{mean, pct, round1};
use crate::normalize::{Eligibility, Feature, QualityBatch, QualitySample};

/// Threshold results for every feature that has at least one numeric value.
///
/// Features are reported in their fixed order; absent features are skipped.
pub fn feature_summary(samples: &[QualitySample]) -> Vec<FeatureSummary> {
    Feature::ALL
        .iter()
        .filter_map(|&feature| summarize_feature(feature, samples))
        .collect()
}

fn summarize_feature(feature: Feature, samples: &[QualitySample]) -> Option<FeatureSummary> {
    let spec = ThresholdSpec::for_feature(feature);

    let (mut below, mut within, mut above) = (0usize, 0usize, 0usize);
    for value in samples.iter().filter_map(|s| s.feature_values.get(&feature)) {
        match spec.classify(*value) {
            Band::Below => below += 1,
            Band::Within => within += 1,
            Band::Above => above += 1,
        }
    }

    let total = below + within + above;
    if total == 0 {
        return None;
    }

    let violation_rate = pct(below + above, total);
    Some(FeatureSummary {
        feature,
        low_threshold: spec.low,
        high_threshold: spec.high,
        total,
        within_range: within,
        below_threshold: below,
        above_threshold: above,
        violation_rate,
        status: status_for(violation_rate),
    })
}

/// Every numeric measurement classified against its feature's range.
pub fn sample_bands(samples: &[QualitySample]) -> Vec<SampleBand> {
    let mut bands = Vec::new();
    for feature in Feature::ALL {
        let spec = ThresholdSpec::for_feature(feature);
        for sample in samples {
            if let Some(&value) = sample.feature_values.get(&feature) {
                bands.push(SampleBand {
                    file_name: sample.file_name.clone(),
                    city: sample.city.clone(),
                    feature,
                    value,
                    band: spec.classify(value),
                });
            }
        }
    }
    bands
}

/// Segment totals, pass/fail counts and per-feature results.
///
/// Pass/fail counts come from the eligibility tally so both views agree.
pub fn quality_control(batch: &QualityBatch, eligibility: &EligibilityData) -> QualityControl {
    let count_of = |wanted: &Eligibility| {
        eligibility
            .overall
            .iter()
            .filter(|s| &s.status == wanted)
            .map(|s| s.count)
            .sum::<usize>()
    };
    let eligible = count_of(&Eligibility::Eligible);
    let not_eligible = count_of(&Eligibility::NotEligible);
    let with_status: usize = eligibility.overall.iter().map(|s| s.count).sum();

    let signal: Vec<f64> = batch.samples.iter().filter_map(|s| s.signal_energy).collect();
    let spl: Vec<f64> = batch.samples.iter().filter_map(|s| s.spl).collect();

    QualityControl {
        total_segments: batch.samples.len(),
        eligible_segments: eligible,
        not_eligible_segments: not_eligible,
        other_segments: with_status - eligible - not_eligible,
        pass_rate: round1(pct(eligible, with_status)),
        avg_signal_energy: mean(&signal),
        avg_spl: mean(&spl),
        feature_summary: feature_summary(&batch.samples),
        sample_bands: sample_bands(&batch.samples),
    }
}

//! Fixed acceptable ranges for the acoustic QC features.

use serde::Serialize;

use crate::normalize::Feature;

/// Inclusive acceptable range of one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdSpec {
    pub low: f64,
    pub high: f64,
}

/// Where a measurement falls relative to its feature's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Band {
    Below,
    Within,
    Above,
}

static THRESHOLDS: &[(Feature, ThresholdSpec)] = &[
    (Feature::Lufs, ThresholdSpec { low: -40.0, high: 40.0 }),
    (Feature::RmsEnergy, ThresholdSpec { low: 0.00001, high: 0.21 }),
    (Feature::RelativeAmplitude, ThresholdSpec { low: 0.01, high: 1.7 }),
    (Feature::SpectralCentroid, ThresholdSpec { low: 900.0, high: 5000.0 }),
    (Feature::SpectralBandwidth, ThresholdSpec { low: 900.0, high: 6000.0 }),
    (Feature::PitchMean, ThresholdSpec { low: 250.0, high: 400.0 }),
    (Feature::MfccMean, ThresholdSpec { low: -40.0, high: 40.0 }),
    (Feature::MfccStdDev, ThresholdSpec { low: 7.0, high: 141.0 }),
];

impl ThresholdSpec {
    /// Every feature has an entry; see `test_every_feature_has_thresholds`.
    pub fn for_feature(feature: Feature) -> ThresholdSpec {
        THRESHOLDS
            .iter()
            .find(|(f, _)| *f == feature)
            .map(|(_, spec)| *spec)
            .unwrap_or(ThresholdSpec {
                low: f64::NEG_INFINITY,
                high: f64::INFINITY,
            })
    }

    pub fn classify(&self, value: f64) -> Band {
        if value < self.low {
            Band::Below
        } else if value > self.high {
            Band::Above
        } else {
            Band::Within
        }
    }
}

pub fn all() -> impl Iterator<Item = (Feature, ThresholdSpec)> {
    THRESHOLDS.iter().copied()
}

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::eligibility::Eligibility;
use super::tables::city_name;
use crate::config::ColumnConfig;
use crate::loader::{RawRow, RawTable};

static SITE_IN_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ds-([A-Z]{3})").expect("site pattern is valid"));

/// Substring identifying the eligibility column, matched case-insensitively.
pub const ELIGIBILITY_MARKER: &str = "eligib";

/// The acoustic features measured for every audio segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Feature {
    #[serde(rename = "LUFS")]
    Lufs,
    #[serde(rename = "RMS Energy")]
    RmsEnergy,
    #[serde(rename = "Relative Amplitude")]
    RelativeAmplitude,
    #[serde(rename = "Spectral Centroid (Hz)")]
    SpectralCentroid,
    #[serde(rename = "Spectral Bandwidth (Hz)")]
    SpectralBandwidth,
    #[serde(rename = "Pitch Mean (Hz)")]
    PitchMean,
    #[serde(rename = "MFCC Mean")]
    MfccMean,
    #[serde(rename = "MFCC Std Dev")]
    MfccStdDev,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::Lufs,
        Feature::RmsEnergy,
        Feature::RelativeAmplitude,
        Feature::SpectralCentroid,
        Feature::SpectralBandwidth,
        Feature::PitchMean,
        Feature::MfccMean,
        Feature::MfccStdDev,
    ];

    /// Column header of the feature in the QC workbook.
    pub fn column(&self) -> &'static str {
        match self {
            Feature::Lufs => "LUFS",
            Feature::RmsEnergy => "RMS Energy",
            Feature::RelativeAmplitude => "Relative Amplitude",
            Feature::SpectralCentroid => "Spectral Centroid (Hz)",
            Feature::SpectralBandwidth => "Spectral Bandwidth (Hz)",
            Feature::PitchMean => "Pitch Mean (Hz)",
            Feature::MfccMean => "MFCC Mean",
            Feature::MfccStdDev => "MFCC Std Dev",
        }
    }
}

/// One audio segment's QC measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct QualitySample {
    pub segment_path: Option<String>,
    pub city_code: Option<String>,
    pub city: Option<String>,
    pub file_name: Option<String>,
    /// Only numeric, non-missing measurements are present.
    pub feature_values: BTreeMap<Feature, f64>,
    pub signal_energy: Option<f64>,
    pub spl: Option<f64>,
    pub eligibility: Option<Eligibility>,
}

impl QualitySample {
    pub fn from_row(row: &RawRow, columns: &ColumnConfig, eligibility_column: Option<&str>) -> Self {
        let segment_path = row.get(&columns.segment_path).and_then(|c| c.as_text());
        let city_code = segment_path.as_deref().and_then(site_code_from_path);
        let number = |column: &str| row.get(column).and_then(|c| c.as_number());

        let feature_values = Feature::ALL
            .iter()
            .filter_map(|f| number(f.column()).map(|v| (*f, v)))
            .collect();

        Self {
            city: city_code.as_deref().map(city_name),
            file_name: segment_path.as_deref().map(file_name_from_path),
            city_code,
            feature_values,
            signal_energy: number(&columns.signal_energy),
            spl: number(&columns.spl),
            eligibility: eligibility_column
                .and_then(|column| row.get(column))
                .and_then(Eligibility::from_cell),
            segment_path,
        }
    }
}

/// Quality rows together with the column their eligibility was read from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityBatch {
    pub samples: Vec<QualitySample>,
    pub eligibility_column: Option<String>,
}

/// Three-letter site code following `ds-` in a segment path.
pub fn site_code_from_path(path: &str) -> Option<String> {
    SITE_IN_PATH
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Last `/`-delimited segment of a path.
pub fn file_name_from_path(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

pub fn normalize_quality(table: &RawTable, columns: &ColumnConfig) -> QualityBatch {
    let eligibility_column = table
        .first_column_containing(ELIGIBILITY_MARKER)
        .map(str::to_string);
    match &eligibility_column {
        Some(column) => debug!(column = %column, "Eligibility column found"),
        None => warn!("No eligibility column in quality table"),
    }
    if !table.is_empty() && !table.has_column(&columns.segment_path) {
        warn!(column = %columns.segment_path, "Quality table lacks the segment path column");
    }

    let samples: Vec<QualitySample> = table
        .rows
        .iter()
        .map(|row| QualitySample::from_row(row, columns, eligibility_column.as_deref()))
        .collect();

    let mut without_site = 0usize;
    for sample in samples.iter().filter(|s| s.city_code.is_none()) {
        debug!(segment = ?sample.segment_path, "No site code in segment path");
        without_site += 1;
    }
    let unrecognized = samples
        .iter()
        .filter(|s| s.eligibility.as_ref().is_some_and(|e| !e.is_recognized()))
        .count();
    info!(
        samples = samples.len(),
        without_site,
        unrecognized_eligibility = unrecognized,
        "Quality rows normalized"
    );

    QualityBatch {
        samples,
        eligibility_column,
    }
}

//! Pipeline configuration.
//!
//! Stored as a JSON file on disk; every field has a default, so a partial
//! file (or none at all) is fine:
//! ```json
//! {
//!   "participant_sources": ["data/participants.tsv", "../data/participants.tsv"],
//!   "quality_source": "data/Post_qc_summary.xlsx",
//!   "columns": { "income": "ss_income_group" }
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::loader::Source;

/// Column names the normalizer reads. The dashboard variants differ only in
/// these, so they are configuration rather than code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub identifier: String,
    pub age_months: String,
    pub age_label: String,
    pub income: String,
    pub race: String,
    pub hispanic: String,
    pub segment_path: String,
    pub signal_energy: String,
    pub spl: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            identifier: "id_number".to_string(),
            age_months: "ss_child_age".to_string(),
            age_label: "ss_child_chronological_age".to_string(),
            income: "ss_demographic_groups".to_string(),
            race: "ss_child_race".to_string(),
            hispanic: "ss_child_hisp_latx".to_string(),
            segment_path: "Segment File".to_string(),
            signal_energy: "Signal Energy".to_string(),
            spl: "SPL".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Locations tried in order for the participant table.
    pub participant_sources: Vec<String>,
    pub quality_source: Option<String>,
    /// Field delimiter of the participant table.
    pub delimiter: char,
    pub enrollment_target: usize,
    pub columns: ColumnConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            participant_sources: vec![
                "data/participants.tsv".to_string(),
                "../data/participants.tsv".to_string(),
                "./participants.tsv".to_string(),
            ],
            quality_source: Some("data/Post_qc_summary.xlsx".to_string()),
            delimiter: '\t',
            enrollment_target: 500,
            columns: ColumnConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file '{path}'"))?;
        Self::from_json(&content).with_context(|| format!("parsing config file '{path}'"))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(content)?;
        if !config.delimiter.is_ascii() {
            anyhow::bail!("delimiter must be a single ASCII character, got {:?}", config.delimiter);
        }
        Ok(config)
    }

    pub fn participant_candidates(&self) -> Vec<Source> {
        self.participant_sources
            .iter()
            .map(|s| Source::parse(s))
            .collect()
    }

    pub fn quality(&self) -> Option<Source> {
        self.quality_source.as_deref().map(Source::parse)
    }

    pub fn delimiter_byte(&self) -> u8 {
        // from_json guarantees ASCII; the default is a tab
        u8::try_from(self.delimiter).unwrap_or(b'\t')
    }
}

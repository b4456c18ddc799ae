//! Load → normalize → aggregate orchestration.
//!
//! Callers construct one [`DashboardPipeline`], run it, and hand the
//! resulting [`AggregateResult`] to whatever renders it. A refresh simply
//! runs the pipeline again and replaces the previous result.

use tracing::{error, info};

use crate::analyzers::{AggregateResult, Aggregator};
use crate::config::DashboardConfig;
use crate::loader::participants::load_participants;
use crate::loader::quality::load_quality;
use crate::normalize::{
    ParticipantRecord, QualityBatch, normalize_participants, normalize_quality,
};

/// Normalized inputs of one run, plus notices for inputs that failed to load.
#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    pub participants: Vec<ParticipantRecord>,
    pub quality: QualityBatch,
    pub notices: Vec<String>,
}

pub struct DashboardPipeline {
    config: DashboardConfig,
    aggregator: Aggregator,
}

impl DashboardPipeline {
    pub fn new(config: DashboardConfig) -> Self {
        let aggregator = Aggregator::new(config.enrollment_target);
        Self { config, aggregator }
    }

    /// Loads and normalizes both inputs.
    ///
    /// A source that cannot be loaded yields an empty section and a notice;
    /// the other source is still loaded.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> LoadedData {
        let columns = &self.config.columns;
        let mut data = LoadedData::default();

        let candidates = self.config.participant_candidates();
        match load_participants(&candidates, self.config.delimiter_byte()).await {
            Ok(table) => data.participants = normalize_participants(&table, columns),
            Err(e) => {
                error!(kind = e.kind(), error = %e, "Participant data unavailable");
                data.notices.push(format!("Participant data unavailable: {e}"));
            }
        }

        match self.config.quality() {
            Some(source) => match load_quality(&source).await {
                Ok(table) => data.quality = normalize_quality(&table, columns),
                Err(e) => {
                    error!(kind = e.kind(), error = %e, "Quality data unavailable");
                    data.notices.push(format!("Quality control data unavailable: {e}"));
                }
            },
            None => info!("No quality source configured, skipping QC section"),
        }

        data
    }

    pub fn aggregate(&self, data: &LoadedData) -> AggregateResult {
        let mut result = self.aggregator.aggregate(&data.participants, &data.quality);
        result.notices = data.notices.clone();
        result
    }

    /// One full run: load, normalize, aggregate.
    pub async fn run(&self) -> AggregateResult {
        let data = self.load().await;
        let result = self.aggregate(&data);
        info!(
            participants = result.overview.total_participants,
            segments = result.quality_control.total_segments,
            notices = result.notices.len(),
            "Dashboard data generated"
        );
        result
    }
}

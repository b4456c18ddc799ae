use serde::Serialize;

/// QC verdict for a feature, derived from its threshold violation rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QcStatus {
    Excellent,
    Good,
    Moderate,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
}

impl QcStatus {
    pub fn label(&self) -> &'static str {
        match self {
            QcStatus::Excellent => "Excellent",
            QcStatus::Good => "Good",
            QcStatus::Moderate => "Moderate",
            QcStatus::NeedsAttention => "Needs Attention",
        }
    }
}

/// Converts a violation rate (percent, 0–100) into a QC status.
///
/// | Range     | Status          |
/// |-----------|-----------------|
/// | < 5       | Excellent       |
/// | < 15      | Good            |
/// | < 30      | Moderate        |
/// | >= 30     | Needs Attention |
pub fn status_for(violation_rate: f64) -> QcStatus {
    match violation_rate {
        r if r < 5.0 => QcStatus::Excellent,
        r if r < 15.0 => QcStatus::Good,
        r if r < 30.0 => QcStatus::Moderate,
        _ => QcStatus::NeedsAttention,
    }
}

//! Descriptive aggregation of the normalized study data.
//!
//! This module folds participant records into demographic, geographic and
//! age summaries, classifies QC measurements against fixed thresholds, and
//! tallies segment eligibility. Everything here is a pure function of its
//! input.

pub mod aggregate;
pub mod demographics;
pub mod eligibility;
pub mod geography;
pub mod qc;
pub mod status;
pub mod thresholds;
pub mod types;
pub mod utility;

pub use aggregate::Aggregator;
pub use types::AggregateResult;

//! Turning raw rows into typed participant and quality records.
//!
//! Coded values (site prefixes, race codes, the Hispanic/Latine flag and the
//! many spellings of an eligibility decision) are resolved here, once, so the
//! aggregator only ever sees categories.

pub mod eligibility;
pub mod participant;
pub mod quality;
pub mod tables;

pub use eligibility::Eligibility;
pub use participant::{HispanicStatus, ParticipantRecord, normalize_participants};
pub use quality::{Feature, QualityBatch, QualitySample, normalize_quality};

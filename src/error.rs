//! Error types for loading the dashboard inputs.

use thiserror::Error;

/// Failure to turn a source into raw rows.
///
/// Per-row problems never surface here; they are skipped and logged by the
/// normalizer. A `LoadError` always means the whole source is unusable for
/// this run.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read or the URL could not be fetched.
    #[error("source unavailable: {source_name}: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    /// The bytes were fetched but are not a usable table.
    #[error("failed to parse {source_name}: {reason}")]
    ParseFailure { source_name: String, reason: String },

    /// No candidate location was supplied for a source.
    #[error("no candidate locations configured for {0}")]
    NoCandidates(&'static str),
}

impl LoadError {
    pub fn unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        LoadError::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(source_name: impl Into<String>, reason: impl ToString) -> Self {
        LoadError::ParseFailure {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Short machine-readable kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::SourceUnavailable { .. } | LoadError::NoCandidates(_) => "source_unavailable",
            LoadError::ParseFailure { .. } => "parse_failure",
        }
    }
}

/// A column the normalizer needed was absent from a row.
///
/// Treated as a per-row skip by callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing column '{0}'")]
pub struct MissingColumn(pub String);

pub type LoadResult<T> = std::result::Result<T, LoadError>;

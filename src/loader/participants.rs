//! Participant table loading with a multi-location search.

use tracing::{info, warn};

use super::{RawTable, Source, read_source};
use crate::error::{LoadError, LoadResult};
use crate::parser::parse_delimited;

/// Loads the participant table from the first candidate location that can be
/// read.
///
/// Candidates are tried in order and the search stops at the first successful
/// read. A file that is found but cannot be parsed is an error; the remaining
/// candidates are not tried.
#[tracing::instrument(skip(candidates), fields(candidates = candidates.len()))]
pub async fn load_participants(candidates: &[Source], delimiter: u8) -> LoadResult<RawTable> {
    let mut last_error = None;

    for source in candidates {
        match read_source(source).await {
            Ok(bytes) => {
                let table = parse_delimited(&bytes, delimiter, &source.to_string())?;
                info!(source = %source, rows = table.len(), "Participant table loaded");
                return Ok(table);
            }
            Err(e) => {
                warn!(source = %source, error = %e, "Participant source not readable, trying next");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or(LoadError::NoCandidates("participant table")))
}

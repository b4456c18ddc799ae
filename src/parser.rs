//! Delimited-text parser for the participant table and exported QC sheets.

use csv::ReaderBuilder;

use crate::error::{LoadError, LoadResult};
use crate::loader::{CellValue, RawRow, RawTable};

/// Parses delimiter-separated text whose first line holds the header names.
///
/// Fields are associated with headers by position. Rows shorter than the
/// header leave the trailing columns absent, extra fields are ignored and
/// blank lines are skipped. Tab-separated input is split without any quote
/// handling; other delimiters honour double quotes.
///
/// # Errors
///
/// Returns [`LoadError::ParseFailure`] if the text is not valid UTF-8 or has
/// no header row.
pub fn parse_delimited(bytes: &[u8], delimiter: u8, source_name: &str) -> LoadResult<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .quoting(delimiter != b'\t')
        .from_reader(bytes);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| LoadError::parse(source_name, e))?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(LoadError::parse(source_name, "missing header row"));
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| LoadError::parse(source_name, e))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), CellValue::from_text(v)))
            .collect();
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}

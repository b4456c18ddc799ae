//! Quality workbook loading.
//!
//! The per-segment QC measurements usually arrive as an Excel workbook with
//! an "All_data" sheet. Delimited exports of the same sheet are accepted too.

use std::io::Cursor;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use tracing::{debug, info};

use super::{CellValue, RawRow, RawTable, Source, read_source};
use crate::error::{LoadError, LoadResult};
use crate::parser::parse_delimited;

/// Sheet name preferred over the first worksheet, compared after
/// [`sheet_key`] normalization.
const PREFERRED_SHEET: &str = "alldata";

/// Loads the quality rows from a workbook, or from a `.csv`/`.tsv` export.
#[tracing::instrument(skip(source), fields(source = %source))]
pub async fn load_quality(source: &Source) -> LoadResult<RawTable> {
    let bytes = read_source(source).await?;
    let name = source.to_string();

    let table = match source.extension().as_deref() {
        Some("csv") => parse_delimited(&bytes, b',', &name)?,
        Some("tsv") | Some("txt") => parse_delimited(&bytes, b'\t', &name)?,
        _ => parse_workbook(bytes, &name)?,
    };

    info!(rows = table.len(), columns = table.headers.len(), "Quality table loaded");
    Ok(table)
}

/// Reads the preferred worksheet of an in-memory workbook.
pub fn parse_workbook(bytes: Vec<u8>, source_name: &str) -> LoadResult<RawTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| LoadError::parse(source_name, e))?;

    let names = workbook.sheet_names();
    let sheet = pick_sheet(&names)
        .ok_or_else(|| LoadError::parse(source_name, "workbook has no worksheets"))?
        .to_string();
    debug!(sheet = %sheet, available = ?names, "Worksheet selected");

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| LoadError::parse(source_name, format!("sheet '{sheet}': {e}")))?;

    table_from_range(&range)
        .ok_or_else(|| LoadError::parse(source_name, format!("sheet '{sheet}' has no header row")))
}

fn sheet_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// The "all data" sheet when present, otherwise the first one.
pub fn pick_sheet(names: &[String]) -> Option<&str> {
    names
        .iter()
        .find(|n| sheet_key(n) == PREFERRED_SHEET)
        .or_else(|| names.first())
        .map(String::as_str)
}

/// Converts a worksheet range into a table, using its first row as headers.
///
/// Returns `None` for a sheet without any rows. Rows where every cell is empty
/// are skipped.
pub fn table_from_range(range: &Range<Data>) -> Option<RawTable> {
    let mut rows_iter = range.rows();
    let header_row = rows_iter.next()?;

    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| match cell_value(cell).as_text() {
            Some(name) => name,
            None => format!("column_{idx}"),
        })
        .collect();

    let mut rows = Vec::new();
    for cells in rows_iter {
        let row: RawRow = headers
            .iter()
            .zip(cells.iter())
            .map(|(h, c)| (h.clone(), cell_value(c)))
            .collect();

        if row.values().all(CellValue::is_empty) {
            continue;
        }
        rows.push(row);
    }

    Some(RawTable { headers, rows })
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::from_text(s),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from_text(s),
    }
}

//! Reading the participant table and the quality workbook into raw rows.
//!
//! Nothing here interprets values: a [`RawTable`] is the header list plus one
//! map of column name to [`CellValue`] per data row. Normalization happens in
//! [`crate::normalize`].

pub mod participants;
pub mod quality;

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::fetch::{BasicClient, fetch_bytes};

/// A single cell as it came out of the source.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Builds a cell from delimited text. Blank fields become [`CellValue::Empty`].
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(n) => n.is_nan(),
            CellValue::Bool(_) => false,
        }
    }

    /// The cell rendered as text, `None` when empty.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            CellValue::Number(n) if n.is_nan() => None,
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Bool(b) => Some(b.to_string()),
        }
    }

    /// Numeric value of the cell. Text is parsed; booleans and non-finite
    /// values are not numbers.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Empty | CellValue::Bool(_) => return None,
        };
        n.is_finite().then_some(n)
    }
}

pub type RawRow = HashMap<String, CellValue>;

/// Rows of one source, with the header order preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// First header, in source order, containing `needle` case-insensitively.
    pub fn first_column_containing(&self, needle: &str) -> Option<&str> {
        let needle = needle.to_lowercase();
        self.headers
            .iter()
            .find(|h| h.to_lowercase().contains(&needle))
            .map(String::as_str)
    }
}

/// Where an input lives: a local file or an HTTP(S) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            Source::Url(location.to_string())
        } else {
            Source::Path(PathBuf::from(location))
        }
    }

    /// Lowercased file extension, ignoring any URL query string.
    pub fn extension(&self) -> Option<String> {
        let path = match self {
            Source::Path(p) => p.clone(),
            Source::Url(u) => PathBuf::from(u.split(['?', '#']).next().unwrap_or(u)),
        };
        path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Url(u) => f.write_str(u),
        }
    }
}

/// Reads a local file or fetches a URL, once.
#[tracing::instrument(skip(source), fields(source = %source))]
pub async fn read_source(source: &Source) -> LoadResult<Vec<u8>> {
    let bytes = match source {
        Source::Path(path) => tokio::fs::read(path)
            .await
            .map_err(|e| LoadError::unavailable(source.to_string(), e))?,
        Source::Url(url) => {
            let client =
                BasicClient::new().map_err(|e| LoadError::unavailable(url.clone(), e))?;
            fetch_bytes(&client, url)
                .await
                .map_err(|e| LoadError::unavailable(url.clone(), e))?
        }
    };
    debug!(bytes = bytes.len(), "Source read");
    Ok(bytes)
}

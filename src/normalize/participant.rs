use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::tables::{city_name, is_known_city_code};
use crate::config::ColumnConfig;
use crate::error::MissingColumn;
use crate::loader::{CellValue, RawRow, RawTable};

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("number pattern is valid")
});

/// Hispanic/Latine ethnicity as reported in `ss_child_hisp_latx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HispanicStatus {
    Hispanic,
    NotHispanic,
    Unknown,
}

impl HispanicStatus {
    /// `1` is Hispanic/Latine, `2` is not; everything else, including a
    /// missing value, is unknown.
    pub fn from_code(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("1") | Some("1.0") => HispanicStatus::Hispanic,
            Some("2") | Some("2.0") => HispanicStatus::NotHispanic,
            _ => HispanicStatus::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HispanicStatus::Hispanic => "Hispanic / Latine",
            HispanicStatus::NotHispanic => "Not Hispanic",
            HispanicStatus::Unknown => "Unknown",
        }
    }
}

/// One participant visit after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantRecord {
    pub identifier: String,
    pub city_code: Option<String>,
    /// City name, or the raw code when the site is not in the city table.
    pub city: Option<String>,
    pub age_months: Option<f64>,
    pub age_label: Option<String>,
    pub income_group: Option<String>,
    pub race_codes: Vec<String>,
    pub hispanic: HispanicStatus,
}

impl ParticipantRecord {
    pub fn from_row(row: &RawRow, columns: &ColumnConfig) -> Self {
        let text = |column: &str| row.get(column).and_then(|c| c.as_text());

        let identifier = text(&columns.identifier).unwrap_or_default();
        let city_code = extract_city_code(&identifier);
        let city = city_code.as_deref().map(city_name);

        let age_months = row
            .get(&columns.age_months)
            .and_then(age_in_months)
            .filter(|months| *months >= 0.0);

        Self {
            city_code,
            city,
            age_months,
            age_label: text(&columns.age_label),
            income_group: text(&columns.income),
            race_codes: text(&columns.race)
                .map(|raw| split_race_codes(&raw))
                .unwrap_or_default(),
            hispanic: HispanicStatus::from_code(text(&columns.hispanic).as_deref()),
            identifier,
        }
    }

    pub fn age_years(&self) -> Option<f64> {
        self.age_months.map(|m| m / 12.0)
    }

    /// Records without both a city code and an age never reach aggregation.
    pub fn check_complete(&self, columns: &ColumnConfig) -> Result<(), Exclusion> {
        if self.identifier.is_empty() {
            return Err(MissingColumn(columns.identifier.clone()).into());
        }
        if self.city_code.is_none() {
            return Err(Exclusion::NoCityCode(self.identifier.clone()));
        }
        if self.age_months.is_none() {
            return Err(Exclusion::NoAge(self.identifier.clone()));
        }
        Ok(())
    }
}

/// Why a participant row was left out of aggregation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Exclusion {
    #[error(transparent)]
    MissingColumn(#[from] MissingColumn),

    #[error("identifier '{0}' has no city code")]
    NoCityCode(String),

    #[error("participant '{0}' has no usable age in months")]
    NoAge(String),
}

/// Numeric age of a cell. Text keeps its leading number, so `"37 months"`
/// reads as 37.
fn age_in_months(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Text(raw) => LEADING_NUMBER
            .find(raw.trim())
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|n| n.is_finite()),
        other => other.as_number(),
    }
}

/// Leading run of uppercase ASCII letters of the identifier.
pub fn extract_city_code(identifier: &str) -> Option<String> {
    let code: String = identifier
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_uppercase())
        .collect();
    (!code.is_empty()).then_some(code)
}

/// Splits a comma-joined race field into trimmed, non-empty codes.
pub fn split_race_codes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalizes every participant row and drops incomplete ones.
pub fn normalize_participants(table: &RawTable, columns: &ColumnConfig) -> Vec<ParticipantRecord> {
    for required in [&columns.identifier, &columns.age_months] {
        if !table.is_empty() && !table.has_column(required) {
            warn!(column = %required, "Participant table lacks a required column");
        }
    }

    let mut records = Vec::with_capacity(table.len());
    let mut excluded = 0usize;
    let mut unmapped_cities = 0usize;

    for (index, row) in table.rows.iter().enumerate() {
        let record = ParticipantRecord::from_row(row, columns);
        if let Err(reason) = record.check_complete(columns) {
            debug!(row = index + 1, reason = %reason, "Participant row excluded");
            excluded += 1;
            continue;
        }
        if record.city_code.as_deref().is_some_and(|c| !is_known_city_code(c)) {
            debug!(identifier = %record.identifier, "City code not in city table, kept verbatim");
            unmapped_cities += 1;
        }
        records.push(record);
    }

    info!(
        kept = records.len(),
        excluded,
        unmapped_cities,
        "Participant rows normalized"
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), CellValue::from_text(v)))
            .collect()
    }

    fn table(rows: Vec<RawRow>) -> RawTable {
        RawTable {
            headers: vec!["id_number".into(), "ss_child_age".into()],
            rows,
        }
    }

    #[test]
    fn test_hispanic_codes() {
        assert_eq!(HispanicStatus::from_code(Some("1")), HispanicStatus::Hispanic);
        assert_eq!(HispanicStatus::from_code(Some("1.0")), HispanicStatus::Hispanic);
        assert_eq!(HispanicStatus::from_code(Some("2")), HispanicStatus::NotHispanic);
        assert_eq!(HispanicStatus::from_code(Some("2.0")), HispanicStatus::NotHispanic);
        assert_eq!(HispanicStatus::from_code(Some("")), HispanicStatus::Unknown);
        assert_eq!(HispanicStatus::from_code(Some("9")), HispanicStatus::Unknown);
        assert_eq!(HispanicStatus::from_code(None), HispanicStatus::Unknown);
        assert_eq!(HispanicStatus::Hispanic.label(), "Hispanic / Latine");
    }

    #[test]
    fn test_extract_city_code() {
        assert_eq!(extract_city_code("ATL123").as_deref(), Some("ATL"));
        assert_eq!(extract_city_code(" CHI0042").as_deref(), Some("CHI"));
        assert_eq!(extract_city_code("NYCX9").as_deref(), Some("NYCX"));
        assert_eq!(extract_city_code("123ATL"), None);
        assert_eq!(extract_city_code(""), None);
    }

    #[test]
    fn test_split_race_codes() {
        assert_eq!(split_race_codes("1,6"), vec!["1", "6"]);
        assert_eq!(split_race_codes(" 3 , ,7 "), vec!["3", "7"]);
        assert!(split_race_codes("").is_empty());
    }

    #[test]
    fn test_from_row_maps_fields() {
        let columns = ColumnConfig::default();
        let record = ParticipantRecord::from_row(
            &row(&[
                ("id_number", "ATL123"),
                ("ss_child_age", "37"),
                ("ss_child_race", "1,6"),
                ("ss_child_hisp_latx", "2.0"),
                ("ss_demographic_groups", "Low income"),
                ("ss_child_chronological_age", "3 years 1 months"),
            ]),
            &columns,
        );

        assert_eq!(record.identifier, "ATL123");
        assert_eq!(record.city.as_deref(), Some("Atlanta, GA"));
        assert_eq!(record.age_months, Some(37.0));
        assert!((record.age_years().unwrap() - 37.0 / 12.0).abs() < 1e-12);
        assert_eq!(record.race_codes, vec!["1", "6"]);
        assert_eq!(record.hispanic, HispanicStatus::NotHispanic);
        assert_eq!(record.income_group.as_deref(), Some("Low income"));
        assert_eq!(record.age_label.as_deref(), Some("3 years 1 months"));
    }

    #[test]
    fn test_unknown_city_code_passes_through() {
        let record = ParticipantRecord::from_row(
            &row(&[("id_number", "SEA7"), ("ss_child_age", "40")]),
            &ColumnConfig::default(),
        );
        assert_eq!(record.city.as_deref(), Some("SEA"));
    }

    #[test]
    fn test_exclusion_filter() {
        let columns = ColumnConfig::default();
        let rows = vec![
            row(&[("id_number", "ATL123"), ("ss_child_age", "37")]),
            row(&[("id_number", ""), ("ss_child_age", "")]),
            row(&[("id_number", "CHI1"), ("ss_child_age", "abc")]),
            row(&[("id_number", "42"), ("ss_child_age", "30")]),
            row(&[("id_number", "DLS5"), ("ss_child_age", "-3")]),
            row(&[("id_number", "ORL2"), ("ss_child_age", "0")]),
        ];

        let records = normalize_participants(&table(rows), &columns);
        let ids: Vec<_> = records.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["ATL123", "ORL2"]);
    }

    #[test]
    fn test_age_keeps_leading_number() {
        let columns = ColumnConfig::default();
        let age = |raw: &str| {
            ParticipantRecord::from_row(&row(&[("id_number", "ATL1"), ("ss_child_age", raw)]), &columns)
                .age_months
        };
        assert_eq!(age("37 months"), Some(37.0));
        assert_eq!(age("36.5mo"), Some(36.5));
        assert_eq!(age(" 40 "), Some(40.0));
        assert_eq!(age("months 37"), None);
        assert_eq!(age("-3 months"), None);
        assert_eq!(age_in_months(&CellValue::Number(12.0)), Some(12.0));
        assert_eq!(age_in_months(&CellValue::Bool(true)), None);
    }

    #[test]
    fn test_check_complete_reasons() {
        let columns = ColumnConfig::default();
        let missing_id = ParticipantRecord::from_row(&row(&[("ss_child_age", "30")]), &columns);
        assert_eq!(
            missing_id.check_complete(&columns),
            Err(Exclusion::MissingColumn(MissingColumn("id_number".into())))
        );

        let no_age = ParticipantRecord::from_row(&row(&[("id_number", "ATL1")]), &columns);
        assert_eq!(
            no_age.check_complete(&columns),
            Err(Exclusion::NoAge("ATL1".into()))
        );
    }
}

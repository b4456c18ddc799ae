use serde::{Serialize, Serializer};

use crate::loader::CellValue;

/// Spellings accepted as a positive eligibility decision, compared lowercased.
static ELIGIBLE_SYNONYMS: &[&str] = &["eligible", "pass", "passed", "true", "1", "1.0", "yes", "y"];

/// Spellings accepted as a negative eligibility decision, compared lowercased
/// with runs of whitespace and underscores folded to one space.
static NOT_ELIGIBLE_SYNONYMS: &[&str] = &[
    "not eligible",
    "noteligible",
    "ineligible",
    "fail",
    "failed",
    "false",
    "0",
    "0.0",
    "no",
    "n",
];

/// Eligibility of an audio segment for research use.
///
/// Two recognized polarities plus `Other`, which keeps any unrecognized
/// status verbatim so it shows up as its own category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Eligibility {
    Eligible,
    NotEligible,
    Other(String),
}

impl Eligibility {
    /// Normalizes one cell. Empty cells carry no decision.
    pub fn from_cell(cell: &CellValue) -> Option<Self> {
        match cell {
            CellValue::Bool(true) => Some(Eligibility::Eligible),
            CellValue::Bool(false) => Some(Eligibility::NotEligible),
            CellValue::Number(n) if *n == 1.0 => Some(Eligibility::Eligible),
            CellValue::Number(n) if *n == 0.0 => Some(Eligibility::NotEligible),
            other => other.as_text().map(|t| Self::from_text(&t)),
        }
    }

    pub fn from_text(raw: &str) -> Self {
        let key = fold(raw);
        if ELIGIBLE_SYNONYMS.contains(&key.as_str()) {
            Eligibility::Eligible
        } else if NOT_ELIGIBLE_SYNONYMS.contains(&key.as_str()) {
            Eligibility::NotEligible
        } else {
            Eligibility::Other(raw.trim().to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Eligibility::Eligible => "Eligible",
            Eligibility::NotEligible => "Not Eligible",
            Eligibility::Other(literal) => literal,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Eligibility::Other(_))
    }
}

impl Serialize for Eligibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

fn fold(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_synonyms() {
        for raw in ["Eligible", "ELIGIBLE", "pass", "PASS", "True", "1", "yes", "Yes", " Passed "] {
            assert_eq!(Eligibility::from_text(raw), Eligibility::Eligible, "{raw}");
        }
    }

    #[test]
    fn test_negative_synonyms() {
        for raw in ["Not Eligible", "not_eligible", "NOT  ELIGIBLE", "Fail", "FALSE", "0", "No", "ineligible"] {
            assert_eq!(Eligibility::from_text(raw), Eligibility::NotEligible, "{raw}");
        }
    }

    #[test]
    fn test_unrecognized_literal_passes_through() {
        assert_eq!(
            Eligibility::from_text(" Review "),
            Eligibility::Other("Review".to_string())
        );
        assert_eq!(Eligibility::from_text("Review").label(), "Review");
        assert!(!Eligibility::from_text("Review").is_recognized());
    }

    #[test]
    fn test_typed_cells() {
        assert_eq!(Eligibility::from_cell(&CellValue::Bool(true)), Some(Eligibility::Eligible));
        assert_eq!(Eligibility::from_cell(&CellValue::Number(0.0)), Some(Eligibility::NotEligible));
        assert_eq!(Eligibility::from_cell(&CellValue::Number(1.0)), Some(Eligibility::Eligible));
        assert_eq!(
            Eligibility::from_cell(&CellValue::Number(2.0)),
            Some(Eligibility::Other("2".to_string()))
        );
        assert_eq!(Eligibility::from_cell(&CellValue::Empty), None);
        assert_eq!(Eligibility::from_cell(&CellValue::Text("  ".into())), None);
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&vec![
            Eligibility::Eligible,
            Eligibility::NotEligible,
            Eligibility::Other("Review".into()),
        ])
        .unwrap();
        assert_eq!(json, r#"["Eligible","Not Eligible","Review"]"#);
    }
}

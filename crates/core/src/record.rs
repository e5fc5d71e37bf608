//! Record types produced by the classifier.
//!
//! A report row is either a *primary* row (one reporting unit, e.g. a high
//! school) or a *subordinate* row that breaks the primary row down by the
//! kind of college the graduates enrolled in. Both end up as a [`Record`];
//! the [`RecordSubtype`] tells them apart.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The label carried by every record.
///
/// Primary rows are `All`; subordinate rows carry the category label
/// printed in the report (`2YR` or `4YR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordSubtype {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "2YR")]
    TwoYear,
    #[serde(rename = "4YR")]
    FourYear,
}

impl RecordSubtype {
    /// Map a category label from a subordinate row to its subtype.
    ///
    /// Only the two sub-categories are recognized; `"all"` is not a
    /// category label and returns `None`.
    pub fn from_category(label: &str) -> Option<Self> {
        match label {
            "2YR" => Some(RecordSubtype::TwoYear),
            "4YR" => Some(RecordSubtype::FourYear),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordSubtype::All => "all",
            RecordSubtype::TwoYear => "2YR",
            RecordSubtype::FourYear => "4YR",
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, RecordSubtype::All)
    }
}

impl fmt::Display for RecordSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The five numeric columns surfaced for every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub enrolled_public: i64,
    pub remedial_math: i64,
    pub remedial_english: i64,
    pub remedial_both: i64,
    pub remedial_total: i64,
}

impl Metrics {
    /// Build from five consecutive values in column order.
    pub fn from_slice(values: &[i64; 5]) -> Self {
        Metrics {
            enrolled_public: values[0],
            remedial_math: values[1],
            remedial_english: values[2],
            remedial_both: values[3],
            remedial_total: values[4],
        }
    }
}

/// Identity of a record inside one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DedupKey {
    pub unit_id: String,
    pub subtype: RecordSubtype,
}

impl DedupKey {
    pub fn new(unit_id: impl Into<String>, subtype: RecordSubtype) -> Self {
        DedupKey {
            unit_id: unit_id.into(),
            subtype,
        }
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.unit_id, self.subtype)
    }
}

/// An accepted row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub unit_id: String,
    pub unit_name: String,
    pub subtype: RecordSubtype,
    pub year: String,
    /// First value of the primary row's metric block. Subordinate rows
    /// inherit it from their parent.
    pub graduates_total: i64,
    pub metrics: Metrics,
}

impl Record {
    pub fn key(&self) -> DedupKey {
        DedupKey::new(self.unit_id.clone(), self.subtype)
    }
}

/// One output row, with the column names expected downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub unit_id: String,
    pub unit_name: String,
    pub record_subtype: RecordSubtype,
    pub year: String,
    #[serde(rename = "high_school_graduates-equivalent_total")]
    pub graduates_total: i64,
    pub enrolled_in_public_institutions: i64,
    pub remedial_math: i64,
    pub remedial_english: i64,
    pub remedial_both: i64,
    pub remedial_total: i64,
}

/// Column order of [`OutputRow`] when serialized.
pub const OUTPUT_COLUMNS: [&str; 10] = [
    "unit_id",
    "unit_name",
    "record_subtype",
    "year",
    "high_school_graduates-equivalent_total",
    "enrolled_in_public_institutions",
    "remedial_math",
    "remedial_english",
    "remedial_both",
    "remedial_total",
];

impl From<&Record> for OutputRow {
    fn from(record: &Record) -> Self {
        OutputRow {
            unit_id: record.unit_id.clone(),
            unit_name: record.unit_name.clone(),
            record_subtype: record.subtype,
            year: record.year.clone(),
            graduates_total: record.graduates_total,
            enrolled_in_public_institutions: record.metrics.enrolled_public,
            remedial_math: record.metrics.remedial_math,
            remedial_english: record.metrics.remedial_english,
            remedial_both: record.metrics.remedial_both,
            remedial_total: record.metrics.remedial_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtype_from_category() {
        assert_eq!(
            RecordSubtype::from_category("2YR"),
            Some(RecordSubtype::TwoYear)
        );
        assert_eq!(
            RecordSubtype::from_category("4YR"),
            Some(RecordSubtype::FourYear)
        );
        assert_eq!(RecordSubtype::from_category("all"), None);
        assert_eq!(RecordSubtype::from_category("2yr"), None);
    }

    #[test]
    fn test_subtype_display() {
        assert_eq!(format!("{}", RecordSubtype::All), "all");
        assert_eq!(format!("{}", RecordSubtype::TwoYear), "2YR");
        assert_eq!(format!("{}", RecordSubtype::FourYear), "4YR");
    }

    #[test]
    fn test_output_row_maps_metrics() {
        let record = Record {
            unit_id: "001".to_string(),
            unit_name: "Example High School".to_string(),
            subtype: RecordSubtype::All,
            year: "2019".to_string(),
            graduates_total: 120,
            metrics: Metrics::from_slice(&[60, 3, 2, 1, 6]),
        };

        let row = OutputRow::from(&record);
        assert_eq!(row.graduates_total, 120);
        assert_eq!(row.enrolled_in_public_institutions, 60);
        assert_eq!(row.remedial_total, 6);
        assert_eq!(row.record_subtype, RecordSubtype::All);
    }

    #[test]
    fn test_output_row_serializes_column_names() {
        let record = Record {
            unit_id: "7".to_string(),
            unit_name: "X".to_string(),
            subtype: RecordSubtype::TwoYear,
            year: "2020".to_string(),
            graduates_total: 1,
            metrics: Metrics::default(),
        };

        let value = serde_json::to_value(OutputRow::from(&record)).unwrap();
        let object = value.as_object().unwrap();
        for column in OUTPUT_COLUMNS {
            assert!(object.contains_key(column), "missing column {column}");
        }
        assert_eq!(object["record_subtype"], "2YR");
    }
}

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// CellValue – a single cell in a sheet or table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring what spreadsheet exports hold.
/// Blank cells and whitespace-only strings both map to `Missing`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Missing,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Missing => Ok(()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Float(v) => serializer.serialize_f64(*v),
            CellValue::Missing => serializer.serialize_none(),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for quantile math.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Borrow the value as text (classification matching is exact string
    /// comparison, so only `Text` qualifies).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Build a value from raw text, collapsing blanks to `Missing`.
    pub fn from_text(s: &str) -> Self {
        if s.trim().is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// RawSheet – untyped rectangular grid straight out of the workbook
// ---------------------------------------------------------------------------

/// Dense grid of cells in absolute sheet coordinates (row 0 = sheet row 1).
/// Every row has the same width; unoccupied positions are `Missing`.
pub type RawSheet = Vec<Vec<CellValue>>;

// ---------------------------------------------------------------------------
// NormalizedTable – named columns, one record per fund
// ---------------------------------------------------------------------------

/// One table row: semantic column name → value.
pub type Record = BTreeMap<String, CellValue>;

/// A table with an ordered column list and records keyed by column name.
/// Record order is source order (minus dropped rows); after normalization
/// every record carries a non-missing identifier key.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    /// Ordered list of semantic column names.
    pub columns: Vec<String>,
    /// All records, in source order.
    pub records: Vec<Record>,
}

impl NormalizedTable {
    pub fn new(columns: Vec<String>) -> Self {
        NormalizedTable {
            columns,
            records: Vec::new(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a column exists in this table.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Value of `column` in record `row`, `Missing` if absent.
    pub fn value(&self, row: usize, column: &str) -> &CellValue {
        self.records
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&CellValue::Missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_collapses_to_missing() {
        assert_eq!(CellValue::from_text("   "), CellValue::Missing);
        assert_eq!(CellValue::from_text(""), CellValue::Missing);
        assert_eq!(
            CellValue::from_text("股票型"),
            CellValue::Text("股票型".to_string())
        );
    }

    #[test]
    fn as_f64_bridges_integer_and_float() {
        assert_eq!(CellValue::Integer(7).as_f64(), Some(7.0));
        assert_eq!(CellValue::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(CellValue::Text("7".into()).as_f64(), None);
        assert_eq!(CellValue::Missing.as_f64(), None);
    }

    #[test]
    fn missing_displays_as_empty() {
        assert_eq!(CellValue::Missing.to_string(), "");
        assert_eq!(CellValue::Integer(12).to_string(), "12");
    }
}

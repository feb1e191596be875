use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// CellValue – a single cell of a table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, guessed from the text on load.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    /// Empty field.
    Missing,
}

impl CellValue {
    /// Guess the type of a raw (already trimmed) field.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Missing;
        }
        match s.parse::<f64>() {
            Ok(v) => CellValue::Number(v),
            Err(_) => CellValue::Text(s.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Missing => write!(f, "<missing>"),
        }
    }
}

/// One row: column name → value.
pub type Row = BTreeMap<String, CellValue>;

// ---------------------------------------------------------------------------
// Table – ordered columns plus ordered rows
// ---------------------------------------------------------------------------

/// A loaded table. The first column is the time axis, every other column
/// is a channel.
///
/// Invariants (checked by [`Table::new`]): column names are unique and
/// every row holds exactly one value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        if columns.is_empty() {
            return Err(PipelineError::Parse("table has no columns".into()));
        }

        let mut seen = BTreeSet::new();
        for col in &columns {
            if !seen.insert(col.as_str()) {
                return Err(PipelineError::Parse(format!(
                    "duplicate column name '{col}'"
                )));
            }
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() || !columns.iter().all(|c| row.contains_key(c)) {
                return Err(PipelineError::Parse(format!(
                    "row {i} does not match the header columns"
                )));
            }
        }

        Ok(Table { columns, rows })
    }

    /// All column names, time column first.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn time_column(&self) -> &str {
        &self.columns[0]
    }

    /// Column names excluding the time column.
    pub fn channel_names(&self) -> &[String] {
        &self.columns[1..]
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Numeric view of a column. Missing cells become `None`; text cells
    /// are a [`PipelineError::TypeMismatch`].
    pub fn numeric_column(&self, column: &str) -> Result<Vec<Option<f64>>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| match row.get(column) {
                Some(CellValue::Number(v)) => Ok(Some(*v)),
                Some(CellValue::Missing) | None => Ok(None),
                Some(CellValue::Text(s)) => Err(PipelineError::TypeMismatch {
                    column: column.to_string(),
                    row: i,
                    value: s.clone(),
                }),
            })
            .collect()
    }

    /// `(min, max)` over the finite values of the time column, or `None`
    /// when it holds none.
    pub fn time_bounds(&self) -> Option<(f64, f64)> {
        let time = self.time_column();
        self.rows
            .iter()
            .filter_map(|r| r.get(time).and_then(CellValue::as_f64))
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, CellValue)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn cell_type_guessing() {
        assert_eq!(CellValue::parse("1.5"), CellValue::Number(1.5));
        assert_eq!(CellValue::parse("-3"), CellValue::Number(-3.0));
        assert_eq!(CellValue::parse(""), CellValue::Missing);
        assert_eq!(CellValue::parse("abc"), CellValue::Text("abc".into()));
    }

    #[test]
    fn rejects_duplicate_columns() {
        let err = Table::new(vec!["time".into(), "V".into(), "V".into()], vec![]).unwrap_err();
        assert!(matches!(err, PipelineError::Parse(msg) if msg.contains("'V'")));
    }

    #[test]
    fn rejects_rows_missing_a_column() {
        let rows = vec![row(&[("time", CellValue::Number(0.0))])];
        let err = Table::new(vec!["time".into(), "V".into()], rows).unwrap_err();
        assert!(matches!(err, PipelineError::Parse(_)));
    }

    #[test]
    fn numeric_column_and_bounds() {
        let rows = vec![
            row(&[("t", CellValue::Number(2.0)), ("V", CellValue::Number(1.0))]),
            row(&[("t", CellValue::Number(-1.0)), ("V", CellValue::Missing)]),
            row(&[("t", CellValue::Number(7.5)), ("V", CellValue::Number(3.0))]),
        ];
        let table = Table::new(vec!["t".into(), "V".into()], rows).unwrap();

        assert_eq!(table.time_column(), "t");
        assert_eq!(table.channel_names(), ["V".to_string()]);
        assert_eq!(
            table.numeric_column("V").unwrap(),
            vec![Some(1.0), None, Some(3.0)]
        );
        assert_eq!(table.time_bounds(), Some((-1.0, 7.5)));
    }

    #[test]
    fn numeric_column_reports_text_cell() {
        let rows = vec![
            row(&[("t", CellValue::Number(0.0)), ("V", CellValue::Number(1.0))]),
            row(&[("t", CellValue::Number(1.0)), ("V", CellValue::Text("n/a".into()))]),
        ];
        let table = Table::new(vec!["t".into(), "V".into()], rows).unwrap();

        match table.numeric_column("V").unwrap_err() {
            PipelineError::TypeMismatch { column, row, value } => {
                assert_eq!(column, "V");
                assert_eq!(row, 1);
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn time_bounds_skip_non_finite_values() {
        let rows = vec![
            row(&[("t", CellValue::Number(f64::NAN)), ("V", CellValue::Number(1.0))]),
            row(&[("t", CellValue::Number(2.0)), ("V", CellValue::Number(1.0))]),
            row(&[("t", CellValue::Number(f64::INFINITY)), ("V", CellValue::Number(1.0))]),
            row(&[("t", CellValue::Number(0.5)), ("V", CellValue::Number(1.0))]),
        ];
        let table = Table::new(vec!["t".into(), "V".into()], rows).unwrap();
        assert_eq!(table.time_bounds(), Some((0.5, 2.0)));

        let rows = vec![row(&[("t", CellValue::Number(f64::NAN)), ("V", CellValue::Missing)])];
        let all_nan = Table::new(vec!["t".into(), "V".into()], rows).unwrap();
        assert_eq!(all_nan.time_bounds(), None);
    }

    #[test]
    fn header_only_table_has_no_time_bounds() {
        let table = Table::new(vec!["t".into(), "V".into()], vec![]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.time_bounds(), None);
    }
}

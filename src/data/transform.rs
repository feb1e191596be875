use super::model::{CellValue, Row, Table};
use super::shaping::ShapingSpec;
use crate::error::{PipelineError, Result};

/// Apply a shaping spec to a raw table, producing a new processed table
/// with the same columns (in order) and the same number of rows.
///
/// Missing cells stay missing. Channels the spec does not cover are copied
/// unchanged.
pub fn apply_shaping(raw: &Table, spec: &ShapingSpec) -> Result<Table> {
    let time = raw.time_column();
    let mut rows: Vec<Row> = Vec::with_capacity(raw.len());

    for (i, raw_row) in raw.rows().iter().enumerate() {
        let mut row = Row::new();
        for column in raw.columns() {
            let Some(cell) = raw_row.get(column) else {
                continue;
            };
            let value = if column == time {
                linear(cell, 1.0, spec.time_offset, column, i)?
            } else if let Some((scale, offset)) = spec.coefficients(column) {
                linear(cell, scale, offset, column, i)?
            } else {
                cell.clone()
            };
            row.insert(column.clone(), value);
        }
        rows.push(row);
    }

    for column in raw.channel_names() {
        if spec.coefficients(column).is_none() {
            log::warn!("Column '{column}' has no shaping entry; passed through unchanged");
        }
    }
    log::debug!(
        "Shaped {} rows x {} channels (time offset {})",
        rows.len(),
        raw.channel_names().len(),
        spec.time_offset
    );

    Table::new(raw.columns().to_vec(), rows)
}

fn linear(cell: &CellValue, scale: f64, offset: f64, column: &str, row: usize) -> Result<CellValue> {
    match cell {
        CellValue::Number(v) => Ok(CellValue::Number(v * scale + offset)),
        CellValue::Missing => Ok(CellValue::Missing),
        CellValue::Text(s) => Err(PipelineError::TypeMismatch {
            column: column.to_string(),
            row,
            value: s.clone(),
        }),
    }
}

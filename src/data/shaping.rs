use std::collections::BTreeMap;

use super::model::{CellValue, Table};
use crate::error::{PipelineError, Result};

/// Row of the shaping table holding per-channel scale factors.
pub const SCALE_ROW: usize = 0;
/// Row of the shaping table holding per-channel offsets (and, in the time
/// column, the global time offset).
pub const OFFSET_ROW: usize = 1;

// ---------------------------------------------------------------------------
// ShapingSpec – linear calibration per channel plus a global time shift
// ---------------------------------------------------------------------------

/// `value ↦ value * scale[c] + offset[c]` per channel, `t ↦ t + time_offset`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapingSpec {
    pub scale: BTreeMap<String, f64>,
    pub offset: BTreeMap<String, f64>,
    pub time_offset: f64,
}

impl ShapingSpec {
    /// Extract the spec from a (label-validated) shaping table.
    ///
    /// An empty time-offset cell means no time shift.
    pub fn from_table(shaping: &Table) -> Result<Self> {
        if shaping.len() < 2 {
            return Err(PipelineError::ShapingFormat(format!(
                "expected a scale row and an offset row, found {} row(s)",
                shaping.len()
            )));
        }

        let time = shaping.time_column();
        let time_offset = match shaping.get(OFFSET_ROW, time) {
            Some(CellValue::Number(v)) if v.is_finite() => *v,
            Some(CellValue::Number(v)) => {
                return Err(PipelineError::ShapingFormat(format!(
                    "time offset '{v}' in column '{time}' is not finite"
                )));
            }
            Some(CellValue::Missing) | None => 0.0,
            Some(CellValue::Text(s)) => {
                return Err(PipelineError::ShapingFormat(format!(
                    "time offset '{s}' in column '{time}' is not a number"
                )));
            }
        };

        let mut scale = BTreeMap::new();
        let mut offset = BTreeMap::new();
        for channel in shaping.channel_names() {
            scale.insert(channel.clone(), numeric_cell(shaping, SCALE_ROW, channel)?);
            offset.insert(channel.clone(), numeric_cell(shaping, OFFSET_ROW, channel)?);
        }

        Ok(ShapingSpec {
            scale,
            offset,
            time_offset,
        })
    }

    /// `(scale, offset)` for a channel, if the spec covers it.
    pub fn coefficients(&self, channel: &str) -> Option<(f64, f64)> {
        Some((*self.scale.get(channel)?, *self.offset.get(channel)?))
    }
}

fn numeric_cell(table: &Table, row: usize, column: &str) -> Result<f64> {
    match table.get(row, column) {
        Some(CellValue::Number(v)) => Ok(*v),
        Some(CellValue::Text(s)) => Err(PipelineError::TypeMismatch {
            column: column.to_string(),
            row,
            value: s.clone(),
        }),
        Some(CellValue::Missing) | None => {
            let what = if row == SCALE_ROW { "scale" } else { "offset" };
            Err(PipelineError::ShapingFormat(format!(
                "missing {what} in column '{column}'"
            )))
        }
    }
}

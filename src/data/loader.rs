use std::io::Read;
use std::path::Path;

use anyhow::Context;

use super::model::{CellValue, Row, Table};
use crate::error::{PipelineError, Result};

/// Lines whose first non-whitespace character is this marker are dropped.
pub const COMMENT_MARKER: char = '#';

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from a CSV file on disk.
pub fn load_file(path: &Path) -> anyhow::Result<Table> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let table = load_table(file).with_context(|| format!("reading {}", path.display()))?;
    if table.is_empty() {
        log::warn!("{} has a header but no data rows", path.display());
    }
    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        table.len(),
        table.columns(),
        path.display()
    );
    Ok(table)
}

/// Parse a delimited table from any reader.
pub fn load_table<R: Read>(mut reader: R) -> Result<Table> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8(bytes)
        .map_err(|e| PipelineError::Parse(format!("input is not valid UTF-8: {e}")))?;
    parse_str(&text)
}

/// Parse a delimited table from text.
///
/// Layout: one header row with column names (first one is time), then one
/// row per sample. Comment and blank lines are removed before parsing.
pub fn parse_str(text: &str) -> Result<Table> {
    let stripped = strip_comments(text);
    if stripped.is_empty() {
        return Err(PipelineError::Parse(
            "input is empty after removing comment lines".into(),
        ));
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(stripped.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() != columns.len() {
            return Err(PipelineError::Parse(format!(
                "row {row_no} has {} fields but the header has {}",
                record.len(),
                columns.len()
            )));
        }

        let row: Row = columns
            .iter()
            .zip(record.iter())
            .map(|(col, field)| (col.clone(), CellValue::parse(field)))
            .collect();
        rows.push(row);
    }

    Table::new(columns, rows)
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

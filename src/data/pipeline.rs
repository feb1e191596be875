use std::path::Path;

use anyhow::Context;

use super::loader;
use super::model::Table;
use super::shaping::ShapingSpec;
use super::transform::apply_shaping;
use super::validate::validate_labels;
use crate::error::Result;

/// Validate, extract the shaping spec, and transform.
pub fn process(raw: &Table, shaping: &Table) -> Result<Table> {
    validate_labels(raw, shaping)?;
    let spec = ShapingSpec::from_table(shaping)?;
    apply_shaping(raw, &spec)
}

/// Run the whole pipeline from two files on disk.
pub fn process_files(raw_path: &Path, shaping_path: &Path) -> anyhow::Result<Table> {
    let raw = loader::load_file(raw_path).context("loading raw data")?;
    let shaping = loader::load_file(shaping_path).context("loading shaping data")?;
    let processed = process(&raw, &shaping)?;
    log::info!(
        "Processed {} rows, channels {:?}",
        processed.len(),
        processed.channel_names()
    );
    Ok(processed)
}

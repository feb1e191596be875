use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// Everything that can abort a raw + shaping submission.
///
/// All variants are terminal for the current submission: no processed
/// table is produced and the user is expected to fix the files and retry.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed or empty table.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Raw and shaping tables disagree on their channel labels.
    #[error("{0}")]
    LabelMismatch(LabelMismatch),

    /// Shaping table is missing rows or coefficients, or has a bad time offset.
    #[error("Shaping format error: {0}")]
    ShapingFormat(String),

    /// A cell used in arithmetic does not hold a number.
    #[error("Type mismatch in column '{column}', row {row}: '{value}' is not a number")]
    TypeMismatch {
        column: String,
        row: usize,
        value: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::Parse(err.to_string())
    }
}

/// The two ways the channel label sets can disagree.
///
/// Labels are kept sorted so messages are stable across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelMismatch {
    /// Raw data has channels the shaping file does not cover.
    RawExtra(Vec<String>),
    /// Shaping file names channels absent from the raw data.
    ShapingExtra(Vec<String>),
}

impl fmt::Display for LabelMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelMismatch::RawExtra(labels) => write!(
                f,
                "The following data labels in the raw data file are not specified in the shaping data file: {}",
                labels.join(", ")
            ),
            LabelMismatch::ShapingExtra(labels) => write!(
                f,
                "The following data labels in the shaping data file are not found in the raw data file: {}",
                labels.join(", ")
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

// ---------------------------------------------------------------------------
// Chart errors
// ---------------------------------------------------------------------------

/// Failure to turn a processed table plus a graph spec into a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no columns selected")]
    NoColumns,

    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error(transparent)]
    Data(#[from] PipelineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_mismatch_messages() {
        let raw = PipelineError::LabelMismatch(LabelMismatch::RawExtra(vec![
            "Ia".into(),
            "Ib".into(),
        ]));
        assert_eq!(
            raw.to_string(),
            "The following data labels in the raw data file are not specified in the shaping data file: Ia, Ib"
        );

        let shaping =
            PipelineError::LabelMismatch(LabelMismatch::ShapingExtra(vec!["Torque".into()]));
        assert_eq!(
            shaping.to_string(),
            "The following data labels in the shaping data file are not found in the raw data file: Torque"
        );
    }

    #[test]
    fn type_mismatch_names_the_cell() {
        let err = PipelineError::TypeMismatch {
            column: "V".into(),
            row: 3,
            value: "abc".into(),
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch in column 'V', row 3: 'abc' is not a number"
        );
    }
}

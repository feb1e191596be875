use std::collections::BTreeSet;

use super::model::Table;
use crate::error::{LabelMismatch, PipelineError, Result};

/// Check that raw and shaping tables share the same channel labels.
///
/// The time column (first column) of each table is ignored. Raw-only
/// labels are reported first; shaping-only labels are reported only when
/// the raw side is fully covered.
pub fn validate_labels(raw: &Table, shaping: &Table) -> Result<()> {
    let raw_labels: BTreeSet<&String> = raw.channel_names().iter().collect();
    let shaping_labels: BTreeSet<&String> = shaping.channel_names().iter().collect();

    let extra_raw: Vec<String> = raw_labels
        .difference(&shaping_labels)
        .map(|s| s.to_string())
        .collect();
    if !extra_raw.is_empty() {
        return Err(PipelineError::LabelMismatch(LabelMismatch::RawExtra(
            extra_raw,
        )));
    }

    let extra_shaping: Vec<String> = shaping_labels
        .difference(&raw_labels)
        .map(|s| s.to_string())
        .collect();
    if !extra_shaping.is_empty() {
        return Err(PipelineError::LabelMismatch(LabelMismatch::ShapingExtra(
            extra_shaping,
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::loader::parse_str;

    fn header_only(columns: &[String]) -> Table {
        Table::new(columns.to_vec(), vec![]).unwrap()
    }

    #[test]
    fn matching_labels_in_any_order() {
        let raw = parse_str("time,Va,Vb,Ia\n0,1,2,3\n").unwrap();
        let shaping = parse_str("t,Ia,Va,Vb\n_,1,1,1\n0,0,0,0\n").unwrap();
        validate_labels(&raw, &shaping).unwrap();
    }

    #[test]
    fn raw_extra_reported() {
        let raw = parse_str("time,Va,Vb,Ia\n0,1,2,3\n").unwrap();
        let shaping = parse_str("time,Va\n_,1\n0,0\n").unwrap();

        match validate_labels(&raw, &shaping).unwrap_err() {
            PipelineError::LabelMismatch(LabelMismatch::RawExtra(labels)) => {
                assert_eq!(labels, ["Ia", "Vb"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn raw_extra_wins_over_shaping_extra() {
        let raw = parse_str("time,Va,Speed\n0,1,2\n").unwrap();
        let shaping = parse_str("time,Va,Torque\n_,1,1\n0,0,0\n").unwrap();

        let err = validate_labels(&raw, &shaping).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("raw data file are not specified"), "{msg}");
        assert!(msg.ends_with(": Speed"), "{msg}");
        assert!(!msg.contains("Torque"), "{msg}");
    }

    #[test]
    fn shaping_extra_reported_when_raw_is_covered() {
        let raw = parse_str("time,Va\n0,1\n").unwrap();
        let shaping = parse_str("time,Va,Torque,Ib\n_,1,1,1\n0,0,0,0\n").unwrap();

        match validate_labels(&raw, &shaping).unwrap_err() {
            PipelineError::LabelMismatch(LabelMismatch::ShapingExtra(labels)) => {
                assert_eq!(labels, ["Ib", "Torque"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    fn label_set() -> impl Strategy<Value = BTreeSet<String>> {
        prop::collection::btree_set("[A-Z][a-z]{0,3}", 0..6)
    }

    proptest! {
        #[test]
        fn identical_label_sets_always_pass(labels in label_set()) {
            let mut raw_cols = vec!["time".to_string()];
            raw_cols.extend(labels.iter().cloned());
            let mut shaping_cols = vec!["t".to_string()];
            shaping_cols.extend(labels.iter().rev().cloned());

            prop_assert!(validate_labels(&header_only(&raw_cols), &header_only(&shaping_cols)).is_ok());
        }

        #[test]
        fn raw_extra_lists_exact_difference(raw in label_set(), shaping in label_set()) {
            // "time" is generated by neither strategy, so it cannot collide
            let mut raw_cols = vec!["time".to_string()];
            raw_cols.extend(raw.iter().cloned());
            let mut shaping_cols = vec!["time".to_string()];
            shaping_cols.extend(shaping.iter().cloned());

            let expected_raw: Vec<String> = raw.difference(&shaping).cloned().collect();
            let expected_shaping: Vec<String> = shaping.difference(&raw).cloned().collect();

            let result = validate_labels(&header_only(&raw_cols), &header_only(&shaping_cols));
            if !expected_raw.is_empty() {
                prop_assert!(matches!(
                    result,
                    Err(PipelineError::LabelMismatch(LabelMismatch::RawExtra(ref l))) if *l == expected_raw
                ));
            } else if !expected_shaping.is_empty() {
                prop_assert!(matches!(
                    result,
                    Err(PipelineError::LabelMismatch(LabelMismatch::ShapingExtra(ref l))) if *l == expected_shaping
                ));
            } else {
                prop_assert!(result.is_ok());
            }
        }
    }
}

//! Checks on raw input tables before they enter the pipeline.

use crate::core::Frame;
use crate::error::{RegressorError, Result};

/// Fail unless two tables share exactly the same index.
pub fn verify_same_index(x: &[i64], y: &[i64], context: &str) -> Result<()> {
    if x != y {
        return Err(RegressorError::IndexMismatch {
            context: format!(
                "{context}: X has {} rows and y has {} rows with differing keys",
                x.len(),
                y.len()
            ),
        });
    }
    Ok(())
}

/// Check that the configured time column exists and is evenly spaced.
///
/// With no time column configured there is nothing to check.
pub fn check_monospaced(x: &Frame, timecol: Option<&str>) -> Result<()> {
    let Some(name) = timecol else {
        return Ok(());
    };
    let time = match x.time_column() {
        Some(time) if time.name == name => time,
        _ => {
            return Err(RegressorError::InvalidParameter(format!(
                "time column '{name}' not found in input"
            )))
        }
    };

    let mut steps = time.values.windows(2).map(|w| w[1] - w[0]);
    if let Some(first) = steps.next() {
        if let Some(other) = steps.find(|&step| step != first) {
            return Err(RegressorError::NotMonospaced(format!(
                "column '{name}' has steps of {first} and {other}"
            )));
        }
    }
    Ok(())
}

/// Fail if any feature is still missing.
pub fn assert_no_missing(features: &Frame) -> Result<()> {
    let rows = features.rows_with_missing();
    if rows > 0 {
        return Err(RegressorError::MissingValues { rows });
    }
    Ok(())
}

//! Target shifting and differencing for multi-horizon regression.
//!
//! A model trained for horizon `p` learns, for each row, the value `p` steps
//! ahead. With differencing enabled it learns `y[t + p] - y[t]` instead, and
//! the difference is undone by adding `y[t]` back.

use crate::core::{Frame, Series};
use crate::error::{RegressorError, Result};

/// Shift a series backward by `horizon` steps: row `t` receives `y[t + horizon]`.
///
/// Rows without a value `horizon` steps ahead become `NaN`.
pub fn lead(values: &[f64], horizon: usize) -> Vec<f64> {
    (0..values.len())
        .map(|t| values.get(t + horizon).copied().unwrap_or(f64::NAN))
        .collect()
}

/// Name of the shifted-target column for one horizon.
pub fn target_column_name(name: &str, use_diff: bool, horizon: usize) -> String {
    if use_diff {
        format!("{name}_diff_{horizon}")
    } else {
        format!("{name}_lead_{horizon}")
    }
}

/// Build the supervised target table: one column per horizon.
///
/// # Arguments
/// * `y` - The target series
/// * `use_diff` - Learn `y[t + p] - y[t]` instead of `y[t + p]`
/// * `horizons` - Validated horizons, in output order
///
/// # Errors
/// Differencing at horizon 0 is degenerate and returns
/// [`RegressorError::DifferencingAtHorizonZero`].
pub fn shift_target(y: &Series, use_diff: bool, horizons: &[usize]) -> Result<Frame> {
    if use_diff && horizons.contains(&0) {
        return Err(RegressorError::DifferencingAtHorizonZero);
    }

    let values = y.values();
    let columns = horizons
        .iter()
        .map(|&p| {
            let mut shifted = lead(values, p);
            if use_diff {
                for (s, &current) in shifted.iter_mut().zip(values) {
                    *s -= current;
                }
            }
            (target_column_name(y.name(), use_diff, p), shifted)
        })
        .collect();

    Frame::from_columns(y.index().to_vec(), columns)
}

/// Undo differencing by adding the aligned original value to every column.
///
/// The table and the original series must share the same index.
pub fn inverse_difference(differenced: &Frame, original: &Series) -> Result<Frame> {
    if differenced.index() != original.index() {
        return Err(RegressorError::IndexMismatch {
            context: "differenced table and original target must share an index".to_string(),
        });
    }

    let mut restored = differenced.clone();
    let base = original.values();
    for column in restored.values_mut() {
        for (v, &b) in column.iter_mut().zip(base) {
            *v += b;
        }
    }
    Ok(restored)
}

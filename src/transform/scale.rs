//! Target scaling seam.
//!
//! The pipeline never picks a scaling algorithm; callers plug one in through
//! [`Scaler`]. Arrays are column-major: `values[column][row]`.

use crate::error::{RegressorError, Result};
use std::path::Path;

/// A fitted, invertible transform over target columns.
///
/// Contract:
/// * every method returns exactly as many columns as it receives, each with
///   the same number of rows;
/// * `NaN` inputs map to `NaN` outputs and never influence fitted statistics;
/// * `inverse_transform(transform(v)) == v` within floating tolerance;
/// * `transform` and `inverse_transform` are only valid after `fit_transform`
///   or `load`, and must accept any column count the scaler was fitted on.
pub trait Scaler: std::fmt::Debug + Send + Sync {
    /// Learn scaling parameters from `values` and return them scaled.
    fn fit_transform(&mut self, values: &[Vec<f64>]) -> Result<Vec<Vec<f64>>>;

    /// Scale `values` with previously learned parameters.
    fn transform(&self, values: &[Vec<f64>]) -> Result<Vec<Vec<f64>>>;

    /// Map scaled values back to real units.
    fn inverse_transform(&self, values: &[Vec<f64>]) -> Result<Vec<Vec<f64>>>;

    /// Persist learned parameters under `folder` using `prefix`.
    fn dump(&self, folder: &Path, prefix: &str) -> Result<()>;

    /// Restore parameters written by [`Scaler::dump`].
    fn load(&mut self, folder: &Path, prefix: &str) -> Result<()>;

    /// Copy of this scaler, learned parameters included.
    fn clone_box(&self) -> BoxedScaler;
}

/// Type alias for boxed scaler trait objects.
pub type BoxedScaler = Box<dyn Scaler>;

impl Clone for BoxedScaler {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Check that a scaler kept the shape of its input.
pub(crate) fn check_shape(input: &[Vec<f64>], output: &[Vec<f64>]) -> Result<()> {
    if input.len() != output.len() {
        return Err(RegressorError::DimensionMismatch {
            expected: input.len(),
            got: output.len(),
        });
    }
    for (i, o) in input.iter().zip(output) {
        if i.len() != o.len() {
            return Err(RegressorError::DimensionMismatch {
                expected: i.len(),
                got: o.len(),
            });
        }
    }
    Ok(())
}

//! Trainable trait defining the seam between the pipeline and a model.

use crate::error::Result;
use std::path::Path;

/// Feature/target pair handed to a model for validation during training.
pub type ValidationSet<'a> = (&'a [Vec<f64>], &'a [Vec<f64>]);

/// Common interface for every underlying trainable model.
///
/// Matrices are column-major (`values[column][row]`). During `fit` the
/// features contain no missing values; the targets may contain `NaN` for
/// horizons whose future value is unknown in a row.
pub trait Trainable: Send + Sync {
    /// Whatever the training run reports back (loss curves, iterations, ...).
    type History;

    /// Train on preprocessed features `x` and (shifted, scaled) targets `y`.
    fn fit(
        &mut self,
        x: &[Vec<f64>],
        y: &[Vec<f64>],
        validation: Option<ValidationSet<'_>>,
    ) -> Result<Self::History>;

    /// Predict one column per configured output, one row per row of `x`.
    ///
    /// Rows whose features are incomplete may be predicted as `NaN`.
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<Vec<f64>>>;

    /// Persist model state under `folder` using `prefix`.
    fn dump(&self, folder: &Path, prefix: &str) -> Result<()>;

    /// Restore model state written by [`Trainable::dump`].
    fn load(&mut self, folder: &Path, prefix: &str) -> Result<()>;

    /// Get the model name.
    fn name(&self) -> &str;
}

//! Feature-engineering seam.
//!
//! The pipeline hands raw input tables to a [`FeatureEngineer`] and receives
//! the numeric feature matrix the trainable model consumes. Concrete
//! strategies (rolling windows, Fourier terms, ...) live outside this crate;
//! [`IdentityFeatureEngineer`] is the default passthrough.
//!
//! # Example
//!
//! ```
//! use timeseries_regressor::core::Frame;
//! use timeseries_regressor::features::{FeatureEngineer, IdentityFeatureEngineer};
//!
//! let x = Frame::from_columns(vec![0, 1], vec![("x", vec![1.0, 2.0])]).unwrap();
//! let y = Frame::from_columns(vec![0, 1], vec![("y_lead_1", vec![2.0, f64::NAN])]).unwrap();
//!
//! let mut fe = IdentityFeatureEngineer::new();
//! let features = fe.fit_transform(&x, &y).unwrap();
//! assert_eq!(fe.feature_names(), vec!["x"]);
//! assert_eq!(features, vec![vec![1.0, 2.0]]);
//! ```

mod identity;

pub use identity::IdentityFeatureEngineer;

use crate::core::{Frame, Series};
use crate::error::Result;
use std::path::Path;

/// Turns raw input columns into the model's feature matrix.
///
/// Contract:
/// * the returned matrix is column-major with `feature_names().len()` columns,
///   each holding one value per row of `x`, in the row order of `x`;
/// * warm-up rows may hold `NaN`; the pipeline trims leading incomplete rows
///   during fit and rejects any remaining gaps;
/// * `feature_names` is only meaningful after `fit_transform` or `load`.
pub trait FeatureEngineer: std::fmt::Debug + Send + Sync {
    /// Learn any state from `x` (and the shifted target `y`) and return features.
    fn fit_transform(&mut self, x: &Frame, y: &Frame) -> Result<Vec<Vec<f64>>>;

    /// Compute features with fitted state. `y` is the raw target, if known,
    /// for strategies that build lagged target features.
    fn transform(&self, x: &Frame, y: Option<&Series>) -> Result<Vec<Vec<f64>>>;

    /// Ordered names of the produced feature columns.
    fn feature_names(&self) -> Vec<String>;

    /// Persist fitted state under `folder` using `prefix`.
    fn dump(&self, folder: &Path, prefix: &str) -> Result<()>;

    /// Restore state written by [`FeatureEngineer::dump`].
    fn load(&mut self, folder: &Path, prefix: &str) -> Result<()>;

    /// Copy of this engineer, fitted state included.
    fn clone_box(&self) -> BoxedFeatureEngineer;
}

/// Type alias for boxed feature engineer trait objects.
pub type BoxedFeatureEngineer = Box<dyn FeatureEngineer>;

impl Clone for BoxedFeatureEngineer {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

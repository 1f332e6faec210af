//! Trainable models and the regressor that wraps them.
//!
//! A model only needs to implement [`Trainable`]: fit and predict on
//! column-major matrices, plus dump/load of its own state. Target shifting,
//! differencing, scaling, feature engineering, output naming and scoring are
//! handled by [`TimeseriesRegressor`] through the shared pipeline.

mod persist;
mod regressor;
mod traits;

pub use regressor::TimeseriesRegressor;
pub use traits::{Trainable, ValidationSet};

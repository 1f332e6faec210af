//! # timeseries-regressor
//!
//! Multi-horizon, quantile-aware time series regression.
//!
//! A [`TimeseriesRegressor`](models::TimeseriesRegressor) turns any model
//! implementing [`Trainable`](models::Trainable) into a forecaster for one or
//! more horizons ahead. The shared pipeline shifts and optionally differences
//! the target, scales it, engineers features, names outputs, rebuilds
//! absolute forecasts, reconciles quantiles and scores predictions with a
//! combined MSE and pinball loss.

#![allow(clippy::type_complexity)]
#![allow(clippy::needless_range_loop)]

pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod models;
pub mod pipeline;
pub mod transform;
pub mod utils;
pub mod validation;

pub use config::RegressorConfig;
pub use error::{RegressorError, Result};

pub mod prelude {
    pub use crate::config::RegressorConfig;
    pub use crate::core::{Frame, OutputKind, OutputLayout, Series};
    pub use crate::error::{RegressorError, Result};
    pub use crate::features::{FeatureEngineer, IdentityFeatureEngineer};
    pub use crate::models::{TimeseriesRegressor, Trainable, ValidationSet};
    pub use crate::pipeline::ForecastPipeline;
    pub use crate::transform::Scaler;
}

//! Utility functions for scoring forecasts.

pub mod metrics;

pub use metrics::{complete_rows, forecast_loss, mse, pinball_loss};

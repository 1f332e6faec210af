//! Regressor configuration.

use crate::error::Result;
use crate::validation::{validate_predict_ahead, validate_quantiles};
use serde::{Deserialize, Serialize};

/// Settings shared by every regressor, fixed at construction.
///
/// # Example
///
/// ```
/// use timeseries_regressor::RegressorConfig;
///
/// let config = RegressorConfig::new()
///     .with_predict_ahead(vec![1, 2])
///     .with_quantiles(vec![0.1, 0.9])
///     .with_timecol("TIME");
/// assert_eq!(config.validate().unwrap(), vec![1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressorConfig {
    predict_ahead: Vec<i64>,
    quantiles: Vec<f64>,
    use_diff_of_y: bool,
    timecol: Option<String>,
    force_monotonic_quantiles: bool,
}

impl Default for RegressorConfig {
    fn default() -> Self {
        Self {
            predict_ahead: vec![1],
            quantiles: Vec::new(),
            use_diff_of_y: true,
            timecol: None,
            force_monotonic_quantiles: false,
        }
    }
}

impl RegressorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Horizons to forecast; `[0]` predicts the present.
    pub fn with_predict_ahead(mut self, predict_ahead: Vec<i64>) -> Self {
        self.predict_ahead = predict_ahead;
        self
    }

    /// Quantile levels predicted in addition to the mean.
    pub fn with_quantiles(mut self, quantiles: Vec<f64>) -> Self {
        self.quantiles = quantiles;
        self
    }

    pub fn with_use_diff_of_y(mut self, use_diff_of_y: bool) -> Self {
        self.use_diff_of_y = use_diff_of_y;
        self
    }

    pub fn with_timecol(mut self, timecol: impl Into<String>) -> Self {
        self.timecol = Some(timecol.into());
        self
    }

    pub fn with_force_monotonic_quantiles(mut self, force: bool) -> Self {
        self.force_monotonic_quantiles = force;
        self
    }

    pub fn predict_ahead(&self) -> &[i64] {
        &self.predict_ahead
    }

    pub fn quantiles(&self) -> &[f64] {
        &self.quantiles
    }

    pub fn use_diff_of_y(&self) -> bool {
        self.use_diff_of_y
    }

    pub fn timecol(&self) -> Option<&str> {
        self.timecol.as_deref()
    }

    pub fn force_monotonic_quantiles(&self) -> bool {
        self.force_monotonic_quantiles
    }

    /// Validate quantiles and horizons, returning the typed horizons.
    pub fn validate(&self) -> Result<Vec<usize>> {
        validate_quantiles(&self.quantiles)?;
        validate_predict_ahead(&self.predict_ahead, self.use_diff_of_y)
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

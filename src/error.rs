//! Error types for the timeseries-regressor pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, RegressorError>;

/// Errors that can occur while preparing data, fitting, predicting or scoring.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegressorError {
    /// A forecast horizon is below zero.
    #[error("all values of predict_ahead must be 0 or larger, got {0}")]
    NegativeHorizon(i64),

    /// The same horizon appears twice.
    #[error("predict_ahead contains duplicate value {0}")]
    DuplicateHorizon(i64),

    /// No horizon configured at all.
    #[error("predict_ahead must contain at least one horizon")]
    EmptyHorizons,

    /// Differencing requested for horizon 0.
    #[error("use_diff_of_y must be false when predicting horizon 0")]
    DifferencingAtHorizonZero,

    /// Quantile level outside (0, 1) or repeated.
    #[error("invalid quantile {0}: levels must be unique and strictly between 0 and 1")]
    InvalidQuantile(f64),

    /// X and y (or two tables that must line up) carry different indexes.
    #[error("index mismatch: {context}")]
    IndexMismatch { context: String },

    /// The configured time column is not evenly spaced.
    #[error("data is not monospaced: {0}")]
    NotMonospaced(String),

    /// Missing values remain in the feature table after trimming.
    #[error("data cannot contain missing values after trimming, found them in {rows} rows")]
    MissingValues { rows: usize },

    /// Model has not been fitted yet.
    #[error("regressor must be fitted before this operation")]
    FitRequired,

    /// The target is needed to rebuild absolute forecasts but was not given.
    #[error("y is required to undo differencing or build target-derived features")]
    TargetRequired,

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Writing or reading persisted state failed.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl From<std::io::Error> for RegressorError {
    fn from(err: std::io::Error) -> Self {
        RegressorError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for RegressorError {
    fn from(err: serde_json::Error) -> Self {
        RegressorError::Persistence(err.to_string())
    }
}

impl RegressorError {
    /// True for errors raised by horizon/quantile validation.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RegressorError::NegativeHorizon(_)
                | RegressorError::DuplicateHorizon(_)
                | RegressorError::EmptyHorizons
                | RegressorError::DifferencingAtHorizonZero
                | RegressorError::InvalidQuantile(_)
        )
    }
}

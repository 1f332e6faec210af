//! Horizon and quantile configuration checks.

use crate::error::{RegressorError, Result};

/// Validate `predict_ahead` and return it as typed horizons.
///
/// Rules: at least one horizon, every horizon ≥ 0, no duplicates, and
/// `[0]` on its own cannot be combined with differencing.
pub fn validate_predict_ahead(predict_ahead: &[i64], use_diff_of_y: bool) -> Result<Vec<usize>> {
    if predict_ahead.is_empty() {
        return Err(RegressorError::EmptyHorizons);
    }
    if let Some(&p) = predict_ahead.iter().find(|&&p| p < 0) {
        return Err(RegressorError::NegativeHorizon(p));
    }
    if predict_ahead == [0] && use_diff_of_y {
        return Err(RegressorError::DifferencingAtHorizonZero);
    }
    for (i, p) in predict_ahead.iter().enumerate() {
        if predict_ahead[..i].contains(p) {
            return Err(RegressorError::DuplicateHorizon(*p));
        }
    }
    Ok(predict_ahead.iter().map(|&p| p as usize).collect())
}

/// Validate quantile levels: strictly inside (0, 1) and unique.
pub fn validate_quantiles(quantiles: &[f64]) -> Result<()> {
    for (i, &q) in quantiles.iter().enumerate() {
        if !(q > 0.0 && q < 1.0) || quantiles[..i].contains(&q) {
            return Err(RegressorError::InvalidQuantile(q));
        }
    }
    Ok(())
}

//! Loss functions for scoring multi-horizon quantile forecasts.

use crate::core::{OutputKind, OutputLayout};
use crate::error::{RegressorError, Result};

/// Calculate MSE between two slices.
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64
}

/// Mean tilted (pinball) loss of a quantile forecast.
///
/// With residual `e = actual - predicted`, each row contributes
/// `max(q * e, (q - 1) * e)`: under-prediction costs `q` per unit and
/// over-prediction costs `1 - q`.
pub fn pinball_loss(actual: &[f64], predicted: &[f64], q: f64) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| {
            let e = a - p;
            (q * e).max((q - 1.0) * e)
        })
        .sum::<f64>()
        / actual.len() as f64
}

/// Positions of rows where neither table has a missing value.
pub fn complete_rows(prediction: &[Vec<f64>], ideal: &[Vec<f64>]) -> Vec<usize> {
    let n_rows = ideal
        .first()
        .or(prediction.first())
        .map_or(0, |c| c.len());
    (0..n_rows)
        .filter(|&r| {
            prediction.iter().all(|c| !c[r].is_nan()) && ideal.iter().all(|c| !c[r].is_nan())
        })
        .collect()
}

/// Combined loss of a prediction table against the ideal forecast.
///
/// `prediction` is laid out by `layout`; `ideal` holds one column per
/// horizon in horizon order. Rows with a missing value in either table are
/// dropped first. The result is the MSE of the mean forecast summed over
/// horizons plus the pinball loss summed over horizons and quantiles. Lower
/// is better.
pub fn forecast_loss(
    prediction: &[Vec<f64>],
    ideal: &[Vec<f64>],
    layout: &OutputLayout,
) -> Result<f64> {
    if prediction.len() != layout.len() {
        return Err(RegressorError::DimensionMismatch {
            expected: layout.len(),
            got: prediction.len(),
        });
    }
    if ideal.len() != layout.horizons().len() {
        return Err(RegressorError::DimensionMismatch {
            expected: layout.horizons().len(),
            got: ideal.len(),
        });
    }
    let n_rows = ideal.first().map_or(0, |c| c.len());
    if let Some(bad) = prediction.iter().chain(ideal).find(|c| c.len() != n_rows) {
        return Err(RegressorError::DimensionMismatch {
            expected: n_rows,
            got: bad.len(),
        });
    }

    let rows = complete_rows(prediction, ideal);
    if rows.is_empty() {
        return Err(RegressorError::InsufficientData { needed: 1, got: 0 });
    }
    let pick = |column: &[f64]| -> Vec<f64> { rows.iter().map(|&r| column[r]).collect() };
    let actual: Vec<Vec<f64>> = ideal.iter().map(|c| pick(c)).collect();

    let mut loss = 0.0;
    for (hp, actual_h) in actual.iter().enumerate() {
        let mean = pick(&prediction[layout.position(hp, OutputKind::Mean)]);
        loss += mse(actual_h, &mean);
    }
    for (qi, &q) in layout.quantiles().iter().enumerate() {
        for (hp, actual_h) in actual.iter().enumerate() {
            let forecast = pick(&prediction[layout.position(hp, OutputKind::Quantile(qi))]);
            loss += pinball_loss(actual_h, &forecast, q);
        }
    }
    Ok(loss)
}

//! Turning raw model output back into real-unit forecasts.

use super::reconcile::make_monotonic;
use super::ForecastPipeline;
use crate::core::{Frame, OutputLayout, Series};
use crate::error::{RegressorError, Result};
use crate::transform::scale::check_shape;
use crate::transform::{inverse_difference, shift_target, target_column_name};
use crate::utils::forecast_loss;

impl ForecastPipeline {
    /// Convert raw model output into the forecast table.
    ///
    /// Steps: wrap with the fitted column names and X's index, inverse-scale
    /// each output group, add back `y` if differencing was used, and
    /// reconcile quantiles when `force_monotonic` is set.
    pub fn postprocess(
        &self,
        raw_prediction: Vec<Vec<f64>>,
        x: &Frame,
        y: Option<&Series>,
        force_monotonic: bool,
    ) -> Result<Frame> {
        let state = self.fitted()?;
        if raw_prediction.len() != state.n_outputs {
            return Err(RegressorError::DimensionMismatch {
                expected: state.n_outputs,
                got: raw_prediction.len(),
            });
        }

        let mut values = raw_prediction;
        if let Some(scaler) = self.collaborators.scaler.as_deref() {
            values = apply_per_group(&values, &state.layout, |group| {
                scaler.inverse_transform(group)
            })?;
        }

        let mut prediction = Frame::new(x.index().to_vec(), state.prediction_cols.clone(), values)?;

        if self.config.use_diff_of_y() {
            let y = y.ok_or(RegressorError::TargetRequired)?;
            prediction = inverse_difference(&prediction, y)?;
        }

        if force_monotonic {
            if state.layout.quantiles().is_empty() {
                log::debug!("no quantiles configured, skipping monotonic reconciliation");
            } else {
                let reconciled = make_monotonic(prediction.values(), &state.layout);
                prediction = Frame::new(
                    prediction.index().to_vec(),
                    prediction.columns().to_vec(),
                    reconciled,
                )?;
            }
        }

        Ok(prediction)
    }

    /// What a perfect predictor would output for `y`.
    ///
    /// Applies the same shift, difference and inverse-difference round trip
    /// as the real pipeline, without scaling. With horizons exactly `[0]` this
    /// is `y` itself. One column per horizon, named `{y}_lead_{p}`.
    pub fn get_actual(&self, y: &Series) -> Result<Frame> {
        let state = self.fitted()?;
        let horizons = state.layout.horizons();
        if horizons == [0] {
            return Frame::from_columns(
                y.index().to_vec(),
                vec![(y.name().to_string(), y.values().to_vec())],
            );
        }

        let use_diff = self.config.use_diff_of_y();
        let mut actual = shift_target(y, use_diff, horizons)?;
        if use_diff {
            actual = inverse_difference(&actual, y)?;
        }
        let names = horizons
            .iter()
            .map(|&p| target_column_name(y.name(), false, p))
            .collect();
        Frame::new(y.index().to_vec(), names, actual.into_values())
    }

    /// Loss of a forecast table against the ideal table from [`get_actual`].
    ///
    /// With a scaler, both tables are expressed in the scaler's units first so
    /// the loss is comparable with training-time losses.
    ///
    /// [`get_actual`]: ForecastPipeline::get_actual
    pub fn score_prediction(&self, prediction: &Frame, ideal: &Frame) -> Result<f64> {
        let state = self.fitted()?;
        if prediction.index() != ideal.index() {
            return Err(RegressorError::IndexMismatch {
                context: "prediction and actual values must share an index".to_string(),
            });
        }
        match self.collaborators.scaler.as_deref() {
            Some(scaler) => {
                let prediction = apply_per_group(prediction.values(), &state.layout, |group| {
                    scaler.transform(group)
                })?;
                let ideal_scaled = scaler.transform(ideal.values())?;
                check_shape(ideal.values(), &ideal_scaled)?;
                forecast_loss(&prediction, &ideal_scaled, &state.layout)
            }
            None => forecast_loss(prediction.values(), ideal.values(), &state.layout),
        }
    }
}

/// Run `f` on each output group (every quantile, then the mean) separately.
///
/// Each group holds one column per horizon, matching the columns the scaler
/// was fitted on.
fn apply_per_group<F>(values: &[Vec<f64>], layout: &OutputLayout, f: F) -> Result<Vec<Vec<f64>>>
where
    F: Fn(&[Vec<f64>]) -> Result<Vec<Vec<f64>>>,
{
    let mut out = values.to_vec();
    for kind in layout.groups() {
        let positions = layout.group(kind);
        let group: Vec<Vec<f64>> = positions.iter().map(|&c| values[c].clone()).collect();
        let transformed = f(&group)?;
        check_shape(&group, &transformed)?;
        for (&c, column) in positions.iter().zip(transformed) {
            out[c] = column;
        }
    }
    Ok(out)
}

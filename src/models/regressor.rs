//! Multi-horizon quantile regressor wiring a trainable model into the pipeline.

use super::persist::SavedRegressor;
use super::traits::Trainable;
use crate::config::RegressorConfig;
use crate::core::{Frame, Series};
use crate::error::{RegressorError, Result};
use crate::features::FeatureEngineer;
use crate::pipeline::{FittedState, ForecastPipeline, PreparedFit};
use crate::transform::Scaler;
use std::path::Path;

/// A time series regressor: the shared pipeline composed with a model.
///
/// Lifecycle: constructed unfitted; `fit` validates, preprocesses, trains and
/// only then replaces the fitted state; `predict`, `score` and `get_actual`
/// need a fitted instance. `predict` and `score` take `&self`, so a fitted
/// regressor can serve concurrent readers; refitting needs `&mut self`.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use timeseries_regressor::core::{Frame, Series};
/// use timeseries_regressor::models::{Trainable, TimeseriesRegressor, ValidationSet};
/// use timeseries_regressor::{RegressorConfig, Result};
///
/// /// Predicts zero change for every output.
/// struct Persistence;
///
/// impl Trainable for Persistence {
///     type History = ();
///     fn fit(&mut self, _x: &[Vec<f64>], _y: &[Vec<f64>], _v: Option<ValidationSet<'_>>) -> Result<()> {
///         Ok(())
///     }
///     fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
///         Ok(vec![vec![0.0; x[0].len()]])
///     }
///     fn dump(&self, _folder: &Path, _prefix: &str) -> Result<()> { Ok(()) }
///     fn load(&mut self, _folder: &Path, _prefix: &str) -> Result<()> { Ok(()) }
///     fn name(&self) -> &str { "Persistence" }
/// }
///
/// let index: Vec<i64> = (0..6).collect();
/// let x = Frame::from_columns(index.clone(), vec![("x", vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])]).unwrap();
/// let y = Series::new("y", index, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
///
/// let mut model = TimeseriesRegressor::new(RegressorConfig::default(), Persistence);
/// model.fit(&x, &y, None).unwrap();
///
/// let forecast = model.predict(&x, Some(&y)).unwrap();
/// assert_eq!(forecast.columns(), &["lead_1_mean"]);
/// assert_eq!(forecast.values()[0], y.values());
/// ```
pub struct TimeseriesRegressor<M: Trainable> {
    pipeline: ForecastPipeline,
    model: M,
}

impl<M: Trainable> TimeseriesRegressor<M> {
    /// Create an unfitted regressor with the identity feature engineer and
    /// no target scaler.
    pub fn new(config: RegressorConfig, model: M) -> Self {
        Self {
            pipeline: ForecastPipeline::new(config),
            model,
        }
    }

    pub fn with_feature_engineer(mut self, feature_engineer: impl FeatureEngineer + 'static) -> Self {
        self.pipeline = self.pipeline.with_feature_engineer(feature_engineer);
        self
    }

    pub fn with_scaler(mut self, scaler: impl Scaler + 'static) -> Self {
        self.pipeline = self.pipeline.with_scaler(scaler);
        self
    }

    pub fn config(&self) -> &RegressorConfig {
        self.pipeline.config()
    }

    pub fn pipeline(&self) -> &ForecastPipeline {
        &self.pipeline
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn is_fitted(&self) -> bool {
        self.pipeline.is_fitted()
    }

    /// Fitted state, or [`RegressorError::FitRequired`].
    pub fn fitted(&self) -> Result<&FittedState> {
        self.pipeline.fitted()
    }

    /// Output column names of every prediction table.
    pub fn prediction_cols(&self) -> Result<&[String]> {
        Ok(&self.fitted()?.prediction_cols)
    }

    pub fn n_inputs(&self) -> Result<usize> {
        Ok(self.fitted()?.n_inputs)
    }

    pub fn n_outputs(&self) -> Result<usize> {
        Ok(self.fitted()?.n_outputs)
    }

    /// Train the underlying model.
    ///
    /// Validation data, if given, is transformed with the freshly fitted
    /// pipeline but never used to fit the scaler or feature engineer. If any
    /// step fails, the previous fitted state and collaborators stay in use.
    pub fn fit(
        &mut self,
        x: &Frame,
        y: &Series,
        validation: Option<(&Frame, &Series)>,
    ) -> Result<M::History> {
        let PreparedFit {
            train,
            validation,
            state,
            collaborators,
        } = self.pipeline.preprocess_fit(x, y, validation)?;
        let val = validation
            .as_ref()
            .map(|v| (v.features.values(), v.target.values()));
        let history = self
            .model
            .fit(train.features.values(), train.target.values(), val)?;
        log::info!(
            "fitted {} on {} rows, {} features, {} outputs",
            self.model.name(),
            train.n_rows(),
            state.n_inputs,
            state.n_outputs
        );
        self.pipeline.commit(state, collaborators);
        Ok(history)
    }

    /// Forecast for every row of `x`.
    ///
    /// `y` is required when differencing is configured, because absolute
    /// forecasts are rebuilt from the last known value, and when the feature
    /// engineer derives features from the target.
    pub fn predict(&self, x: &Frame, y: Option<&Series>) -> Result<Frame> {
        self.predict_with_data(x, y).map(|(prediction, _)| prediction)
    }

    /// Like [`predict`](Self::predict), also returning the feature table the
    /// model saw.
    pub fn predict_with_data(&self, x: &Frame, y: Option<&Series>) -> Result<(Frame, Frame)> {
        let state = self.fitted()?;
        if self.config().use_diff_of_y() && y.is_none() {
            return Err(RegressorError::TargetRequired);
        }
        let features = self.pipeline.preprocess_predict(x, y, false)?;
        if features.n_cols() != state.n_inputs {
            return Err(RegressorError::DimensionMismatch {
                expected: state.n_inputs,
                got: features.n_cols(),
            });
        }
        let raw = self.model.predict(features.values())?;
        if let Some(column) = raw.iter().find(|c| c.len() != x.n_rows()) {
            return Err(RegressorError::DimensionMismatch {
                expected: x.n_rows(),
                got: column.len(),
            });
        }
        log::debug!(
            "predicted {} rows for {} outputs",
            x.n_rows(),
            state.n_outputs
        );
        let prediction = self.pipeline.postprocess(
            raw,
            x,
            y,
            self.config().force_monotonic_quantiles(),
        )?;
        Ok((prediction, features))
    }

    /// Combined MSE and pinball loss against the ideal forecast. Lower is better.
    pub fn score(&self, x: &Frame, y: &Series) -> Result<f64> {
        let prediction = self.predict(x, Some(y))?;
        let ideal = self.pipeline.get_actual(y)?;
        self.pipeline.score_prediction(&prediction, &ideal)
    }

    /// The forecast a perfect model would make for `y`.
    pub fn get_actual(&self, y: &Series) -> Result<Frame> {
        self.pipeline.get_actual(y)
    }

    pub fn get_feature_names(&self) -> Vec<String> {
        self.pipeline.get_feature_names()
    }

    /// Raw input columns used at fit time, excluding the time column.
    pub fn get_input_cols(&self) -> Result<&[String]> {
        self.pipeline.get_input_cols()
    }

    /// Write configuration, fitted state and all collaborator state to `folder`.
    pub fn dump(&self, folder: impl AsRef<Path>, prefix: &str) -> Result<()> {
        let folder = folder.as_ref();
        let saved = SavedRegressor::new(
            self.model.name(),
            self.config().clone(),
            self.pipeline.has_scaler(),
            self.fitted()?.clone(),
        );
        saved.write(folder, prefix)?;
        self.pipeline.dump_collaborators(folder, prefix)?;
        self.model.dump(folder, prefix)?;
        log::info!("dumped {} to {}", self.model.name(), folder.display());
        Ok(())
    }

    /// Restore a regressor written by [`dump`](Self::dump) into `self`.
    ///
    /// `self` supplies fresh collaborators of the same kinds as the dumped
    /// instance (model, feature engineer and, if one was used, scaler); their
    /// state and the configuration are read from `folder`.
    pub fn restore(self, folder: impl AsRef<Path>, prefix: &str) -> Result<Self> {
        let folder = folder.as_ref();
        let saved = SavedRegressor::read(folder, prefix)?;
        saved.check_compatible(self.model.name(), self.pipeline.has_scaler())?;

        let Self {
            pipeline,
            mut model,
        } = self;
        let pipeline = pipeline.into_restored(saved.config, saved.fitted, folder, prefix)?;
        model.load(folder, prefix)?;
        Ok(Self { pipeline, model })
    }

    /// Load a regressor that used the default identity feature engineer and
    /// no scaler.
    pub fn load(folder: impl AsRef<Path>, prefix: &str, model: M) -> Result<Self> {
        Self::new(RegressorConfig::default(), model).restore(folder, prefix)
    }
}

impl<M: Trainable + std::fmt::Debug> std::fmt::Debug for TimeseriesRegressor<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeseriesRegressor")
            .field("pipeline", &self.pipeline)
            .field("model", &self.model)
            .finish()
    }
}

//! Turning raw (X, y) into model-ready feature and target tables.

use super::{Collaborators, FittedState, ForecastPipeline, Prepared, PreparedFit};
use crate::core::{Frame, OutputLayout, Series};
use crate::error::{RegressorError, Result};
use crate::transform::scale::check_shape;
use crate::transform::shift_target;
use crate::validation::{assert_no_missing, check_monospaced, verify_same_index};

impl ForecastPipeline {
    /// Shift (and optionally difference) the target, scale it and build features.
    ///
    /// With `fitting` the scaler and feature engineer learn their state from
    /// this data; otherwise their fitted state is applied.
    pub fn preprocess(&mut self, x: &Frame, y: &Series, fitting: bool) -> Result<Prepared> {
        let horizons = self.config.validate()?;
        let use_diff = self.config.use_diff_of_y();
        if fitting {
            self.collaborators.fit_prepare(x, y, use_diff, &horizons)
        } else {
            self.collaborators.apply_prepare(x, y, use_diff, &horizons)
        }
    }

    /// Validate inputs, fit copies of the scaler and feature engineer, and
    /// return trimmed training (and validation) tables plus the new fitted
    /// state and collaborators.
    ///
    /// Nothing is stored: the caller installs the result with
    /// [`ForecastPipeline::commit`] once the model has trained, so a failed
    /// fit leaves the previous state and collaborators in place.
    pub fn preprocess_fit(
        &self,
        x: &Frame,
        y: &Series,
        validation: Option<(&Frame, &Series)>,
    ) -> Result<PreparedFit> {
        verify_same_index(x.index(), y.index(), "fit")?;
        let horizons = self.config.validate()?;
        check_monospaced(x, self.config.timecol())?;
        if let Some((x_val, y_val)) = validation {
            verify_same_index(x_val.index(), y_val.index(), "validation")?;
            check_monospaced(x_val, self.config.timecol())?;
        }

        let layout = OutputLayout::new(&horizons, self.config.quantiles());
        let use_diff = self.config.use_diff_of_y();

        let mut collaborators = self.collaborators.clone();
        let prepared = collaborators.fit_prepare(x, y, use_diff, &horizons)?;
        let before = prepared.n_rows();
        let train = remove_target_nan(remove_until_first_value(prepared));
        log::debug!(
            "trimmed training data from {} to {} rows",
            before,
            train.n_rows()
        );
        assert_no_missing(&train.features)?;
        if train.n_rows() == 0 {
            return Err(RegressorError::InsufficientData { needed: 1, got: 0 });
        }

        let validation = match validation {
            Some((x_val, y_val)) => {
                let prepared = collaborators.apply_prepare(x_val, y_val, use_diff, &horizons)?;
                let trimmed = remove_target_nan(remove_until_first_value(prepared));
                if trimmed.n_rows() == 0 {
                    log::warn!("validation data has no usable rows after trimming");
                } else {
                    log::debug!("validation data has {} usable rows", trimmed.n_rows());
                }
                Some(trimmed)
            }
            None => None,
        };

        let input_cols = x
            .columns()
            .iter()
            .filter(|c| Some(c.as_str()) != self.config.timecol())
            .cloned()
            .collect();

        let state = FittedState {
            prediction_cols: layout.names(),
            n_inputs: train.features.n_cols(),
            n_outputs: layout.len(),
            layout,
            input_cols,
        };

        Ok(PreparedFit {
            train,
            validation,
            state,
            collaborators,
        })
    }

    /// Build the model's feature table for prediction.
    ///
    /// When `y` is given it must share X's index; it is handed to the feature
    /// engineer for target-derived features. With `dropna`, rows holding any
    /// missing feature are removed.
    pub fn preprocess_predict(&self, x: &Frame, y: Option<&Series>, dropna: bool) -> Result<Frame> {
        self.fitted()?;
        if let Some(y) = y {
            verify_same_index(x.index(), y.index(), "predict")?;
        }
        let raw = self.collaborators.feature_engineer.transform(x, y)?;
        let features = self.collaborators.features_frame(x, raw)?;
        if dropna {
            let keep: Vec<usize> = (0..features.n_rows())
                .filter(|&r| !features.row_has_missing(r))
                .collect();
            return Ok(features.take_rows(&keep));
        }
        Ok(features)
    }
}

impl Collaborators {
    fn fit_prepare(
        &mut self,
        x: &Frame,
        y: &Series,
        use_diff: bool,
        horizons: &[usize],
    ) -> Result<Prepared> {
        let shifted = shift_target(y, use_diff, horizons)?;
        let target = match self.scaler.as_mut() {
            Some(scaler) => {
                let scaled = scaler.fit_transform(shifted.values())?;
                check_shape(shifted.values(), &scaled)?;
                Frame::new(shifted.index().to_vec(), shifted.columns().to_vec(), scaled)?
            }
            None => shifted,
        };
        let raw = self.feature_engineer.fit_transform(x, &target)?;
        let features = self.features_frame(x, raw)?;
        Ok(Prepared { features, target })
    }

    fn apply_prepare(
        &self,
        x: &Frame,
        y: &Series,
        use_diff: bool,
        horizons: &[usize],
    ) -> Result<Prepared> {
        let shifted = shift_target(y, use_diff, horizons)?;
        let target = match self.scaler.as_ref() {
            Some(scaler) => {
                let scaled = scaler.transform(shifted.values())?;
                check_shape(shifted.values(), &scaled)?;
                Frame::new(shifted.index().to_vec(), shifted.columns().to_vec(), scaled)?
            }
            None => shifted,
        };
        let raw = self.feature_engineer.transform(x, Some(y))?;
        let features = self.features_frame(x, raw)?;
        Ok(Prepared { features, target })
    }

    /// Wrap feature engineer output, checking it against the declared names.
    fn features_frame(&self, x: &Frame, raw: Vec<Vec<f64>>) -> Result<Frame> {
        let names = self.feature_engineer.feature_names();
        if raw.len() != names.len() {
            return Err(RegressorError::DimensionMismatch {
                expected: names.len(),
                got: raw.len(),
            });
        }
        Frame::new(x.index().to_vec(), names, raw)
    }
}

/// Drop leading rows until the first row whose features are all present.
///
/// If no row is complete, every row is dropped.
pub fn remove_until_first_value(prepared: Prepared) -> Prepared {
    let n_rows = prepared.n_rows();
    let first = (0..n_rows)
        .find(|&r| !prepared.features.row_has_missing(r))
        .unwrap_or(n_rows);
    if first == 0 {
        return prepared;
    }
    let keep: Vec<usize> = (first..n_rows).collect();
    Prepared {
        features: prepared.features.take_rows(&keep),
        target: prepared.target.take_rows(&keep),
    }
}

/// Drop rows whose target is missing for every horizon.
pub fn remove_target_nan(prepared: Prepared) -> Prepared {
    let keep: Vec<usize> = (0..prepared.n_rows())
        .filter(|&r| !prepared.target.row_all_missing(r))
        .collect();
    if keep.len() == prepared.n_rows() {
        return prepared;
    }
    Prepared {
        features: prepared.features.take_rows(&keep),
        target: prepared.target.take_rows(&keep),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegressorConfig;

    fn prepared(features: Vec<Vec<f64>>, target: Vec<Vec<f64>>) -> Prepared {
        let n = target[0].len() as i64;
        let index: Vec<i64> = (0..n).collect();
        let f_names = (0..features.len()).map(|i| format!("f{i}")).collect();
        let t_names = (0..target.len()).map(|i| format!("t{i}")).collect();
        Prepared {
            features: Frame::new(index.clone(), f_names, features).unwrap(),
            target: Frame::new(index, t_names, target).unwrap(),
        }
    }

    fn linear_input(n: usize) -> (Frame, Series) {
        let index: Vec<i64> = (0..n as i64).collect();
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        (
            Frame::from_columns(index.clone(), vec![("x", x)]).unwrap(),
            Series::new("y", index, y).unwrap(),
        )
    }

    #[test]
    fn leading_incomplete_rows_are_removed() {
        let p = prepared(
            vec![vec![f64::NAN, f64::NAN, 1.0, f64::NAN, 2.0]],
            vec![vec![1.0, 2.0, 3.0, 4.0, 5.0]],
        );
        let trimmed = remove_until_first_value(p);
        assert_eq!(trimmed.features.index(), &[2, 3, 4]);
        assert_eq!(trimmed.target.values()[0], vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn no_complete_row_removes_everything() {
        let p = prepared(vec![vec![f64::NAN, f64::NAN]], vec![vec![1.0, 2.0]]);
        assert_eq!(remove_until_first_value(p).n_rows(), 0);
    }

    #[test]
    fn rows_with_fully_missing_target_are_removed() {
        let p = prepared(
            vec![vec![1.0, 2.0, 3.0]],
            vec![vec![1.0, f64::NAN, f64::NAN], vec![1.0, 2.0, f64::NAN]],
        );
        let trimmed = remove_target_nan(p);
        assert_eq!(trimmed.features.index(), &[0, 1]);
        assert!(trimmed.target.values()[0][1].is_nan());
    }

    #[test]
    fn preprocess_fit_builds_state_and_trims() {
        let (x, y) = linear_input(10);
        let pipeline = ForecastPipeline::new(
            RegressorConfig::new()
                .with_predict_ahead(vec![1, 2])
                .with_quantiles(vec![0.25, 0.75]),
        );
        let fit = pipeline.preprocess_fit(&x, &y, None).unwrap();

        // Last row has no future value at all; row 8 still has horizon 1.
        assert_eq!(fit.train.n_rows(), 9);
        assert_eq!(fit.state.n_outputs, 6);
        assert_eq!(fit.state.prediction_cols.len(), fit.state.n_outputs);
        assert_eq!(fit.state.n_inputs, 1);
        assert_eq!(fit.state.input_cols, vec!["x"]);
        // Differenced targets of a line with slope 2
        assert_eq!(fit.train.target.values()[0][0], 2.0);
        assert_eq!(fit.train.target.values()[1][0], 4.0);
        // Nothing committed yet
        assert!(!pipeline.is_fitted());
    }

    #[test]
    fn preprocess_fit_rejects_index_mismatch() {
        let (x, y) = linear_input(5);
        let shifted = Series::new("y", vec![1, 2, 3, 4, 5], y.values().to_vec()).unwrap();
        let pipeline = ForecastPipeline::new(RegressorConfig::default());
        assert!(matches!(
            pipeline.preprocess_fit(&x, &shifted, None),
            Err(RegressorError::IndexMismatch { .. })
        ));
    }

    #[test]
    fn preprocess_fit_rejects_missing_features_after_trim() {
        let index: Vec<i64> = (0..4).collect();
        let x = Frame::from_columns(index.clone(), vec![("x", vec![1.0, 2.0, f64::NAN, 4.0])])
            .unwrap();
        let y = Series::new("y", index, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let pipeline = ForecastPipeline::new(RegressorConfig::default());
        assert_eq!(
            pipeline.preprocess_fit(&x, &y, None).unwrap_err(),
            RegressorError::MissingValues { rows: 1 }
        );
    }

    #[test]
    fn validation_data_is_transformed_not_fitted() {
        let (x, y) = linear_input(10);
        let (x_val, y_val) = linear_input(4);
        let pipeline = ForecastPipeline::new(RegressorConfig::default());
        let fit = pipeline
            .preprocess_fit(&x, &y, Some((&x_val, &y_val)))
            .unwrap();
        assert_eq!(fit.collaborators.feature_engineer().feature_names(), vec!["x"]);
        let val = fit.validation.unwrap();
        assert_eq!(val.n_rows(), 3);
    }

    #[test]
    fn preprocess_fit_works_on_copies_of_the_collaborators() {
        let (x, y) = linear_input(8);
        let mut pipeline = ForecastPipeline::new(RegressorConfig::default());
        let fit = pipeline.preprocess_fit(&x, &y, None).unwrap();
        assert!(pipeline.get_feature_names().is_empty());

        pipeline.commit(fit.state, fit.collaborators);
        assert_eq!(pipeline.get_feature_names(), vec!["x"]);

        let wider = Frame::from_columns(
            x.index().to_vec(),
            vec![("x", x.values()[0].clone()), ("z", vec![1.0; 8])],
        )
        .unwrap();
        let refit = pipeline.preprocess_fit(&wider, &y, None).unwrap();
        assert_eq!(refit.state.n_inputs, 2);
        assert_eq!(pipeline.get_feature_names(), vec!["x"]);
        assert_eq!(pipeline.fitted().unwrap().n_inputs, 1);
    }

    #[test]
    fn bad_validation_data_is_rejected_before_fitting() {
        let (x, y) = linear_input(8);
        let (x_val, y_val) = linear_input(4);
        let moved = Series::new("y", vec![10, 11, 12, 13], y_val.values().to_vec()).unwrap();
        let pipeline = ForecastPipeline::new(RegressorConfig::default());
        assert!(matches!(
            pipeline.preprocess_fit(&x, &y, Some((&x_val, &moved))),
            Err(RegressorError::IndexMismatch { .. })
        ));
        assert!(pipeline.get_feature_names().is_empty());
    }

    #[test]
    fn preprocess_predict_requires_fit() {
        let (x, y) = linear_input(3);
        let pipeline = ForecastPipeline::new(RegressorConfig::default());
        assert_eq!(
            pipeline.preprocess_predict(&x, Some(&y), false).unwrap_err(),
            RegressorError::FitRequired
        );
    }

    #[test]
    fn preprocess_predict_can_drop_incomplete_rows() {
        let (x, y) = linear_input(5);
        let mut pipeline = ForecastPipeline::new(RegressorConfig::default());
        let fit = pipeline.preprocess_fit(&x, &y, None).unwrap();
        pipeline.commit(fit.state, fit.collaborators);

        let gappy = Frame::from_columns(vec![0, 1, 2], vec![("x", vec![f64::NAN, 1.0, 2.0])])
            .unwrap();
        let all = pipeline.preprocess_predict(&gappy, None, false).unwrap();
        assert_eq!(all.n_rows(), 3);
        let dropped = pipeline.preprocess_predict(&gappy, None, true).unwrap();
        assert_eq!(dropped.index(), &[1, 2]);
    }

    #[test]
    fn preprocess_without_fitting_applies_state() {
        let (x, y) = linear_input(6);
        let mut pipeline = ForecastPipeline::new(RegressorConfig::default());
        pipeline.preprocess(&x, &y, true).unwrap();
        let p = pipeline.preprocess(&x, &y, false).unwrap();
        assert_eq!(p.features.columns(), &["x"]);
        assert_eq!(p.target.columns(), &["y_diff_1"]);
    }
}

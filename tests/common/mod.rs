//! Shared test doubles: a quantile-of-training-target model, a standard
//! scaler and a lagged-target feature engineer.

#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use timeseries_regressor::core::{Frame, Series};
use timeseries_regressor::features::{BoxedFeatureEngineer, FeatureEngineer};
use timeseries_regressor::models::{Trainable, ValidationSet};
use timeseries_regressor::transform::{BoxedScaler, Scaler};
use timeseries_regressor::{RegressorError, Result};

fn state_path(folder: &Path, prefix: &str, kind: &str) -> PathBuf {
    folder.join(format!("{prefix}_{kind}.json"))
}

fn write_json<T: Serialize>(path: PathBuf, value: &T) -> Result<()> {
    serde_json::to_writer(BufWriter::new(File::create(path)?), value)?;
    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: PathBuf) -> Result<T> {
    Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
}

/// Empirical quantile of the non-NaN values, linear interpolation.
pub fn empirical_quantile(values: &[f64], q: f64) -> f64 {
    let mut v: Vec<f64> = values.iter().copied().filter(|x| !x.is_nan()).collect();
    if v.is_empty() {
        return f64::NAN;
    }
    v.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let pos = q * (v.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    v[lo] + (v[hi] - v[lo]) * (pos - lo as f64)
}

/// Predicts a constant per output: the matching quantile (or mean) of the
/// training target column of the same horizon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstantModel {
    quantiles: Vec<f64>,
    constants: Vec<f64>,
    #[serde(skip)]
    fail_refit: bool,
}

impl ConstantModel {
    pub fn new(quantiles: &[f64]) -> Self {
        Self {
            quantiles: quantiles.to_vec(),
            ..Self::default()
        }
    }

    /// Make every fit after the first fail.
    pub fn failing_refit(mut self) -> Self {
        self.fail_refit = true;
        self
    }

    pub fn constants(&self) -> &[f64] {
        &self.constants
    }
}

impl Trainable for ConstantModel {
    type History = Vec<f64>;

    fn fit(
        &mut self,
        x: &[Vec<f64>],
        y: &[Vec<f64>],
        _validation: Option<ValidationSet<'_>>,
    ) -> Result<Vec<f64>> {
        if self.fail_refit && !self.constants.is_empty() {
            return Err(RegressorError::InvalidParameter("refit refused".into()));
        }
        if x.is_empty() {
            return Err(RegressorError::InsufficientData { needed: 1, got: 0 });
        }
        // Targets hold one column per horizon; outputs are quantile-major then mean
        let mut constants = Vec::with_capacity((self.quantiles.len() + 1) * y.len());
        for &q in &self.quantiles {
            constants.extend(y.iter().map(|col| empirical_quantile(col, q)));
        }
        for col in y {
            let valid: Vec<f64> = col.iter().copied().filter(|v| !v.is_nan()).collect();
            constants.push(valid.iter().sum::<f64>() / valid.len() as f64);
        }
        self.constants = constants.clone();
        Ok(constants)
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        let n = x.first().map_or(0, |c| c.len());
        Ok(self.constants.iter().map(|&c| vec![c; n]).collect())
    }

    fn dump(&self, folder: &Path, prefix: &str) -> Result<()> {
        write_json(state_path(folder, prefix, "constant_model"), self)
    }

    fn load(&mut self, folder: &Path, prefix: &str) -> Result<()> {
        *self = read_json(state_path(folder, prefix, "constant_model"))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "ConstantModel"
    }
}

/// Per-column standardisation; statistics ignore NaN.
///
/// Fitted on one column per horizon; `transform` accepts any such group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&self, values: &[Vec<f64>]) -> Result<()> {
        if values.len() != self.mean.len() {
            return Err(RegressorError::DimensionMismatch {
                expected: self.mean.len(),
                got: values.len(),
            });
        }
        Ok(())
    }
}

impl Scaler for StandardScaler {
    fn fit_transform(&mut self, values: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        self.mean.clear();
        self.std.clear();
        for col in values {
            let valid: Vec<f64> = col.iter().copied().filter(|v| !v.is_nan()).collect();
            let n = valid.len().max(1) as f64;
            let mean = valid.iter().sum::<f64>() / n;
            let var = valid.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            self.mean.push(mean);
            self.std.push(if var > 0.0 { var.sqrt() } else { 1.0 });
        }
        self.transform(values)
    }

    fn transform(&self, values: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        self.check(values)?;
        Ok(values
            .iter()
            .enumerate()
            .map(|(i, col)| col.iter().map(|v| (v - self.mean[i]) / self.std[i]).collect())
            .collect())
    }

    fn inverse_transform(&self, values: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        self.check(values)?;
        Ok(values
            .iter()
            .enumerate()
            .map(|(i, col)| col.iter().map(|v| v * self.std[i] + self.mean[i]).collect())
            .collect())
    }

    fn dump(&self, folder: &Path, prefix: &str) -> Result<()> {
        write_json(state_path(folder, prefix, "standard_scaler"), self)
    }

    fn load(&mut self, folder: &Path, prefix: &str) -> Result<()> {
        *self = read_json(state_path(folder, prefix, "standard_scaler"))?;
        Ok(())
    }

    fn clone_box(&self) -> BoxedScaler {
        Box::new(self.clone())
    }
}

/// Input columns plus the previous value of the target.
///
/// At fit time the lag is rebuilt from the first shifted target column, which
/// is only exact without differencing; tests use it that way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LagFeatureEngineer {
    inputs: Vec<String>,
}

impl LagFeatureEngineer {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_lag(&self, x: &Frame, lag: Vec<f64>) -> Result<Vec<Vec<f64>>> {
        let mut out = Vec::with_capacity(self.inputs.len() + 1);
        for name in &self.inputs {
            let col = x.column(name).ok_or_else(|| {
                RegressorError::InvalidParameter(format!("missing column '{name}'"))
            })?;
            out.push(col.to_vec());
        }
        out.push(lag);
        Ok(out)
    }
}

impl FeatureEngineer for LagFeatureEngineer {
    fn fit_transform(&mut self, x: &Frame, y: &Frame) -> Result<Vec<Vec<f64>>> {
        self.inputs = x.columns().to_vec();
        // y_lead_1 shifted back by two rows is y lagged by one
        let lead = &y.values()[0];
        let lag = (0..lead.len())
            .map(|i| if i >= 2 { lead[i - 2] } else { f64::NAN })
            .collect();
        self.with_lag(x, lag)
    }

    fn transform(&self, x: &Frame, y: Option<&Series>) -> Result<Vec<Vec<f64>>> {
        let y = y.ok_or(RegressorError::TargetRequired)?;
        let v = y.values();
        let lag = (0..v.len())
            .map(|i| if i >= 1 { v[i - 1] } else { f64::NAN })
            .collect();
        self.with_lag(x, lag)
    }

    fn feature_names(&self) -> Vec<String> {
        let mut names = self.inputs.clone();
        names.push("y_lag_1".to_string());
        names
    }

    fn dump(&self, folder: &Path, prefix: &str) -> Result<()> {
        write_json(state_path(folder, prefix, "lag_features"), self)
    }

    fn load(&mut self, folder: &Path, prefix: &str) -> Result<()> {
        *self = read_json(state_path(folder, prefix, "lag_features"))?;
        Ok(())
    }

    fn clone_box(&self) -> BoxedFeatureEngineer {
        Box::new(self.clone())
    }
}

/// `n` rows of a noisy line with an exogenous column, index `0..n`.
pub fn linear_data(n: usize) -> (Frame, Series) {
    let index: Vec<i64> = (0..n as i64).collect();
    let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let y: Vec<f64> = (0..n)
        .map(|i| 10.0 + 0.5 * i as f64 + ((i * 7) % 5) as f64 * 0.3)
        .collect();
    (
        Frame::from_columns(index.clone(), vec![("x", x)]).unwrap(),
        Series::new("y", index, y).unwrap(),
    )
}

/// Like [`linear_data`] with an hourly `TIME` column.
pub fn timed_data(n: usize) -> (Frame, Series) {
    let (x, y) = linear_data(n);
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let times = (0..n).map(|i| base + Duration::hours(i as i64)).collect();
    (x.with_time_column("TIME", times).unwrap(), y)
}

//! Model-independent preprocessing and postprocessing.
//!
//! [`ForecastPipeline`] owns the configuration, the feature engineer, the
//! optional target scaler and the fitted state. Every trainable model is
//! wrapped by the same pipeline, so none of this logic is repeated per model.
//!
//! Fit-time flow: validate, shift/difference the target, scale it, engineer
//! features, trim incomplete rows. Predict-time flow: engineer features, run
//! the model, inverse-scale each output group, undo differencing, optionally
//! reconcile quantiles.

mod postprocess;
mod preprocess;
pub mod reconcile;

pub use preprocess::{remove_target_nan, remove_until_first_value};
pub use reconcile::{make_monotonic, reconcile_fan, reconcile_quantiles, QuantileFan};

use crate::config::RegressorConfig;
use crate::core::{Frame, OutputLayout};
use crate::error::{RegressorError, Result};
use crate::features::{BoxedFeatureEngineer, FeatureEngineer, IdentityFeatureEngineer};
use crate::transform::{BoxedScaler, Scaler};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// State that exists only after a successful fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedState {
    /// Typed layout of the model outputs.
    pub layout: OutputLayout,
    /// Output column names, in layout order.
    pub prediction_cols: Vec<String>,
    /// Number of feature columns handed to the model.
    pub n_inputs: usize,
    /// Number of model outputs.
    pub n_outputs: usize,
    /// Raw input column names, excluding the time column.
    pub input_cols: Vec<String>,
}

/// A feature table and its matching target table.
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    pub features: Frame,
    pub target: Frame,
}

impl Prepared {
    pub fn n_rows(&self) -> usize {
        self.features.n_rows()
    }
}

/// The feature engineer and optional target scaler, fitted together.
#[derive(Debug, Clone)]
pub struct Collaborators {
    pub(crate) feature_engineer: BoxedFeatureEngineer,
    pub(crate) scaler: Option<BoxedScaler>,
}

impl Collaborators {
    pub fn feature_engineer(&self) -> &dyn FeatureEngineer {
        self.feature_engineer.as_ref()
    }

    pub fn scaler(&self) -> Option<&dyn Scaler> {
        self.scaler.as_deref()
    }
}

/// Output of [`ForecastPipeline::preprocess_fit`]: model-ready data plus the
/// fitted state and collaborators to commit once training succeeds.
#[derive(Debug, Clone)]
pub struct PreparedFit {
    pub train: Prepared,
    pub validation: Option<Prepared>,
    pub state: FittedState,
    pub collaborators: Collaborators,
}

/// Configuration, collaborators and fitted state shared by all regressors.
pub struct ForecastPipeline {
    config: RegressorConfig,
    collaborators: Collaborators,
    fitted: Option<FittedState>,
}

impl ForecastPipeline {
    /// Create a pipeline with the identity feature engineer and no scaler.
    pub fn new(config: RegressorConfig) -> Self {
        Self {
            config,
            collaborators: Collaborators {
                feature_engineer: Box::new(IdentityFeatureEngineer::new()),
                scaler: None,
            },
            fitted: None,
        }
    }

    pub fn with_feature_engineer(mut self, feature_engineer: impl FeatureEngineer + 'static) -> Self {
        self.collaborators.feature_engineer = Box::new(feature_engineer);
        self
    }

    pub fn with_scaler(mut self, scaler: impl Scaler + 'static) -> Self {
        self.collaborators.scaler = Some(Box::new(scaler));
        self
    }

    pub fn config(&self) -> &RegressorConfig {
        &self.config
    }

    pub fn feature_engineer(&self) -> &dyn FeatureEngineer {
        self.collaborators.feature_engineer()
    }

    pub fn scaler(&self) -> Option<&dyn Scaler> {
        self.collaborators.scaler()
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Fitted state, or [`RegressorError::FitRequired`].
    pub fn fitted(&self) -> Result<&FittedState> {
        self.fitted.as_ref().ok_or(RegressorError::FitRequired)
    }

    /// Feature names produced by the feature engineer.
    pub fn get_feature_names(&self) -> Vec<String> {
        self.collaborators.feature_engineer.feature_names()
    }

    /// Raw input columns seen at fit time, excluding the time column.
    pub fn get_input_cols(&self) -> Result<&[String]> {
        Ok(&self.fitted()?.input_cols)
    }

    /// Make `state` and the collaborators fitted alongside it authoritative.
    pub fn commit(&mut self, state: FittedState, collaborators: Collaborators) {
        self.collaborators = collaborators;
        self.fitted = Some(state);
    }

    pub(crate) fn has_scaler(&self) -> bool {
        self.collaborators.scaler.is_some()
    }

    /// Persist the feature engineer and scaler state.
    pub(crate) fn dump_collaborators(&self, folder: &Path, prefix: &str) -> Result<()> {
        self.collaborators.feature_engineer.dump(folder, prefix)?;
        if let Some(scaler) = &self.collaborators.scaler {
            scaler.dump(folder, prefix)?;
        }
        Ok(())
    }

    /// Rebuild a pipeline from persisted configuration and fitted state,
    /// restoring collaborator state in place.
    pub(crate) fn into_restored(
        mut self,
        config: RegressorConfig,
        fitted: FittedState,
        folder: &Path,
        prefix: &str,
    ) -> Result<Self> {
        self.collaborators.feature_engineer.load(folder, prefix)?;
        if let Some(scaler) = self.collaborators.scaler.as_mut() {
            scaler.load(folder, prefix)?;
        }
        self.config = config;
        self.fitted = Some(fitted);
        Ok(self)
    }
}

impl std::fmt::Debug for ForecastPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastPipeline")
            .field("config", &self.config)
            .field("collaborators", &self.collaborators)
            .field("fitted", &self.fitted)
            .finish()
    }
}

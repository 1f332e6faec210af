//! On-disk form of a fitted regressor.
//!
//! A dump writes `{prefix}_params.json` holding the configuration and fitted
//! state; the model, feature engineer and scaler write their own files next
//! to it under the same prefix.

use crate::config::RegressorConfig;
use crate::error::{RegressorError, Result};
use crate::pipeline::FittedState;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SavedRegressor {
    pub format_version: u32,
    pub model_name: String,
    pub config: RegressorConfig,
    pub has_scaler: bool,
    pub fitted: FittedState,
}

impl SavedRegressor {
    pub fn new(
        model_name: &str,
        config: RegressorConfig,
        has_scaler: bool,
        fitted: FittedState,
    ) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            model_name: model_name.to_string(),
            config,
            has_scaler,
            fitted,
        }
    }

    pub fn path(folder: &Path, prefix: &str) -> PathBuf {
        folder.join(format!("{prefix}_params.json"))
    }

    pub fn write(&self, folder: &Path, prefix: &str) -> Result<()> {
        let mut writer = BufWriter::new(File::create(Self::path(folder, prefix))?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn read(folder: &Path, prefix: &str) -> Result<Self> {
        let reader = BufReader::new(File::open(Self::path(folder, prefix))?);
        let saved: Self = serde_json::from_reader(reader)?;
        if saved.format_version != FORMAT_VERSION {
            return Err(RegressorError::Persistence(format!(
                "unsupported format version {}, expected {}",
                saved.format_version, FORMAT_VERSION
            )));
        }
        Ok(saved)
    }

    /// Check that the collaborators restoring this dump match the dumped ones.
    pub fn check_compatible(&self, model_name: &str, has_scaler: bool) -> Result<()> {
        if self.model_name != model_name {
            return Err(RegressorError::Persistence(format!(
                "dump holds model '{}', restoring into '{}'",
                self.model_name, model_name
            )));
        }
        if self.has_scaler != has_scaler {
            let describe = |s: bool| if s { "a scaler" } else { "no scaler" };
            return Err(RegressorError::Persistence(format!(
                "dump was fitted with {}, restoring with {}",
                describe(self.has_scaler),
                describe(has_scaler)
            )));
        }
        Ok(())
    }
}

//! Passthrough feature engineer.

use super::{BoxedFeatureEngineer, FeatureEngineer};
use crate::core::{Frame, Series};
use crate::error::{RegressorError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Uses every numeric input column as a feature, unchanged.
///
/// The time column is not numeric and is never passed through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityFeatureEngineer {
    feature_names: Vec<String>,
}

impl IdentityFeatureEngineer {
    pub fn new() -> Self {
        Self::default()
    }

    fn state_path(folder: &Path, prefix: &str) -> PathBuf {
        folder.join(format!("{prefix}_identity_features.json"))
    }
}

impl FeatureEngineer for IdentityFeatureEngineer {
    fn fit_transform(&mut self, x: &Frame, _y: &Frame) -> Result<Vec<Vec<f64>>> {
        self.feature_names = x.columns().to_vec();
        Ok(x.values().to_vec())
    }

    fn transform(&self, x: &Frame, _y: Option<&Series>) -> Result<Vec<Vec<f64>>> {
        self.feature_names
            .iter()
            .map(|name| {
                x.column(name).map(|c| c.to_vec()).ok_or_else(|| {
                    RegressorError::InvalidParameter(format!(
                        "input is missing feature column '{name}'"
                    ))
                })
            })
            .collect()
    }

    fn feature_names(&self) -> Vec<String> {
        self.feature_names.clone()
    }

    fn dump(&self, folder: &Path, prefix: &str) -> Result<()> {
        let file = File::create(Self::state_path(folder, prefix))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    fn load(&mut self, folder: &Path, prefix: &str) -> Result<()> {
        let file = File::open(Self::state_path(folder, prefix))?;
        *self = serde_json::from_reader(BufReader::new(file))?;
        Ok(())
    }

    fn clone_box(&self) -> BoxedFeatureEngineer {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Frame {
        Frame::from_columns(
            vec![0, 1, 2],
            vec![("a", vec![1.0, 2.0, 3.0]), ("b", vec![4.0, 5.0, 6.0])],
        )
        .unwrap()
    }

    fn target() -> Frame {
        Frame::from_columns(vec![0, 1, 2], vec![("y_lead_1", vec![1.0, 2.0, f64::NAN])]).unwrap()
    }

    #[test]
    fn passes_columns_through() {
        let mut fe = IdentityFeatureEngineer::new();
        let out = fe.fit_transform(&x(), &target()).unwrap();
        assert_eq!(out, x().values());
        assert_eq!(fe.feature_names(), vec!["a", "b"]);
    }

    #[test]
    fn transform_selects_fitted_columns_in_order() {
        let mut fe = IdentityFeatureEngineer::new();
        fe.fit_transform(&x(), &target()).unwrap();

        let reordered = Frame::from_columns(
            vec![5, 6],
            vec![("extra", vec![0.0, 0.0]), ("b", vec![8.0, 9.0]), ("a", vec![1.0, 2.0])],
        )
        .unwrap();
        let out = fe.transform(&reordered, None).unwrap();
        assert_eq!(out, vec![vec![1.0, 2.0], vec![8.0, 9.0]]);
    }

    #[test]
    fn transform_fails_on_missing_column() {
        let mut fe = IdentityFeatureEngineer::new();
        fe.fit_transform(&x(), &target()).unwrap();
        let partial = Frame::from_columns(vec![0], vec![("a", vec![1.0])]).unwrap();
        assert!(matches!(
            fe.transform(&partial, None),
            Err(RegressorError::InvalidParameter(_))
        ));
    }

    #[test]
    fn clone_box_keeps_state_and_is_independent() {
        let mut fe = IdentityFeatureEngineer::new();
        fe.fit_transform(&x(), &target()).unwrap();
        let mut copy = fe.clone_box();
        assert_eq!(copy.feature_names(), vec!["a", "b"]);

        let narrow = Frame::from_columns(vec![0], vec![("c", vec![1.0])]).unwrap();
        copy.fit_transform(&narrow, &target().take_rows(&[0])).unwrap();
        assert_eq!(copy.feature_names(), vec!["c"]);
        assert_eq!(fe.feature_names(), vec!["a", "b"]);
    }

    #[test]
    fn dump_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut fe = IdentityFeatureEngineer::new();
        fe.fit_transform(&x(), &target()).unwrap();
        fe.dump(dir.path(), "model").unwrap();

        let mut restored = IdentityFeatureEngineer::new();
        restored.load(dir.path(), "model").unwrap();
        assert_eq!(restored, fe);
    }
}

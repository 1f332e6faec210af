//! Typed mapping from (horizon, quantile-or-mean) to output column.
//!
//! Outputs are ordered quantile-major: for each quantile (configured order)
//! one column per horizon (configured order), then one mean column per
//! horizon. The layout is built once at fit time and stored in the fitted
//! state, so postprocessing and scoring never match on column names.

use serde::{Deserialize, Serialize};

/// What an output column estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutputKind {
    /// Quantile forecast; the payload is the position in the quantile list.
    Quantile(usize),
    /// Mean forecast.
    Mean,
}

/// One output column of the trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputColumn {
    pub horizon: usize,
    pub kind: OutputKind,
    pub name: String,
}

/// Column layout of a prediction table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputLayout {
    horizons: Vec<usize>,
    quantiles: Vec<f64>,
    columns: Vec<OutputColumn>,
}

impl OutputLayout {
    /// Build the layout for validated horizons and quantile levels.
    ///
    /// Quantile levels are written with `f64`'s `Display`: the shortest
    /// decimal that round-trips, never in exponent form (`0.1`, `0.0000001`).
    /// Names are for display and persistence only; lookups go through
    /// [`position`](Self::position).
    pub fn new(horizons: &[usize], quantiles: &[f64]) -> Self {
        let mut columns = Vec::with_capacity((quantiles.len() + 1) * horizons.len());
        for (qi, &q) in quantiles.iter().enumerate() {
            for &p in horizons {
                columns.push(OutputColumn {
                    horizon: p,
                    kind: OutputKind::Quantile(qi),
                    name: format!("lead_{p}_q_{q}"),
                });
            }
        }
        for &p in horizons {
            columns.push(OutputColumn {
                horizon: p,
                kind: OutputKind::Mean,
                name: format!("lead_{p}_mean"),
            });
        }
        Self {
            horizons: horizons.to_vec(),
            quantiles: quantiles.to_vec(),
            columns,
        }
    }

    pub fn horizons(&self) -> &[usize] {
        &self.horizons
    }

    pub fn quantiles(&self) -> &[f64] {
        &self.quantiles
    }

    pub fn columns(&self) -> &[OutputColumn] {
        &self.columns
    }

    /// Ordered output column names.
    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column position for the horizon at `horizon_pos` and the given kind.
    pub fn position(&self, horizon_pos: usize, kind: OutputKind) -> usize {
        let n_horizons = self.horizons.len();
        match kind {
            OutputKind::Quantile(qi) => qi * n_horizons + horizon_pos,
            OutputKind::Mean => self.quantiles.len() * n_horizons + horizon_pos,
        }
    }

    /// Column positions of one output group, one per horizon in horizon order.
    pub fn group(&self, kind: OutputKind) -> Vec<usize> {
        (0..self.horizons.len())
            .map(|hp| self.position(hp, kind))
            .collect()
    }

    /// Every output group: each quantile in configured order, then the mean.
    pub fn groups(&self) -> Vec<OutputKind> {
        (0..self.quantiles.len())
            .map(OutputKind::Quantile)
            .chain(std::iter::once(OutputKind::Mean))
            .collect()
    }
}

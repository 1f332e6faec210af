//! Monotonic reconciliation of quantile forecasts.
//!
//! Separately fitted quantile regressions can cross: a lower quantile may be
//! predicted above a higher one. Reconciliation walks outward from the median
//! in each band. Quantiles above 0.5 take the running maximum of themselves
//! and every level closer to the median; quantiles below 0.5 take the running
//! minimum. The upper band also starts from the innermost lower quantile, so
//! the two bands cannot cross each other. The median and the mean are never
//! changed, and horizons never interact.

use crate::core::{OutputKind, OutputLayout};
use std::collections::BTreeMap;

/// Quantile forecasts for a single horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileFan {
    /// Quantile levels, aligned with `values`.
    pub levels: Vec<f64>,
    /// values[k][row] is the forecast for `levels[k]`.
    pub values: Vec<Vec<f64>>,
}

/// Reconcile one horizon's quantiles, returning a new fan.
pub fn reconcile_fan(fan: &QuantileFan) -> QuantileFan {
    let mut order: Vec<usize> = (0..fan.levels.len()).collect();
    order.sort_by(|&a, &b| fan.levels[a].total_cmp(&fan.levels[b]));

    let upper: Vec<usize> = order.iter().copied().filter(|&k| fan.levels[k] > 0.5).collect();
    let lower: Vec<usize> = order
        .iter()
        .rev()
        .copied()
        .filter(|&k| fan.levels[k] < 0.5)
        .collect();

    let mut values = fan.values.clone();
    walk_band(&mut values, &lower, None, f64::min);
    let seed = lower.first().map(|&k| values[k].clone());
    walk_band(&mut values, &upper, seed.as_deref(), f64::max);

    QuantileFan {
        levels: fan.levels.clone(),
        values,
    }
}

/// Reconcile every horizon independently.
pub fn reconcile_quantiles(fans: &BTreeMap<usize, QuantileFan>) -> BTreeMap<usize, QuantileFan> {
    fans.iter()
        .map(|(&horizon, fan)| (horizon, reconcile_fan(fan)))
        .collect()
}

/// Apply reconciliation to a column-major prediction table laid out by `layout`.
pub fn make_monotonic(prediction: &[Vec<f64>], layout: &OutputLayout) -> Vec<Vec<f64>> {
    let mut fans = BTreeMap::new();
    for (hp, &horizon) in layout.horizons().iter().enumerate() {
        let values = (0..layout.quantiles().len())
            .map(|qi| prediction[layout.position(hp, OutputKind::Quantile(qi))].clone())
            .collect();
        fans.insert(
            horizon,
            QuantileFan {
                levels: layout.quantiles().to_vec(),
                values,
            },
        );
    }

    let mut out = prediction.to_vec();
    let reconciled = reconcile_quantiles(&fans);
    for (hp, horizon) in layout.horizons().iter().enumerate() {
        if let Some(fan) = reconciled.get(horizon) {
            for (qi, column) in fan.values.iter().enumerate() {
                out[layout.position(hp, OutputKind::Quantile(qi))] = column.clone();
            }
        }
    }
    out
}

/// Replace each visited column with the running `pick` of itself and all
/// previously visited columns (and `seed`, if any), row by row. Missing
/// values stay missing and do not enter the running value.
fn walk_band(values: &mut [Vec<f64>], band: &[usize], seed: Option<&[f64]>, pick: fn(f64, f64) -> f64) {
    let Some(&first) = band.first() else {
        return;
    };
    for row in 0..values[first].len() {
        let mut running = seed.map_or(f64::NAN, |s| s[row]);
        for &k in band {
            let v = values[k][row];
            if v.is_nan() {
                continue;
            }
            // f64::max / f64::min ignore a NaN operand
            running = pick(running, v);
            values[k][row] = running;
        }
    }
}

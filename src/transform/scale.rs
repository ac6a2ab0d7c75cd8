//! Min-max scaling over a named column block.
//!
//! The scaler is fitted on a training partition only and then applied to
//! any partition, so test data never influences the scaling parameters.

use crate::core::WeeklyDataset;
use crate::error::Result;

/// Min-max scaler fitted over a block of named columns.
///
/// x_scaled = (x - min) / (max - min), with a degenerate-range guard:
/// constant columns scale with 1.0 and map to 0. NaN values pass through
/// unchanged (the earliest week's lag columns carry NaN by contract).
#[derive(Debug, Clone)]
pub struct ColumnScaler {
    columns: Vec<String>,
    mins: Vec<f64>,
    scales: Vec<f64>,
}

impl ColumnScaler {
    /// Fit scaling parameters for `columns` on `dataset`.
    pub fn fit(dataset: &WeeklyDataset, columns: &[String]) -> Result<Self> {
        let mut mins = Vec::with_capacity(columns.len());
        let mut scales = Vec::with_capacity(columns.len());
        for name in columns {
            let values = dataset.column(name)?;
            let min = values
                .iter()
                .copied()
                .filter(|v| !v.is_nan())
                .fold(f64::INFINITY, f64::min);
            let max = values
                .iter()
                .copied()
                .filter(|v| !v.is_nan())
                .fold(f64::NEG_INFINITY, f64::max);
            let range = max - min;
            mins.push(if min.is_finite() { min } else { 0.0 });
            scales.push(if range.is_finite() && range >= 1e-10 {
                range
            } else {
                1.0
            });
        }
        Ok(Self {
            columns: columns.to_vec(),
            mins,
            scales,
        })
    }

    /// Columns this scaler was fitted on.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Copy of `dataset` with the fitted columns replaced by their scaled values.
    pub fn apply(&self, dataset: &WeeklyDataset) -> Result<WeeklyDataset> {
        let mut out = dataset.clone();
        for (i, name) in self.columns.iter().enumerate() {
            let scaled: Vec<f64> = dataset
                .column(name)?
                .iter()
                .map(|&x| (x - self.mins[i]) / self.scales[i])
                .collect();
            out.set_column(name, scaled)?;
        }
        Ok(out)
    }
}

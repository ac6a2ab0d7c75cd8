//! Evaluation metrics, records, and the cross-validation result table.

use crate::error::{Result, SelectionError};
use crate::models::{HyperParams, ModelFamily};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Scalar error metrics for one prediction vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvalMetrics {
    /// Mean squared error.
    pub mse: f64,
    /// Mean absolute error.
    pub mae: f64,
    /// Residual sum of squares (unnormalized; mse times the count).
    pub rss: f64,
}

/// Compute error metrics between true and predicted values.
///
/// Pure function; errors on empty or unequal-length inputs.
pub fn evaluate(actual: &[f64], predicted: &[f64]) -> Result<EvalMetrics> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(SelectionError::EmptyData);
    }
    if actual.len() != predicted.len() {
        return Err(SelectionError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }

    let n = actual.len() as f64;
    let rss: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    let mae: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n;

    Ok(EvalMetrics {
        mse: rss / n,
        mae,
        rss,
    })
}

/// Composite identity of one candidate configuration.
///
/// Uniquely identifies a grid-search cell across folds; its `Display`
/// rendering is the canonical evaluation-table label
/// `"{family} degree_{d} {hyperparameters}"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfigKey {
    pub family: ModelFamily,
    pub degree: usize,
    pub params: HyperParams,
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} degree_{} {}", self.family, self.degree, self.params)
    }
}

/// One evaluation of one configuration on one fold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationRecord {
    pub key: ConfigKey,
    /// Week the fold tested on.
    pub test_week: u32,
    pub metrics: EvalMetrics,
    /// Wall-clock training duration, recorded for observability only.
    pub run_time: Duration,
}

/// Fold-averaged metrics for one configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigMean {
    pub key: ConfigKey,
    pub mse: f64,
    pub mae: f64,
    pub rss: f64,
    /// Number of fold evaluations averaged.
    pub folds: usize,
}

/// Ordered collection of evaluation records.
///
/// Row order is the deterministic iteration order of the orchestrator
/// (folds, then degrees, then grid cells); the best-model selector's
/// tie-breaking depends on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationTable {
    records: Vec<EvaluationRecord>,
}

impl EvaluationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: EvaluationRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: Vec<EvaluationRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[EvaluationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mean mse/mae/rss per configuration, averaged over folds.
    ///
    /// Configurations appear in first-appearance order, which matches
    /// the orchestrator's deterministic iteration.
    pub fn mean_by_config(&self) -> Vec<ConfigMean> {
        let mut means: Vec<ConfigMean> = Vec::new();
        for record in &self.records {
            match means.iter_mut().find(|m| m.key == record.key) {
                Some(m) => {
                    m.mse += record.metrics.mse;
                    m.mae += record.metrics.mae;
                    m.rss += record.metrics.rss;
                    m.folds += 1;
                }
                None => means.push(ConfigMean {
                    key: record.key,
                    mse: record.metrics.mse,
                    mae: record.metrics.mae,
                    rss: record.metrics.rss,
                    folds: 1,
                }),
            }
        }
        for m in &mut means {
            let n = m.folds as f64;
            m.mse /= n;
            m.mae /= n;
            m.rss /= n;
        }
        means
    }
}

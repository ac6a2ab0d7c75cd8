//! Model training and exhaustive grid search over one split.

use crate::core::{DesignMatrix, WEEK_COLUMN};
use crate::error::Result;
use crate::models::{HyperParams, ModelFamily};
use crate::selection::evaluation::{evaluate, ConfigKey, EvaluationRecord};
use std::time::Instant;
use tracing::debug;

/// Alpha ladder swept for every penalized family.
const GRID_ALPHAS: [f64; 8] = [0.001, 0.01, 0.1, 1.0, 10.0, 100.0, 1000.0, 10000.0];

/// Ordered hyperparameter grid: each model family paired with the
/// parameter combinations to evaluate for it.
///
/// Read-only static configuration; iteration order is fixed so the
/// evaluation table and every downstream tie-break are deterministic.
#[derive(Debug, Clone)]
pub struct HyperGrid {
    entries: Vec<(ModelFamily, Vec<HyperParams>)>,
}

impl HyperGrid {
    /// Empty grid.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// The standard search space: unpenalized OLS plus an eight-step
    /// alpha ladder for Lasso, Ridge, and ElasticNet (l1_ratio 0.5).
    pub fn standard() -> Self {
        let mut grid = Self::new();
        grid.insert(
            ModelFamily::LinearRegression,
            vec![HyperParams::Linear { fit_intercept: true }],
        );
        grid.insert(
            ModelFamily::Lasso,
            GRID_ALPHAS
                .iter()
                .map(|&alpha| HyperParams::Lasso { alpha })
                .collect(),
        );
        grid.insert(
            ModelFamily::Ridge,
            GRID_ALPHAS
                .iter()
                .map(|&alpha| HyperParams::Ridge { alpha })
                .collect(),
        );
        grid.insert(
            ModelFamily::ElasticNet,
            GRID_ALPHAS
                .iter()
                .map(|&alpha| HyperParams::ElasticNet { alpha, l1_ratio: 0.5 })
                .collect(),
        );
        grid
    }

    /// Append a family with its parameter combinations.
    pub fn insert(&mut self, family: ModelFamily, params: Vec<HyperParams>) {
        self.entries.push((family, params));
    }

    /// Families with their parameter lists, in insertion order.
    pub fn entries(&self) -> &[(ModelFamily, Vec<HyperParams>)] {
        &self.entries
    }

    /// Total number of grid cells.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, p)| p.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for HyperGrid {
    fn default() -> Self {
        Self::standard()
    }
}

/// Train one freshly built model and predict the test partition.
///
/// The `as_of_date` bookkeeping column is stripped from both partitions
/// first: the date is metadata, never a predictive feature. The model
/// instance is constructed, configured, and discarded within this call.
pub fn fit_and_predict(
    x_train: &DesignMatrix,
    y_train: &[f64],
    x_test: &DesignMatrix,
    family: ModelFamily,
    params: &HyperParams,
) -> Result<Vec<f64>> {
    let x_train = x_train.without_column(WEEK_COLUMN);
    let x_test = x_test.without_column(WEEK_COLUMN);

    let mut model = family.build(params)?;
    model.fit(&x_train, y_train)?;
    model.predict(&x_test)
}

/// Evaluate every grid cell on one split at one polynomial degree.
///
/// Produces one record per (family, hyperparameters) combination,
/// annotated with the fold's test week and the degree. Any fit or
/// predict failure aborts the whole call: a silent NaN row would
/// corrupt the fold averaging downstream.
pub fn run_grid_search(
    x_train: &DesignMatrix,
    y_train: &[f64],
    x_test: &DesignMatrix,
    y_test: &[f64],
    test_week: u32,
    degree: usize,
    grid: &HyperGrid,
) -> Result<Vec<EvaluationRecord>> {
    let mut records = Vec::with_capacity(grid.len());

    for (family, params_list) in grid.entries() {
        for params in params_list {
            debug!(%family, %params, degree, test_week, "training grid cell");

            let start = Instant::now();
            let predictions = fit_and_predict(x_train, y_train, x_test, *family, params)?;
            let run_time = start.elapsed();

            let metrics = evaluate(y_test, &predictions)?;
            records.push(EvaluationRecord {
                key: ConfigKey {
                    family: *family,
                    degree,
                    params: *params,
                },
                test_week,
                metrics,
                run_time,
            });
        }
    }
    Ok(records)
}

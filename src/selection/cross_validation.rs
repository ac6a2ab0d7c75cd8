//! Cross-validation orchestration over folds, degrees, and feature sets.

use crate::core::{WeeklyDataset, TARGET_COLUMN};
use crate::error::{Result, SelectionError};
use crate::features::{FeatureSet, PolynomialExpansion};
use crate::selection::assemble::prepare_eval_data;
use crate::selection::best::{select_best, WinningConfiguration};
use crate::selection::evaluation::{evaluate, EvalMetrics, EvaluationTable};
use crate::selection::grid::{fit_and_predict, run_grid_search, HyperGrid};
use crate::selection::split::Fold;
use crate::transform::ColumnScaler;
use std::collections::BTreeMap;
use tracing::info;

/// Polynomial expansion degrees searched by default.
pub const DEFAULT_DEGREES: [usize; 3] = [1, 2, 3];

/// Run the grid search across every fold and degree for one feature list.
///
/// Per fold, the population block is rescaled with parameters fitted on
/// that fold's training partition; per degree, the polynomial expansion
/// is fitted on the training matrix and applied to the test matrix,
/// never refitted. Results concatenate into one table ordered by fold,
/// then degree, then grid cell.
pub fn cross_validate(
    folds: &[Fold],
    features: &[String],
    target: &str,
    degrees: &[usize],
    grid: &HyperGrid,
) -> Result<EvaluationTable> {
    let norm_block = FeatureSet::Population.columns();
    let mut table = EvaluationTable::new();

    for fold in folds {
        info!(test_week = fold.test_week, "evaluating fold");

        let scaler = ColumnScaler::fit(&fold.train, &norm_block)?;
        let train = scaler.apply(&fold.train)?;
        let test = scaler.apply(&fold.test)?;

        let y_train = train.column(target)?.to_vec();
        let y_test = test.column(target)?.to_vec();
        let base_train = train.select(features)?;
        let base_test = test.select(features)?;

        for &degree in degrees {
            let mut poly = PolynomialExpansion::new(degree);
            let x_train = poly.fit_transform(&base_train)?;
            let x_test = poly.transform(&base_test)?;

            let records = run_grid_search(
                &x_train,
                &y_train,
                &x_test,
                &y_test,
                fold.test_week,
                degree,
                grid,
            )?;
            table.extend(records);
        }
    }
    Ok(table)
}

/// Cross-validate every feature set and select its winning configuration.
///
/// Feature sets are visited in their canonical enum order; each gets an
/// independent evaluation table whose aggregation yields one winner.
pub fn run_temporal_cv(
    folds: &[Fold],
    degrees: &[usize],
    grid: &HyperGrid,
) -> Result<BTreeMap<FeatureSet, WinningConfiguration>> {
    let first = folds.first().ok_or(SelectionError::EmptyData)?;
    let states = first.train.state_columns();

    let mut winners = BTreeMap::new();
    for feature_set in FeatureSet::ALL {
        info!(feature_set = feature_set.name(), "cross-validating feature set");

        let mut features = feature_set.columns();
        features.extend(states.iter().cloned());

        let table = cross_validate(folds, &features, TARGET_COLUMN, degrees, grid)?;
        let winner = select_best(&table, feature_set)?;
        winners.insert(feature_set, winner);
    }
    Ok(winners)
}

/// Train a feature set's winning model on the global training partition
/// and evaluate it on the holdout.
///
/// `drop_features` removes columns from both assembled matrices before
/// training; every listed name must exist.
pub fn predict_and_evaluate(
    train: &WeeklyDataset,
    test: &WeeklyDataset,
    feature_set: FeatureSet,
    winners: &BTreeMap<FeatureSet, WinningConfiguration>,
    drop_features: &[String],
) -> Result<(Vec<f64>, EvalMetrics)> {
    let winner = winners
        .get(&feature_set)
        .ok_or_else(|| SelectionError::EmptyEvaluation(feature_set.name().to_string()))?;

    let split = prepare_eval_data(train, test, feature_set, true)?;
    let x_train = split.x_train.without_columns(drop_features)?;
    let x_test = split.x_test.without_columns(drop_features)?;

    let predictions = fit_and_predict(
        &x_train,
        &split.y_train,
        &x_test,
        winner.family,
        &winner.params,
    )?;
    let metrics = evaluate(&split.y_test, &predictions)?;
    Ok((predictions, metrics))
}

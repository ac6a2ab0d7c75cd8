//! Best-model aggregation over an evaluation table.

use crate::error::{Result, SelectionError};
use crate::features::FeatureSet;
use crate::models::{HyperParams, ModelFamily};
use crate::selection::evaluation::{ConfigMean, EvaluationTable};
use serde::Serialize;
use std::cmp::Ordering;

/// The configuration judged best for one feature set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WinningConfiguration {
    pub family: ModelFamily,
    pub degree: usize,
    pub params: HyperParams,
}

/// Fold-averaged rows that are best under at least one metric.
///
/// For each of mse, mae, and rss separately, every configuration tied at
/// the minimum mean is included; a configuration winning several metrics
/// appears once per metric it wins. Empty input yields an empty pool.
pub fn find_best_model(table: &EvaluationTable) -> Vec<ConfigMean> {
    let means = table.mean_by_config();
    let mut pool = Vec::new();
    for metric in [
        (|m: &ConfigMean| m.mse) as fn(&ConfigMean) -> f64,
        |m| m.mae,
        |m| m.rss,
    ] {
        let best = means.iter().map(metric).fold(f64::INFINITY, f64::min);
        pool.extend(means.iter().filter(|m| metric(m) == best).cloned());
    }
    pool
}

/// Resolve one winning configuration from a feature set's evaluation table.
///
/// Occurrences in the [`find_best_model`] pool are tallied per model
/// family. The family with the highest count wins; ties break to the
/// lower minimum mean mse among the family's pooled rows, then to the
/// lexicographically smaller family name. The winning family's degree
/// and hyperparameters are taken from its first row in full-table order.
pub fn select_best(
    table: &EvaluationTable,
    feature_set: FeatureSet,
) -> Result<WinningConfiguration> {
    if table.is_empty() {
        return Err(SelectionError::EmptyEvaluation(feature_set.name().to_string()));
    }

    struct Tally {
        family: ModelFamily,
        count: usize,
        best_mse: f64,
    }

    let mut tallies: Vec<Tally> = Vec::new();
    for row in find_best_model(table) {
        match tallies.iter_mut().find(|t| t.family == row.key.family) {
            Some(t) => {
                t.count += 1;
                t.best_mse = t.best_mse.min(row.mse);
            }
            None => tallies.push(Tally {
                family: row.key.family,
                count: 1,
                best_mse: row.mse,
            }),
        }
    }

    tallies.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.best_mse.partial_cmp(&b.best_mse).unwrap_or(Ordering::Equal))
            .then(a.family.name().cmp(b.family.name()))
    });
    // An empty tally means every mean metric was NaN; treat it the same
    // as an empty table rather than picking an arbitrary family.
    let winner = tallies
        .first()
        .ok_or_else(|| SelectionError::EmptyEvaluation(feature_set.name().to_string()))?
        .family;

    let representative = table
        .records()
        .iter()
        .find(|r| r.key.family == winner)
        .ok_or_else(|| SelectionError::EmptyEvaluation(feature_set.name().to_string()))?;

    Ok(WinningConfiguration {
        family: winner,
        degree: representative.key.degree,
        params: representative.key.params,
    })
}

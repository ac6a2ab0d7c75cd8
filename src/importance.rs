//! Feature importance extraction from winning models.
//!
//! Refits each feature set's winning configuration on the fold with the
//! most training history and ranks the expanded-feature coefficients by
//! absolute magnitude.

use crate::core::{WeeklyDataset, TARGET_COLUMN};
use crate::error::{Result, SelectionError};
use crate::features::{FeatureSet, PolynomialExpansion};
use crate::selection::{Fold, WinningConfiguration};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Coefficients below this magnitude are treated as unimportant.
const IMPORTANCE_THRESHOLD: f64 = 0.001;

/// One expanded feature with the magnitude of its coefficient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportanceEntry {
    /// Expanded-feature label: `"1"` for the bias term, otherwise
    /// `"{feature}^{power}"`.
    pub feature: String,
    /// Absolute value of the fitted coefficient.
    pub weight: f64,
}

/// Ranked importances for one feature set's winning model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportanceTable {
    pub feature_set: FeatureSet,
    /// Entries sorted by descending weight, thresholded at 0.001.
    pub entries: Vec<ImportanceEntry>,
}

/// Extract importances for every winning configuration.
///
/// Uses the last fold of the sequence (the one with the most training
/// history) and the raw, unnormalized partitions. Tables come back in
/// the winners map's feature-set order.
pub fn compare_feature_importance(
    winners: &BTreeMap<FeatureSet, WinningConfiguration>,
    folds: &[Fold],
) -> Result<Vec<ImportanceTable>> {
    let last = folds.last().ok_or(SelectionError::EmptyData)?;
    let states = last.train.state_columns();

    let mut tables = Vec::with_capacity(winners.len());
    for (feature_set, winner) in winners {
        let mut features = feature_set.columns();
        features.extend(states.iter().cloned());

        let entries = get_feature_importance(winner, &features, &last.train)?;
        tables.push(ImportanceTable {
            feature_set: *feature_set,
            entries,
        });
    }
    Ok(tables)
}

/// Refit one winning configuration and rank its expanded coefficients.
///
/// Only defined for families exposing a coefficient vector; every family
/// in the default registry does.
pub fn get_feature_importance(
    winner: &WinningConfiguration,
    features: &[String],
    train: &WeeklyDataset,
) -> Result<Vec<ImportanceEntry>> {
    let base = train.select(features)?;
    let mut poly = PolynomialExpansion::new(winner.degree);
    let x = poly.fit_transform(&base)?;
    let y = train.column(TARGET_COLUMN)?;

    let mut model = winner.family.build(&winner.params)?;
    model.fit(&x, y)?;
    let coefficients = model
        .coefficients()
        .ok_or_else(|| SelectionError::NoCoefficients(winner.family.name().to_string()))?;

    let mut entries: Vec<ImportanceEntry> = x
        .column_names()
        .iter()
        .zip(coefficients.iter())
        .map(|(label, c)| ImportanceEntry {
            feature: label.clone(),
            weight: c.abs(),
        })
        .collect();
    entries.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));
    entries.retain(|e| e.weight > IMPORTANCE_THRESHOLD);
    Ok(entries)
}

//! Forward simulation of one future week.
//!
//! Projects the target one week past the end of the dataset by cloning
//! the latest observed week, rolling its derived columns forward under
//! the additive forecast assumption (next total = current total + new
//! cases), applying hypothetical overrides, and predicting with a
//! feature set's winning model trained on the full remaining history.

use crate::core::{WeeklyDataset, LAG_COLUMN, NEW_CASES_COLUMN, TARGET_COLUMN};
use crate::error::{Result, SelectionError};
use crate::features::FeatureSet;
use crate::selection::{fit_and_predict, prepare_eval_data, WinningConfiguration};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

/// Projected target values for one future week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    /// Week-number label of the projected week: the latest observed week
    /// plus one.
    pub week: u32,
    /// Entity of each simulated row, aligned with `predictions`.
    pub entities: Vec<String>,
    pub predictions: Vec<f64>,
}

impl Simulation {
    /// Prediction for a single entity, if it was simulated.
    pub fn for_entity(&self, entity: &str) -> Option<f64> {
        self.entities
            .iter()
            .position(|e| e == entity)
            .map(|i| self.predictions[i])
    }
}

/// Simulate the week after the latest observed week.
///
/// `overrides` maps column names to hypothetical values; each override
/// overwrites the whole column on the synthetic week, including the
/// derived lag and target columns computed just before. An empty map
/// simulates the status quo.
pub fn simulate(
    dataset: &WeeklyDataset,
    overrides: &HashMap<String, f64>,
    feature_set: FeatureSet,
    winners: &BTreeMap<FeatureSet, WinningConfiguration>,
) -> Result<Simulation> {
    let winner = winners
        .get(&feature_set)
        .ok_or_else(|| SelectionError::EmptyEvaluation(feature_set.name().to_string()))?;

    // The earliest week's lag columns are undefined; drop it before
    // anything else, as every training path does.
    let earliest = dataset.earliest_week()?;
    let history = dataset.filter_weeks(|w| w != earliest);

    let (week, mut synthetic) = synthetic_next_week(&history)?;

    // Overrides are applied last so a hypothetical can rewrite any
    // column, the derived ones included.
    for (column, value) in overrides {
        synthetic.set_column(column, vec![*value; synthetic.len()])?;
    }

    info!(
        feature_set = feature_set.name(),
        week,
        overrides = overrides.len(),
        "simulating forward week"
    );

    let split = prepare_eval_data(&history, &synthetic, feature_set, true)?;
    let predictions = fit_and_predict(
        &split.x_train,
        &split.y_train,
        &split.x_test,
        winner.family,
        &winner.params,
    )?;

    Ok(Simulation {
        week,
        entities: synthetic.entities().to_vec(),
        predictions,
    })
}

/// Clone the latest week of `history` one week forward, rolling the
/// derived columns under the additive forecast assumption: the lag
/// becomes the current total and the total grows by the current week's
/// new cases. Returns the advanced week label with the synthetic rows.
fn synthetic_next_week(history: &WeeklyDataset) -> Result<(u32, WeeklyDataset)> {
    let latest = history.latest_week()?;
    let current = history.filter_weeks(|w| w == latest);
    let mut synthetic = current.advanced_by_weeks(1);

    let target = current.column(TARGET_COLUMN)?.to_vec();
    let new_cases = current.column(NEW_CASES_COLUMN)?.to_vec();
    let projected: Vec<f64> = target
        .iter()
        .zip(new_cases.iter())
        .map(|(t, n)| t + n)
        .collect();
    synthetic.set_column(LAG_COLUMN, target)?;
    synthetic.set_column(TARGET_COLUMN, projected)?;

    Ok((latest + 1, synthetic))
}

//! Temporal train/test splitting.
//!
//! The dataset's week axis drives two splits: a global holdout (the
//! latest observed week) and an ordered sequence of expanding-window
//! cross-validation folds over the remaining history. The earliest week
//! never enters any training partition: its lag-derived columns are
//! undefined because no prior week exists.

use crate::core::WeeklyDataset;
use crate::error::{Result, SelectionError};

/// One expanding-window temporal split.
///
/// Immutable once produced; `train` holds every usable week strictly
/// before `test_week`, `test` exactly the rows at `test_week`.
#[derive(Debug, Clone)]
pub struct Fold {
    pub test_week: u32,
    pub train: WeeklyDataset,
    pub test: WeeklyDataset,
}

/// Partition a dataset into training history and the latest-week holdout.
///
/// Requires at least two distinct weeks.
pub fn global_split(dataset: &WeeklyDataset) -> Result<(WeeklyDataset, WeeklyDataset)> {
    let weeks = dataset.distinct_weeks();
    if weeks.len() < 2 {
        return Err(SelectionError::InsufficientWeeks {
            needed: 2,
            got: weeks.len(),
        });
    }
    let latest = weeks[weeks.len() - 1];
    let train = dataset.filter_weeks(|w| w < latest);
    let test = dataset.filter_weeks(|w| w == latest);
    Ok((train, test))
}

/// Build the expanding-window fold sequence over a training partition.
///
/// For each week w strictly between the earliest and latest training
/// weeks, a fold tests on w+1 and trains on every week up to and
/// including w except the earliest. Folds are returned in increasing
/// week order, so the last fold carries the most training history.
pub fn fold_sequence(train: &WeeklyDataset) -> Result<Vec<Fold>> {
    let earliest = train.earliest_week()?;
    let latest = train.latest_week()?;

    let mut folds = Vec::new();
    for w in (earliest + 1)..latest {
        let fold_train = train.filter_weeks(|wk| wk <= w && wk != earliest);
        if fold_train.is_empty() {
            return Err(SelectionError::EmptyTrainingWindow { test_week: w + 1 });
        }
        let fold_test = train.filter_weeks(|wk| wk == w + 1);
        folds.push(Fold {
            test_week: w + 1,
            train: fold_train,
            test: fold_test,
        });
    }
    Ok(folds)
}

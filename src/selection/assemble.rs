//! Normalization and feature assembly for a train/test partition pair.
//!
//! Boundary wrapper around the column scaler: fit on train, apply to
//! both partitions, drop the earliest training week, then carve the
//! requested feature columns into design matrices.

use crate::core::{DesignMatrix, WeeklyDataset, TARGET_COLUMN, WEEK_COLUMN};
use crate::error::{Result, SelectionError};
use crate::features::FeatureSet;
use crate::transform::ColumnScaler;

/// Assembled design matrices and target vectors for one partition pair.
#[derive(Debug, Clone)]
pub struct DesignSplit {
    pub x_train: DesignMatrix,
    pub y_train: Vec<f64>,
    pub x_test: DesignMatrix,
    pub y_test: Vec<f64>,
}

/// Normalize, trim, and select features for a train/test pair.
///
/// The population feature block is min-max scaled with parameters fitted
/// on `train` only. The earliest training week is then dropped (its lag
/// columns are undefined) and the feature set's columns plus every
/// `state_` indicator are selected. With `include_week`, the week number
/// rides along as the `as_of_date` column for downstream bookkeeping;
/// the trainer strips it before fitting.
pub fn prepare_eval_data(
    train: &WeeklyDataset,
    test: &WeeklyDataset,
    feature_set: FeatureSet,
    include_week: bool,
) -> Result<DesignSplit> {
    let norm_block = FeatureSet::Population.columns();
    let scaler = ColumnScaler::fit(train, &norm_block)?;
    let train = scaler.apply(train)?;
    let test = scaler.apply(test)?;

    let earliest = train.earliest_week()?;
    let train = train.filter_weeks(|w| w != earliest);
    if train.is_empty() {
        return Err(SelectionError::InsufficientWeeks { needed: 2, got: 1 });
    }

    let mut columns = feature_set.columns();
    columns.extend(train.state_columns());

    let mut x_train = train.select(&columns)?;
    let mut x_test = test.select(&columns)?;
    if include_week {
        let train_weeks: Vec<f64> = train.weeks().iter().map(|&w| w as f64).collect();
        let test_weeks: Vec<f64> = test.weeks().iter().map(|&w| w as f64).collect();
        x_train = x_train.with_column(WEEK_COLUMN, &train_weeks)?;
        x_test = x_test.with_column(WEEK_COLUMN, &test_weeks)?;
    }

    Ok(DesignSplit {
        y_train: train.column(TARGET_COLUMN)?.to_vec(),
        y_test: test.column(TARGET_COLUMN)?.to_vec(),
        x_train,
        x_test,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LAG_COLUMN, NEW_CASES_COLUMN};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    /// One entity over `n_weeks` weeks with every population-block column.
    fn dataset(n_weeks: usize) -> WeeklyDataset {
        let base = NaiveDate::from_ymd_opt(2020, 4, 6).unwrap();
        let n = n_weeks;
        let dates: Vec<NaiveDate> = (0..n)
            .map(|i| base + chrono::Duration::weeks(i as i64))
            .collect();
        let ramp: Vec<f64> = (0..n).map(|i| i as f64).collect();
        WeeklyDataset::builder()
            .entities(vec!["ohio".to_string(); n])
            .dates(dates)
            .column(TARGET_COLUMN, (0..n).map(|i| 10.0 + 5.0 * i as f64).collect())
            .column(LAG_COLUMN, ramp.clone())
            .column(NEW_CASES_COLUMN, vec![5.0; n])
            .column("pop_2020", ramp.clone())
            .column("pop_2018", ramp.clone())
            .column("capacity", vec![100.0; n])
            .column("pct_occup", ramp)
            .column("state_ohio", vec![1.0; n])
            .build()
            .unwrap()
    }

    #[test]
    fn assembles_feature_and_state_columns() {
        let ds = dataset(4);
        let (train, test) = crate::selection::global_split(&ds).unwrap();
        let split = prepare_eval_data(&train, &test, FeatureSet::Naive, false).unwrap();

        assert_eq!(
            split.x_train.column_names(),
            &[
                LAG_COLUMN.to_string(),
                NEW_CASES_COLUMN.to_string(),
                "state_ohio".to_string()
            ]
        );
        // Earliest of the 3 training weeks dropped.
        assert_eq!(split.x_train.rows(), 2);
        assert_eq!(split.y_train.len(), 2);
        assert_eq!(split.x_test.rows(), 1);
        assert_eq!(split.y_test, vec![25.0]);
    }

    #[test]
    fn population_block_is_scaled_with_train_parameters() {
        let ds = dataset(5);
        let (train, test) = crate::selection::global_split(&ds).unwrap();
        let split = prepare_eval_data(&train, &test, FeatureSet::Population, false).unwrap();

        // Train lag values are 0..=3 before scaling; min-max over the
        // training partition maps them to 0..=1 and the held-out week's
        // value of 4 extrapolates to 4/3.
        let lag_idx = split.x_train.column_index(LAG_COLUMN).unwrap();
        assert_relative_eq!(split.x_test.get(0, lag_idx), 4.0 / 3.0, epsilon = 1e-12);

        // Targets are never scaled.
        assert_eq!(split.y_test, vec![30.0]);
    }

    #[test]
    fn include_week_appends_the_bookkeeping_column() {
        let ds = dataset(4);
        let (train, test) = crate::selection::global_split(&ds).unwrap();
        let split = prepare_eval_data(&train, &test, FeatureSet::Naive, true).unwrap();

        let idx = split.x_test.column_index(WEEK_COLUMN).unwrap();
        assert_relative_eq!(split.x_test.get(0, idx), 18.0, epsilon = 1e-12);
    }

    #[test]
    fn single_week_training_partition_is_rejected() {
        let ds = dataset(2);
        let (train, test) = crate::selection::global_split(&ds).unwrap();
        let err = prepare_eval_data(&train, &test, FeatureSet::Naive, false).unwrap_err();
        assert_eq!(err, SelectionError::InsufficientWeeks { needed: 2, got: 1 });
    }

    #[test]
    fn missing_feature_column_surfaces() {
        let base = NaiveDate::from_ymd_opt(2020, 4, 6).unwrap();
        let ds = WeeklyDataset::builder()
            .entities(vec!["ohio".to_string(); 3])
            .dates((0..3).map(|i| base + chrono::Duration::weeks(i)).collect())
            .column(TARGET_COLUMN, vec![1.0, 2.0, 3.0])
            .build()
            .unwrap();
        let (train, test) = crate::selection::global_split(&ds).unwrap();
        assert!(matches!(
            prepare_eval_data(&train, &test, FeatureSet::Naive, false).unwrap_err(),
            SelectionError::MissingColumn(_)
        ));
    }
}

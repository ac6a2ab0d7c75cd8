//! End-to-end tests for the temporal selection pipeline.
//!
//! These exercise the full chain (splitting, cross-validation, best-model
//! aggregation, forward simulation, and importance extraction) on small
//! deterministic datasets with known structure.

use chrono::NaiveDate;
use prison_forecast::core::{
    WeeklyDataset, LAG_COLUMN, NEW_CASES_COLUMN, TARGET_COLUMN,
};
use prison_forecast::features::FeatureSet;
use prison_forecast::importance::compare_feature_importance;
use prison_forecast::models::{HyperParams, ModelFamily};
use prison_forecast::selection::{
    cross_validate, fold_sequence, global_split, predict_and_evaluate, run_temporal_cv,
    select_best, HyperGrid, DEFAULT_DEGREES,
};
use prison_forecast::simulation::simulate;
use std::collections::HashMap;

/// Full fixture: two entities over `n_weeks` consecutive weeks starting
/// 2020-04-06 (ISO week 15), with every column the four feature sets
/// reference. Totals grow linearly, so the lag column is perfectly
/// informative for a linear model.
fn dataset(n_weeks: usize) -> WeeklyDataset {
    let base = NaiveDate::from_ymd_opt(2020, 4, 6).unwrap();
    let mut entities = Vec::new();
    let mut dates = Vec::new();
    let mut target = Vec::new();
    let mut lag = Vec::new();
    let mut new_cases = Vec::new();
    let mut ohio = Vec::new();
    let mut texas = Vec::new();
    for i in 0..n_weeks {
        for (entity, base_cases, growth) in [("ohio", 10.0, 5.0), ("texas", 40.0, 8.0)] {
            entities.push(entity.to_string());
            dates.push(base + chrono::Duration::weeks(i as i64));
            let current = base_cases + growth * i as f64;
            target.push(current);
            lag.push(if i == 0 { f64::NAN } else { current - growth });
            new_cases.push(if i == 0 { f64::NAN } else { growth });
            ohio.push(if entity == "ohio" { 1.0 } else { 0.0 });
            texas.push(if entity == "texas" { 1.0 } else { 0.0 });
        }
    }
    let n = entities.len();
    let pop: Vec<f64> = (0..n).map(|i| 1000.0 + 7.0 * i as f64).collect();
    let occup: Vec<f64> = (0..n).map(|i| 0.8 + 0.01 * i as f64).collect();
    let mut builder = WeeklyDataset::builder()
        .entities(entities)
        .dates(dates)
        .column(TARGET_COLUMN, target)
        .column(LAG_COLUMN, lag)
        .column(NEW_CASES_COLUMN, new_cases)
        .column("pop_2020", pop.clone())
        .column("pop_2018", pop)
        .column("capacity", vec![1200.0; n])
        .column("pct_occup", occup);
    for policy in FeatureSet::Policy.columns() {
        if policy != LAG_COLUMN && policy != NEW_CASES_COLUMN {
            builder = builder.column(&policy, vec![1.0; n]);
        }
    }
    builder
        .column("state_ohio", ohio)
        .column("state_texas", texas)
        .build()
        .unwrap()
}

fn naive_features(ds: &WeeklyDataset) -> Vec<String> {
    let mut features = FeatureSet::Naive.columns();
    features.extend(ds.state_columns());
    features
}

fn linear_only_grid() -> HyperGrid {
    let mut grid = HyperGrid::new();
    grid.insert(
        ModelFamily::LinearRegression,
        vec![HyperParams::Linear { fit_intercept: true }],
    );
    grid
}

#[test]
fn four_week_scenario_produces_two_folds_and_never_trains_on_week_one() {
    let ds = dataset(4);
    let weeks = ds.distinct_weeks();
    assert_eq!(weeks, vec![15, 16, 17, 18]);

    let folds = fold_sequence(&ds).unwrap();
    assert_eq!(folds.len(), 2);

    assert_eq!(folds[0].test_week, 17);
    assert_eq!(folds[0].train.distinct_weeks(), vec![16]);
    assert_eq!(folds[0].test.distinct_weeks(), vec![17]);

    assert_eq!(folds[1].test_week, 18);
    assert_eq!(folds[1].train.distinct_weeks(), vec![16, 17]);
    assert_eq!(folds[1].test.distinct_weeks(), vec![18]);

    for fold in &folds {
        assert!(!fold.train.distinct_weeks().contains(&15));
    }

    // The scenario's grid: naive features, degree 1, LinearRegression only.
    let table = cross_validate(
        &folds,
        &naive_features(&ds),
        TARGET_COLUMN,
        &[1],
        &linear_only_grid(),
    )
    .unwrap();
    assert_eq!(table.len(), 2);
    let winner = select_best(&table, FeatureSet::Naive).unwrap();
    assert_eq!(winner.family, ModelFamily::LinearRegression);
    assert_eq!(winner.degree, 1);
}

#[test]
fn full_pipeline_selects_simulates_and_ranks() {
    let ds = dataset(8);
    let (train, test) = global_split(&ds).unwrap();
    assert_eq!(test.distinct_weeks(), vec![22]);

    // Training weeks 15..=21: folds test on weeks 17 through 21.
    let folds = fold_sequence(&train).unwrap();
    assert_eq!(folds.len(), 5);

    let grid = HyperGrid::standard();
    let winners = run_temporal_cv(&folds, &[1, 2], &grid).unwrap();
    assert_eq!(winners.len(), 4);

    // Holdout evaluation of the naive winner.
    let (predictions, metrics) =
        predict_and_evaluate(&train, &test, FeatureSet::Naive, &winners, &[]).unwrap();
    assert_eq!(predictions.len(), 2);
    assert!(metrics.mse.is_finite());
    assert!(metrics.rss >= metrics.mse);

    // Forward simulation one week past the dataset.
    let sim = simulate(&ds, &HashMap::new(), FeatureSet::Naive, &winners).unwrap();
    assert_eq!(sim.week, 23);
    assert_eq!(sim.predictions.len(), 2);
    for p in &sim.predictions {
        assert!(p.is_finite());
    }

    // Importance extraction for every winner.
    let tables = compare_feature_importance(&winners, &folds).unwrap();
    assert_eq!(tables.len(), 4);
    for table in &tables {
        for pair in table.entries.windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
        for entry in &table.entries {
            assert!(entry.weight > 0.001);
        }
    }
}

#[test]
fn evaluation_tables_are_deterministic_across_reruns() {
    let ds = dataset(6);
    let folds = fold_sequence(&ds).unwrap();
    let features = naive_features(&ds);
    let grid = HyperGrid::standard();

    let a = cross_validate(&folds, &features, TARGET_COLUMN, &DEFAULT_DEGREES, &grid).unwrap();
    let b = cross_validate(&folds, &features, TARGET_COLUMN, &DEFAULT_DEGREES, &grid).unwrap();

    assert_eq!(a.len(), b.len());
    for (ra, rb) in a.records().iter().zip(b.records().iter()) {
        assert_eq!(ra.key, rb.key);
        assert_eq!(ra.test_week, rb.test_week);
        assert_eq!(ra.metrics, rb.metrics);
    }

    // Deterministic tables give deterministic winners.
    let wa = select_best(&a, FeatureSet::Naive).unwrap();
    let wb = select_best(&b, FeatureSet::Naive).unwrap();
    assert_eq!(wa, wb);
}

#[test]
fn simulation_respects_overrides_and_labels() {
    let ds = dataset(8);
    let folds = fold_sequence(&global_split(&ds).unwrap().0).unwrap();
    let grid = linear_only_grid();
    let winners = run_temporal_cv(&folds, &[1], &grid).unwrap();

    let baseline = simulate(&ds, &HashMap::new(), FeatureSet::Naive, &winners).unwrap();

    // Zeroing out the new-cases column must change the projection.
    let mut overrides = HashMap::new();
    overrides.insert(NEW_CASES_COLUMN.to_string(), 0.0);
    let frozen = simulate(&ds, &overrides, FeatureSet::Naive, &winners).unwrap();

    assert_eq!(baseline.week, frozen.week);
    assert_ne!(baseline.predictions, frozen.predictions);
}

#[test]
fn results_serialize_for_export() {
    let ds = dataset(5);
    let folds = fold_sequence(&ds).unwrap();
    let table = cross_validate(
        &folds,
        &naive_features(&ds),
        TARGET_COLUMN,
        &[1],
        &linear_only_grid(),
    )
    .unwrap();

    let json = serde_json::to_string(&table).unwrap();
    assert!(json.contains("\"mse\""));
    assert!(json.contains("LinearRegression"));

    let winner = select_best(&table, FeatureSet::Naive).unwrap();
    let json = serde_json::to_string(&winner).unwrap();
    assert!(json.contains("\"degree\":1"));
}

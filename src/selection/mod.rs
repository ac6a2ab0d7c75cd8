//! Temporal model selection: splitting, grid search, cross-validation,
//! and best-model aggregation.

mod assemble;
mod best;
mod cross_validation;
mod evaluation;
mod grid;
mod split;

pub use assemble::{prepare_eval_data, DesignSplit};
pub use best::{find_best_model, select_best, WinningConfiguration};
pub use cross_validation::{
    cross_validate, predict_and_evaluate, run_temporal_cv, DEFAULT_DEGREES,
};
pub use evaluation::{evaluate, ConfigKey, ConfigMean, EvalMetrics, EvaluationRecord, EvaluationTable};
pub use grid::{fit_and_predict, run_grid_search, HyperGrid};
pub use split::{fold_sequence, global_split, Fold};

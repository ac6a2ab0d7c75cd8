//! Error types for the prison-forecast library.

use thiserror::Error;

/// Result type alias for model selection operations.
pub type Result<T> = std::result::Result<T, SelectionError>;

/// Errors that can occur during temporal model selection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Dataset does not span enough distinct weeks.
    #[error("insufficient weeks: need at least {needed}, got {got}")]
    InsufficientWeeks { needed: usize, got: usize },

    /// A fold's training partition is empty after excluding the earliest week.
    #[error("empty training window for test week {test_week}")]
    EmptyTrainingWindow { test_week: u32 },

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Invalid parameter or malformed input value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A referenced column is not present in the dataset.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Feature-set name is not one of the recognized sets.
    #[error("unknown feature set: {0}")]
    UnknownFeatureSet(String),

    /// Hyperparameters do not belong to the model family they were applied to.
    #[error("hyperparameters for {got} applied to {family}")]
    MismatchedParams { family: String, got: String },

    /// The evaluation table reaching the selector has no rows.
    #[error("empty evaluation table for feature set {0}")]
    EmptyEvaluation(String),

    /// Importance extraction was requested for a family without coefficients.
    #[error("model family {0} exposes no coefficient vector")]
    NoCoefficients(String),

    /// A model fit or predict step failed numerically.
    #[error("fit failure: {0}")]
    FitFailure(String),

    /// A fitted artifact was used before fitting.
    #[error("model must be fitted before prediction")]
    FitRequired,
}

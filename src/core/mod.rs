//! Core data structures for weekly observational data.

mod dataset;
mod matrix;

pub use dataset::{
    WeeklyDataset, WeeklyDatasetBuilder, LAG_COLUMN, NEW_CASES_COLUMN, STATE_PREFIX,
    TARGET_COLUMN, WEEK_COLUMN,
};
pub use matrix::DesignMatrix;

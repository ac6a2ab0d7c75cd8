//! Data transforms with train-fitted, test-applied semantics.

mod scale;

pub use scale::ColumnScaler;

//! Feature-set definitions and polynomial basis expansion.

mod feature_set;
mod polynomial;

pub use feature_set::FeatureSet;
pub use polynomial::{expansion_labels, PolynomialExpansion};

//! Polynomial basis expansion.
//!
//! Expands a design matrix into a pure-power basis: a constant bias
//! column followed by `x^d` for every input column and every degree
//! d = 1..=degree. The expanded width is therefore
//! `1 + n_features * degree`, and the expanded column labels pair
//! one-to-one with fitted coefficient vectors.

use crate::core::DesignMatrix;
use crate::error::{Result, SelectionError};

/// Pure-power polynomial feature map with a fixed degree.
///
/// `fit_transform` learns the expected input width from the training
/// matrix; `transform` rejects matrices of any other width so a test
/// partition can never silently drift from the fitted layout.
#[derive(Debug, Clone)]
pub struct PolynomialExpansion {
    degree: usize,
    n_features: Option<usize>,
}

impl PolynomialExpansion {
    /// Create an expansion of the given degree (at least 1).
    pub fn new(degree: usize) -> Self {
        Self {
            degree: degree.max(1),
            n_features: None,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Fit to the training matrix layout and expand it.
    pub fn fit_transform(&mut self, matrix: &DesignMatrix) -> Result<DesignMatrix> {
        self.n_features = Some(matrix.cols());
        self.expand(matrix)
    }

    /// Expand a matrix using the fitted layout.
    pub fn transform(&self, matrix: &DesignMatrix) -> Result<DesignMatrix> {
        let expected = self.n_features.ok_or(SelectionError::FitRequired)?;
        if matrix.cols() != expected {
            return Err(SelectionError::DimensionMismatch {
                expected,
                got: matrix.cols(),
            });
        }
        self.expand(matrix)
    }

    fn expand(&self, matrix: &DesignMatrix) -> Result<DesignMatrix> {
        let labels = expansion_labels(matrix.column_names(), self.degree);
        let rows = matrix.rows();
        let mut data = Vec::with_capacity(rows * labels.len());
        for i in 0..rows {
            data.push(1.0);
            for d in 1..=self.degree {
                for value in matrix.row(i) {
                    data.push(value.powi(d as i32));
                }
            }
        }
        DesignMatrix::new(labels, rows, data)
    }
}

/// Labels of the expanded columns: `"1"`, then `"{feature}^{power}"` for
/// every power from 1 to `degree`.
pub fn expansion_labels(features: &[String], degree: usize) -> Vec<String> {
    let mut labels = Vec::with_capacity(1 + features.len() * degree);
    labels.push("1".to_string());
    for d in 1..=degree {
        for feat in features {
            labels.push(format!("{feat}^{d}"));
        }
    }
    labels
}

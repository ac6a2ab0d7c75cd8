//! Lasso regression (L1-penalized least squares).

use crate::core::DesignMatrix;
use crate::error::{Result, SelectionError};
use crate::models::solvers::{
    centered_columns, check_fit_inputs, coordinate_descent, predict_linear,
};
use crate::models::Regressor;

/// Linear regression with an L1 coefficient penalty, fitted by cyclic
/// coordinate descent. Sparse solutions: sufficiently penalized
/// coefficients are exactly zero.
///
/// The intercept is fitted by centering and left unpenalized.
#[derive(Debug, Clone)]
pub struct Lasso {
    alpha: f64,
    coefficients: Option<Vec<f64>>,
    intercept: f64,
}

impl Lasso {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            coefficients: None,
            intercept: 0.0,
        }
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for Lasso {
    fn fit(&mut self, x: &DesignMatrix, y: &[f64]) -> Result<()> {
        check_fit_inputs(x, y)?;

        let (cols, means) = centered_columns(x);
        let y_mean = y.iter().sum::<f64>() / y.len() as f64;
        let y_centered: Vec<f64> = y.iter().map(|v| v - y_mean).collect();

        let beta = coordinate_descent(&cols, &y_centered, self.alpha, 1.0)?;
        self.intercept = y_mean
            - beta
                .iter()
                .zip(means.iter())
                .map(|(b, m)| b * m)
                .sum::<f64>();
        self.coefficients = Some(beta);
        Ok(())
    }

    fn predict(&self, x: &DesignMatrix) -> Result<Vec<f64>> {
        let beta = self.coefficients.as_ref().ok_or(SelectionError::FitRequired)?;
        predict_linear(x, beta, self.intercept)
    }

    fn coefficients(&self) -> Option<&[f64]> {
        self.coefficients.as_deref()
    }

    fn name(&self) -> &str {
        "Lasso"
    }
}

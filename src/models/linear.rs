//! Ordinary least squares regression.

use crate::core::DesignMatrix;
use crate::error::{Result, SelectionError};
use crate::models::solvers::{
    centered_columns, check_fit_inputs, predict_linear, raw_columns, solve_normal_equations,
};
use crate::models::Regressor;

/// Unpenalized linear regression solved via the normal equations.
#[derive(Debug, Clone)]
pub struct LinearRegression {
    fit_intercept: bool,
    coefficients: Option<Vec<f64>>,
    intercept: f64,
}

impl LinearRegression {
    pub fn new(fit_intercept: bool) -> Self {
        Self {
            fit_intercept,
            coefficients: None,
            intercept: 0.0,
        }
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for LinearRegression {
    fn fit(&mut self, x: &DesignMatrix, y: &[f64]) -> Result<()> {
        check_fit_inputs(x, y)?;

        if self.fit_intercept {
            let (cols, means) = centered_columns(x);
            let y_mean = y.iter().sum::<f64>() / y.len() as f64;
            let y_centered: Vec<f64> = y.iter().map(|v| v - y_mean).collect();
            let beta = solve_normal_equations(&cols, &y_centered, 0.0)?;
            self.intercept = y_mean
                - beta
                    .iter()
                    .zip(means.iter())
                    .map(|(b, m)| b * m)
                    .sum::<f64>();
            self.coefficients = Some(beta);
        } else {
            let cols = raw_columns(x);
            self.intercept = 0.0;
            self.coefficients = Some(solve_normal_equations(&cols, y, 0.0)?);
        }
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
        "LinearRegression"
    }
}

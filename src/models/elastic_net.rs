//! Elastic-net regression (mixed L1/L2 penalty).

use crate::core::DesignMatrix;
use crate::error::{Result, SelectionError};
use crate::models::solvers::{
    centered_columns, check_fit_inputs, coordinate_descent, predict_linear,
};
use crate::models::Regressor;

/// Linear regression with a convex mix of L1 and L2 penalties.
///
/// `l1_ratio = 1` is the lasso, `l1_ratio = 0` pure ridge shrinkage;
/// fitted by cyclic coordinate descent with the intercept unpenalized.
#[derive(Debug, Clone)]
pub struct ElasticNet {
    alpha: f64,
    l1_ratio: f64,
    coefficients: Option<Vec<f64>>,
    intercept: f64,
}

impl ElasticNet {
    pub fn new(alpha: f64, l1_ratio: f64) -> Self {
        Self {
            alpha,
            l1_ratio: l1_ratio.clamp(0.0, 1.0),
            coefficients: None,
            intercept: 0.0,
        }
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for ElasticNet {
    fn fit(&mut self, x: &DesignMatrix, y: &[f64]) -> Result<()> {
        check_fit_inputs(x, y)?;

        let (cols, means) = centered_columns(x);
        let y_mean = y.iter().sum::<f64>() / y.len() as f64;
        let y_centered: Vec<f64> = y.iter().map(|v| v - y_mean).collect();

        let beta = coordinate_descent(&cols, &y_centered, self.alpha, self.l1_ratio)?;
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
        "ElasticNet"
    }
}

//! Regressor trait, model families, and hyperparameter variants.

use crate::core::DesignMatrix;
use crate::error::{Result, SelectionError};
use crate::models::{ElasticNet, Lasso, LinearRegression, Ridge};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Common interface for all regression models.
///
/// This trait is object-safe and can be used with `Box<dyn Regressor>`.
pub trait Regressor: fmt::Debug {
    /// Fit the model to the design matrix and target values.
    fn fit(&mut self, x: &DesignMatrix, y: &[f64]) -> Result<()>;

    /// Predict target values for new rows.
    fn predict(&self, x: &DesignMatrix) -> Result<Vec<f64>>;

    /// Per-column coefficients of the fitted model, if the family has any.
    ///
    /// The separately-fitted intercept is not part of this vector, so its
    /// length always equals the width of the fitted design matrix.
    fn coefficients(&self) -> Option<&[f64]>;

    /// Model family name.
    fn name(&self) -> &str;
}

/// Type alias for boxed regressor trait objects.
pub type BoxedRegressor = Box<dyn Regressor>;

/// The regression model families in the search space.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ModelFamily {
    LinearRegression,
    Lasso,
    Ridge,
    ElasticNet,
}

impl ModelFamily {
    /// Every family, in the canonical grid-search iteration order.
    pub const ALL: [ModelFamily; 4] = [
        ModelFamily::LinearRegression,
        ModelFamily::Lasso,
        ModelFamily::Ridge,
        ModelFamily::ElasticNet,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModelFamily::LinearRegression => "LinearRegression",
            ModelFamily::Lasso => "Lasso",
            ModelFamily::Ridge => "Ridge",
            ModelFamily::ElasticNet => "ElasticNet",
        }
    }

    /// Construct a fresh, configured model instance.
    ///
    /// A pure factory: every call returns a new instance, so no
    /// configuration can leak between grid-search cells. The
    /// hyperparameters must belong to this family.
    pub fn build(&self, params: &HyperParams) -> Result<BoxedRegressor> {
        if params.family() != *self {
            return Err(SelectionError::MismatchedParams {
                family: self.name().to_string(),
                got: params.family().name().to_string(),
            });
        }
        Ok(match *params {
            HyperParams::Linear { fit_intercept } => {
                Box::new(LinearRegression::new(fit_intercept))
            }
            HyperParams::Lasso { alpha } => Box::new(Lasso::new(alpha)),
            HyperParams::Ridge { alpha } => Box::new(Ridge::new(alpha)),
            HyperParams::ElasticNet { alpha, l1_ratio } => {
                Box::new(ElasticNet::new(alpha, l1_ratio))
            }
        })
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hyperparameter values, tagged by model family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HyperParams {
    Linear { fit_intercept: bool },
    Lasso { alpha: f64 },
    Ridge { alpha: f64 },
    ElasticNet { alpha: f64, l1_ratio: f64 },
}

impl HyperParams {
    /// The family these hyperparameters configure.
    pub fn family(&self) -> ModelFamily {
        match self {
            HyperParams::Linear { .. } => ModelFamily::LinearRegression,
            HyperParams::Lasso { .. } => ModelFamily::Lasso,
            HyperParams::Ridge { .. } => ModelFamily::Ridge,
            HyperParams::ElasticNet { .. } => ModelFamily::ElasticNet,
        }
    }
}

impl fmt::Display for HyperParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HyperParams::Linear { fit_intercept } => {
                write!(f, "fit_intercept={fit_intercept}")
            }
            HyperParams::Lasso { alpha } | HyperParams::Ridge { alpha } => {
                write!(f, "alpha={alpha}")
            }
            HyperParams::ElasticNet { alpha, l1_ratio } => {
                write!(f, "alpha={alpha} l1_ratio={l1_ratio}")
            }
        }
    }
}

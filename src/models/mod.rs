//! Regression model families.

mod elastic_net;
mod lasso;
mod linear;
mod ridge;
mod solvers;
mod traits;

pub use elastic_net::ElasticNet;
pub use lasso::Lasso;
pub use linear::LinearRegression;
pub use ridge::Ridge;
pub use traits::{BoxedRegressor, HyperParams, ModelFamily, Regressor};

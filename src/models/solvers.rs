//! Shared numerical routines for the linear model families.
//!
//! The normal-equation path solves symmetric positive definite systems
//! by Cholesky decomposition; the penalized paths use cyclic coordinate
//! descent with soft thresholding.

use crate::core::DesignMatrix;
use crate::error::{Result, SelectionError};

const CD_MAX_SWEEPS: usize = 1000;
const CD_TOLERANCE: f64 = 1e-6;

/// Column vectors of `x` with each column shifted by its mean.
///
/// Returns the centered columns and the column means.
pub(crate) fn centered_columns(x: &DesignMatrix) -> (Vec<Vec<f64>>, Vec<f64>) {
    let means = x.column_means();
    let cols = (0..x.cols())
        .map(|j| {
            let m = means[j];
            (0..x.rows()).map(|i| x.get(i, j) - m).collect()
        })
        .collect();
    (cols, means)
}

/// Raw (uncentered) column vectors of `x`.
pub(crate) fn raw_columns(x: &DesignMatrix) -> Vec<Vec<f64>> {
    (0..x.cols()).map(|j| x.column(j)).collect()
}

/// Solve the normal equations (XᵀX + ridge·I) β = Xᵀy.
///
/// A small diagonal jitter keeps near-collinear designs (one-hot blocks,
/// polynomial powers) positive definite.
pub(crate) fn solve_normal_equations(
    cols: &[Vec<f64>],
    y: &[f64],
    ridge: f64,
) -> Result<Vec<f64>> {
    let k = cols.len();
    let n = y.len();
    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];

    for i in 0..k {
        for j in i..k {
            let mut sum = 0.0;
            for obs in 0..n {
                sum += cols[i][obs] * cols[j][obs];
            }
            xtx[i][j] = sum;
            xtx[j][i] = sum;
        }
        for obs in 0..n {
            xty[i] += cols[i][obs] * y[obs];
        }
    }

    for (i, row) in xtx.iter_mut().enumerate() {
        row[i] += ridge + 1e-8;
    }

    solve_symmetric(&xtx, &xty).ok_or_else(|| {
        SelectionError::FitFailure("normal equations not positive definite".to_string())
    })
}

/// Solve symmetric positive definite A x = b via Cholesky decomposition.
fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    // A = L Lᵀ
    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }
            if i == j {
                if sum <= 0.0 {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // Forward substitution: L z = b
    let mut z = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * z[j];
        }
        z[i] = sum / l[i][i];
    }

    // Backward substitution: Lᵀ x = z
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = z[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}

/// Cyclic coordinate descent for the elastic-net objective
///
///   1/(2n)·‖y − Xβ‖² + α·l1_ratio·‖β‖₁ + α·(1 − l1_ratio)/2·‖β‖₂²
///
/// With `l1_ratio = 1` this is the lasso. Columns are expected centered;
/// the intercept is handled by the caller. Constant (zero-variance)
/// columns keep a zero coefficient.
pub(crate) fn coordinate_descent(
    cols: &[Vec<f64>],
    y: &[f64],
    alpha: f64,
    l1_ratio: f64,
) -> Result<Vec<f64>> {
    let k = cols.len();
    let n = y.len();
    let nf = n as f64;

    let l1_penalty = nf * alpha * l1_ratio;
    let l2_penalty = nf * alpha * (1.0 - l1_ratio);

    let col_norms: Vec<f64> = cols
        .iter()
        .map(|c| c.iter().map(|v| v * v).sum::<f64>())
        .collect();

    let mut beta = vec![0.0; k];
    let mut residual = y.to_vec();

    for _ in 0..CD_MAX_SWEEPS {
        let mut max_delta: f64 = 0.0;
        for j in 0..k {
            if col_norms[j] == 0.0 {
                continue;
            }
            let old = beta[j];
            let rho: f64 = cols[j]
                .iter()
                .zip(residual.iter())
                .map(|(x, r)| x * r)
                .sum::<f64>()
                + col_norms[j] * old;
            let new = soft_threshold(rho, l1_penalty) / (col_norms[j] + l2_penalty);
            if new != old {
                let delta = new - old;
                for (r, x) in residual.iter_mut().zip(cols[j].iter()) {
                    *r -= delta * x;
                }
                beta[j] = new;
                max_delta = max_delta.max(delta.abs());
            }
        }
        if max_delta < CD_TOLERANCE {
            break;
        }
    }

    if beta.iter().any(|b| !b.is_finite()) {
        return Err(SelectionError::FitFailure(
            "coordinate descent produced non-finite coefficients".to_string(),
        ));
    }
    Ok(beta)
}

fn soft_threshold(value: f64, threshold: f64) -> f64 {
    if value > threshold {
        value - threshold
    } else if value < -threshold {
        value + threshold
    } else {
        0.0
    }
}

/// Linear prediction: intercept + x·β per row.
pub(crate) fn predict_linear(
    x: &DesignMatrix,
    coefficients: &[f64],
    intercept: f64,
) -> Result<Vec<f64>> {
    if x.cols() != coefficients.len() {
        return Err(SelectionError::DimensionMismatch {
            expected: coefficients.len(),
            got: x.cols(),
        });
    }
    Ok((0..x.rows())
        .map(|i| {
            intercept
                + x.row(i)
                    .iter()
                    .zip(coefficients.iter())
                    .map(|(xv, b)| xv * b)
                    .sum::<f64>()
        })
        .collect())
}

/// Shape check shared by every family's `fit`.
pub(crate) fn check_fit_inputs(x: &DesignMatrix, y: &[f64]) -> Result<()> {
    if x.rows() == 0 || y.is_empty() {
        return Err(SelectionError::EmptyData);
    }
    if x.rows() != y.len() {
        return Err(SelectionError::DimensionMismatch {
            expected: x.rows(),
            got: y.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn solve_symmetric_identity() {
        let a = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let b = vec![3.0, -2.0];
        let x = solve_symmetric(&a, &b).unwrap();
        assert_relative_eq!(x[0], 3.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], -2.0, epsilon = 1e-12);
    }

    #[test]
    fn solve_symmetric_rejects_indefinite() {
        let a = vec![vec![0.0, 0.0], vec![0.0, 0.0]];
        let b = vec![1.0, 1.0];
        assert!(solve_symmetric(&a, &b).is_none());
    }

    #[test]
    fn soft_threshold_shrinks_toward_zero() {
        assert_relative_eq!(soft_threshold(5.0, 2.0), 3.0);
        assert_relative_eq!(soft_threshold(-5.0, 2.0), -3.0);
        assert_relative_eq!(soft_threshold(1.0, 2.0), 0.0);
    }

    #[test]
    fn coordinate_descent_zero_alpha_matches_ols() {
        // y = 2*x on centered data
        let x = vec![vec![-1.5, -0.5, 0.5, 1.5]];
        let y = vec![-3.0, -1.0, 1.0, 3.0];
        let beta = coordinate_descent(&x, &y, 0.0, 1.0).unwrap();
        assert_relative_eq!(beta[0], 2.0, epsilon = 1e-9);
    }

    #[test]
    fn coordinate_descent_large_alpha_zeroes_out() {
        let x = vec![vec![-1.5, -0.5, 0.5, 1.5]];
        let y = vec![-3.0, -1.0, 1.0, 3.0];
        let beta = coordinate_descent(&x, &y, 1e6, 1.0).unwrap();
        assert_relative_eq!(beta[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn coordinate_descent_skips_constant_columns() {
        let x = vec![vec![0.0, 0.0, 0.0, 0.0], vec![-1.5, -0.5, 0.5, 1.5]];
        let y = vec![-3.0, -1.0, 1.0, 3.0];
        let beta = coordinate_descent(&x, &y, 0.0, 1.0).unwrap();
        assert_relative_eq!(beta[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(beta[1], 2.0, epsilon = 1e-9);
    }
}

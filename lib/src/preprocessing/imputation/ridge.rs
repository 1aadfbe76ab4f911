//! Closed-form ridge regression used as the per-feature imputation model.

use ndarray::{Array1, Array2, Axis};

use crate::preprocessing::error::PreprocessingError;

/// Fits `y ≈ x·coef + intercept` minimizing `‖y - x·coef - b‖² + alpha·‖coef‖²`.
///
/// The intercept is not penalized: both sides are centered first. Returns
/// `(coef, intercept)`. With zero predictor columns the model is the mean.
pub(crate) fn fit_ridge(
    x: &Array2<f64>,
    y: &Array1<f64>,
    alpha: f64,
) -> Result<(Vec<f64>, f64), PreprocessingError> {
    let n = x.nrows();
    if n == 0 || y.len() != n {
        return Err(PreprocessingError::EmptyData(
            "Ridge regression needs at least one observed row".to_string(),
        ));
    }

    let y_mean = y.sum() / n as f64;
    if x.ncols() == 0 {
        return Ok((Vec::new(), y_mean));
    }

    let x_mean = x.mean_axis(Axis(0)).ok_or_else(|| {
        PreprocessingError::NumericalError("Cannot center empty design matrix".to_string())
    })?;
    let xc = x - &x_mean.view().insert_axis(Axis(0));
    let yc = y - y_mean;

    let mut gram = xc.t().dot(&xc);
    for i in 0..gram.nrows() {
        gram[[i, i]] += alpha;
    }
    let rhs = xc.t().dot(&yc);

    let coef = cholesky_solve(gram, rhs)?;
    let intercept = y_mean - x_mean.dot(&coef);
    Ok((coef.to_vec(), intercept))
}

/// Solves `a·x = b` for symmetric positive definite `a`.
fn cholesky_solve(a: Array2<f64>, b: Array1<f64>) -> Result<Array1<f64>, PreprocessingError> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));

    for j in 0..n {
        let mut diag = a[[j, j]];
        for k in 0..j {
            diag -= l[[j, k]] * l[[j, k]];
        }
        if diag <= 0.0 || !diag.is_finite() {
            return Err(PreprocessingError::NumericalError(format!(
                "Regression system is singular (pivot {diag} at column {j})"
            )));
        }
        let d = diag.sqrt();
        l[[j, j]] = d;
        for i in (j + 1)..n {
            let mut v = a[[i, j]];
            for k in 0..j {
                v -= l[[i, k]] * l[[j, k]];
            }
            l[[i, j]] = v / d;
        }
    }

    // Forward then backward substitution.
    let mut z = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut v = b[i];
        for k in 0..i {
            v -= l[[i, k]] * z[k];
        }
        z[i] = v / l[[i, i]];
    }
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut v = z[i];
        for k in (i + 1)..n {
            v -= l[[k, i]] * x[k];
        }
        x[i] = v / l[[i, i]];
    }
    Ok(x)
}

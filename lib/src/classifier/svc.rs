//! C-support vector classification with an RBF kernel.
//!
//! The dual problem is solved with sequential minimal optimization using
//! second-order working set selection. The full kernel matrix is computed
//! up front, which is fine for datasets of a few thousand rows.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    check_predict_input, validate_training_data, Classifier, ClassifierError, FittedClassifier,
};

const TAU: f64 = 1e-12;

/// Kernel coefficient for `exp(-gamma * ||a - b||^2)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gamma {
    /// `1 / (n_features * var(X))`, or `1.0` when `X` is constant.
    Scale,
    Value(f64),
}

impl Gamma {
    fn resolve(self, x: &Array2<f64>) -> f64 {
        match self {
            Gamma::Value(g) => g,
            Gamma::Scale => {
                let var = x.var(0.0);
                if var > 0.0 {
                    1.0 / (x.ncols() as f64 * var)
                } else {
                    1.0
                }
            }
        }
    }
}

/// Unfitted C-SVC hyperparameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportVectorClassifier {
    /// Regularization parameter.
    pub c: f64,
    pub gamma: Gamma,
    /// Stopping tolerance on the KKT violation.
    pub tol: f64,
    /// Solver iteration cap.
    pub max_iter: usize,
}

impl Default for SupportVectorClassifier {
    fn default() -> Self {
        Self {
            c: 1.0,
            gamma: Gamma::Scale,
            tol: 1e-3,
            max_iter: 1_000_000,
        }
    }
}

impl SupportVectorClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    pub fn with_gamma(mut self, gamma: Gamma) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(ClassifierError::InvalidParameter(format!(
                "C must be positive, got {}",
                self.c
            )));
        }
        if let Gamma::Value(g) = self.gamma {
            if !(g.is_finite() && g > 0.0) {
                return Err(ClassifierError::InvalidParameter(format!(
                    "gamma must be positive, got {g}"
                )));
            }
        }
        if !(self.tol.is_finite() && self.tol > 0.0) {
            return Err(ClassifierError::InvalidParameter(format!(
                "tol must be positive, got {}",
                self.tol
            )));
        }
        if self.max_iter == 0 {
            return Err(ClassifierError::InvalidParameter(
                "max_iter must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn rbf(a: ArrayView1<f64>, b: ArrayView1<f64>, gamma: f64) -> f64 {
    let dist: f64 = a.iter().zip(b.iter()).map(|(u, v)| (u - v) * (u - v)).sum();
    (-gamma * dist).exp()
}

fn kernel_matrix(x: &Array2<f64>, gamma: f64) -> Array2<f64> {
    let n = x.nrows();
    let mut k = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        k[[i, i]] = 1.0;
        for j in (i + 1)..n {
            let v = rbf(x.row(i), x.row(j), gamma);
            k[[i, j]] = v;
            k[[j, i]] = v;
        }
    }
    k
}

struct SmoSolution {
    alpha: Vec<f64>,
    rho: f64,
    n_iter: usize,
    converged: bool,
}

/// Solves `min ½ αᵀQα - eᵀα` s.t. `yᵀα = 0`, `0 ≤ α ≤ c`, with `Q_ij = y_i y_j K_ij`.
fn solve_dual(k: &Array2<f64>, y: &[f64], c: f64, eps: f64, max_iter: usize) -> SmoSolution {
    let n = y.len();
    let mut alpha = vec![0.0; n];
    let mut grad = vec![-1.0; n];
    let mut n_iter = 0;
    let mut converged = false;

    while n_iter < max_iter {
        // i: maximal violation in the "up" set.
        let mut gmax = f64::NEG_INFINITY;
        let mut sel_i = None;
        for t in 0..n {
            if y[t] > 0.0 {
                if alpha[t] < c && -grad[t] >= gmax {
                    gmax = -grad[t];
                    sel_i = Some(t);
                }
            } else if alpha[t] > 0.0 && grad[t] >= gmax {
                gmax = grad[t];
                sel_i = Some(t);
            }
        }
        let Some(i) = sel_i else {
            converged = true;
            break;
        };

        // j: largest second-order decrease in the "low" set.
        let mut gmax2 = f64::NEG_INFINITY;
        let mut sel_j = None;
        let mut obj_min = f64::INFINITY;
        for t in 0..n {
            let (in_low, grad_t) = if y[t] > 0.0 {
                (alpha[t] > 0.0, grad[t])
            } else {
                (alpha[t] < c, -grad[t])
            };
            if !in_low {
                continue;
            }
            if grad_t >= gmax2 {
                gmax2 = grad_t;
            }
            let grad_diff = gmax + grad_t;
            if grad_diff > 0.0 {
                let quad = k[[i, i]] + k[[t, t]] - 2.0 * k[[i, t]];
                let obj = -(grad_diff * grad_diff) / if quad > 0.0 { quad } else { TAU };
                if obj <= obj_min {
                    obj_min = obj;
                    sel_j = Some(t);
                }
            }
        }

        if gmax + gmax2 < eps {
            converged = true;
            break;
        }
        let Some(j) = sel_j else {
            converged = true;
            break;
        };
        n_iter += 1;

        let old_i = alpha[i];
        let old_j = alpha[j];
        let q_ij = y[i] * y[j] * k[[i, j]];

        if y[i] != y[j] {
            let mut quad = k[[i, i]] + k[[j, j]] + 2.0 * q_ij;
            if quad <= 0.0 {
                quad = TAU;
            }
            let delta = (-grad[i] - grad[j]) / quad;
            let diff = alpha[i] - alpha[j];
            alpha[i] += delta;
            alpha[j] += delta;
            if diff > 0.0 {
                if alpha[j] < 0.0 {
                    alpha[j] = 0.0;
                    alpha[i] = diff;
                }
            } else if alpha[i] < 0.0 {
                alpha[i] = 0.0;
                alpha[j] = -diff;
            }
            if diff > 0.0 {
                if alpha[i] > c {
                    alpha[i] = c;
                    alpha[j] = c - diff;
                }
            } else if alpha[j] > c {
                alpha[j] = c;
                alpha[i] = c + diff;
            }
        } else {
            let mut quad = k[[i, i]] + k[[j, j]] - 2.0 * q_ij;
            if quad <= 0.0 {
                quad = TAU;
            }
            let delta = (grad[i] - grad[j]) / quad;
            let sum = alpha[i] + alpha[j];
            alpha[i] -= delta;
            alpha[j] += delta;
            if sum > c {
                if alpha[i] > c {
                    alpha[i] = c;
                    alpha[j] = sum - c;
                }
            } else if alpha[j] < 0.0 {
                alpha[j] = 0.0;
                alpha[i] = sum;
            }
            if sum > c {
                if alpha[j] > c {
                    alpha[j] = c;
                    alpha[i] = sum - c;
                }
            } else if alpha[i] < 0.0 {
                alpha[i] = 0.0;
                alpha[j] = sum;
            }
        }

        let d_i = alpha[i] - old_i;
        let d_j = alpha[j] - old_j;
        for t in 0..n {
            grad[t] += y[t] * (y[i] * k[[i, t]] * d_i + y[j] * k[[j, t]] * d_j);
        }
    }

    let rho = compute_rho(&alpha, &grad, y, c);
    SmoSolution {
        alpha,
        rho,
        n_iter,
        converged,
    }
}

fn compute_rho(alpha: &[f64], grad: &[f64], y: &[f64], c: f64) -> f64 {
    let mut ub = f64::INFINITY;
    let mut lb = f64::NEG_INFINITY;
    let mut free_sum = 0.0;
    let mut n_free = 0usize;

    for t in 0..y.len() {
        let yg = y[t] * grad[t];
        if alpha[t] >= c {
            if y[t] < 0.0 {
                ub = ub.min(yg);
            } else {
                lb = lb.max(yg);
            }
        } else if alpha[t] <= 0.0 {
            if y[t] > 0.0 {
                ub = ub.min(yg);
            } else {
                lb = lb.max(yg);
            }
        } else {
            n_free += 1;
            free_sum += yg;
        }
    }

    if n_free > 0 {
        free_sum / n_free as f64
    } else {
        (ub + lb) / 2.0
    }
}

impl Classifier for SupportVectorClassifier {
    type Fitted = FittedSvc;

    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<FittedSvc, ClassifierError> {
        self.validate()?;
        let targets = validate_training_data(x, y)?;
        let gamma = self.gamma.resolve(x);
        debug!(
            n_samples = x.nrows(),
            n_features = x.ncols(),
            gamma,
            c = self.c,
            "Fitting SVC"
        );

        let k = kernel_matrix(x, gamma);
        let solution = solve_dual(&k, &targets.signs, self.c, self.tol, self.max_iter);
        if !solution.converged {
            warn!(
                max_iter = self.max_iter,
                "SVC solver reached the iteration limit before converging"
            );
        }

        let support: Vec<usize> = (0..x.nrows())
            .filter(|&t| solution.alpha[t] > 0.0)
            .collect();
        let support_vectors = x.select(Axis(0), &support);
        let dual_coef: Vec<f64> = support
            .iter()
            .map(|&t| solution.alpha[t] * targets.signs[t])
            .collect();

        debug!(
            n_support = support.len(),
            n_iter = solution.n_iter,
            rho = solution.rho,
            "SVC fitted"
        );

        Ok(FittedSvc {
            support_vectors,
            dual_coef: Array1::from(dual_coef),
            intercept: -solution.rho,
            gamma,
            classes: targets.classes,
            n_features: x.ncols(),
            n_iter: solution.n_iter,
        })
    }
}

/// Serializable state of a [`FittedSvc`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SvcParams {
    /// Row-major support vectors, `n_support * n_features` values.
    pub support_vectors: Vec<f64>,
    pub n_support: usize,
    pub n_features: usize,
    /// `alpha_i * y_i` for each support vector.
    pub dual_coef: Vec<f64>,
    pub intercept: f64,
    pub gamma: f64,
    pub classes: [f64; 2],
    pub n_iter: usize,
}

/// A fitted C-SVC.
#[derive(Clone, Debug)]
pub struct FittedSvc {
    support_vectors: Array2<f64>,
    dual_coef: Array1<f64>,
    intercept: f64,
    gamma: f64,
    classes: [f64; 2],
    n_features: usize,
    n_iter: usize,
}

impl FittedSvc {
    /// Signed distance to the separating surface; positive means `classes[1]`.
    pub fn decision_function(&self, x: &Array2<f64>) -> Result<Array1<f64>, ClassifierError> {
        check_predict_input(x, self.n_features)?;
        Ok(x
            .outer_iter()
            .map(|row| {
                self.support_vectors
                    .outer_iter()
                    .zip(self.dual_coef.iter())
                    .map(|(sv, &coef)| coef * rbf(sv, row, self.gamma))
                    .sum::<f64>()
                    + self.intercept
            })
            .collect())
    }

    pub fn n_support(&self) -> usize {
        self.support_vectors.nrows()
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    pub fn extract_params(&self) -> SvcParams {
        SvcParams {
            support_vectors: self.support_vectors.iter().copied().collect(),
            n_support: self.support_vectors.nrows(),
            n_features: self.n_features,
            dual_coef: self.dual_coef.to_vec(),
            intercept: self.intercept,
            gamma: self.gamma,
            classes: self.classes,
            n_iter: self.n_iter,
        }
    }

    pub fn from_params(params: SvcParams) -> Result<Self, ClassifierError> {
        if params.dual_coef.len() != params.n_support {
            return Err(ClassifierError::InvalidParameter(format!(
                "{} dual coefficients for {} support vectors",
                params.dual_coef.len(),
                params.n_support
            )));
        }
        let support_vectors = Array2::from_shape_vec(
            (params.n_support, params.n_features),
            params.support_vectors,
        )
        .map_err(|e| ClassifierError::InvalidParameter(e.to_string()))?;
        Ok(Self {
            support_vectors,
            dual_coef: Array1::from(params.dual_coef),
            intercept: params.intercept,
            gamma: params.gamma,
            classes: params.classes,
            n_features: params.n_features,
            n_iter: params.n_iter,
        })
    }
}

impl FittedClassifier for FittedSvc {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, ClassifierError> {
        let decision = self.decision_function(x)?;
        Ok(decision.mapv(|d| if d > 0.0 { self.classes[1] } else { self.classes[0] }))
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> [f64; 2] {
        self.classes
    }
}

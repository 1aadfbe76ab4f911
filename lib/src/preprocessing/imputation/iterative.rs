//! Iterative Imputer.
//!
//! Models each feature with missing values as a ridge regression on all
//! other features and refines the fill in round-robin fashion:
//!
//! 1. Fill every missing cell with a [`SimpleImputer`] statistic.
//! 2. Visit features that had missing values, fewest missing first. Fit a
//!    regression on the rows where that feature was observed and overwrite
//!    its missing cells with predictions.
//! 3. Repeat until the largest change between two rounds drops to
//!    `tol * max|observed value|`, or `max_iter` rounds have run.
//!
//! Every regression fitted during `fit` is recorded. `transform` replays
//! them in the same order, so transforming the training matrix reproduces
//! the fit-time imputation exactly.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use super::ridge::fit_ridge;
use super::simple::{FittedSimpleImputer, ImputeStrategy, SimpleImputer, SimpleImputerParams};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};

/// IterativeImputer transformer (unfitted).
///
/// Defaults: `max_iter = 10`, `tol = 1e-3`, `ridge_alpha = 1.0`,
/// mean initial fill, and non-convergence is an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IterativeImputer {
    pub max_iter: usize,
    pub tol: f64,
    pub ridge_alpha: f64,
    pub initial_strategy: ImputeStrategy,
    pub fail_on_non_convergence: bool,
}

impl Default for IterativeImputer {
    fn default() -> Self {
        Self {
            max_iter: 10,
            tol: 1e-3,
            ridge_alpha: 1.0,
            initial_strategy: ImputeStrategy::Mean,
            fail_on_non_convergence: true,
        }
    }
}

impl IterativeImputer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_ridge_alpha(mut self, alpha: f64) -> Self {
        self.ridge_alpha = alpha;
        self
    }

    pub fn with_initial_strategy(mut self, strategy: ImputeStrategy) -> Self {
        self.initial_strategy = strategy;
        self
    }

    /// When false, hitting `max_iter` only logs a warning.
    pub fn with_fail_on_non_convergence(mut self, fail: bool) -> Self {
        self.fail_on_non_convergence = fail;
        self
    }

    fn validate(&self) -> Result<(), PreprocessingError> {
        if self.max_iter == 0 {
            return Err(PreprocessingError::InvalidParameter(
                "max_iter must be at least 1".to_string(),
            ));
        }
        if self.tol.is_nan() || self.tol < 0.0 {
            return Err(PreprocessingError::InvalidParameter(format!(
                "tol must be non-negative, got {}",
                self.tol
            )));
        }
        if self.ridge_alpha.is_nan() || self.ridge_alpha < 0.0 {
            return Err(PreprocessingError::InvalidParameter(format!(
                "ridge_alpha must be non-negative, got {}",
                self.ridge_alpha
            )));
        }
        Ok(())
    }
}

/// One recorded regression: `x[feature] = intercept + Σ coef[k]·x[predictors[k]]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegressionStep {
    pub feature: usize,
    pub predictors: Vec<usize>,
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl RegressionStep {
    fn predict_row(&self, x: &Array2<f64>, row: usize) -> f64 {
        self.predictors
            .iter()
            .zip(&self.coef)
            .fold(self.intercept, |acc, (&p, &c)| acc + c * x[[row, p]])
    }

    /// Overwrites `x[row, feature]` for every row flagged in `missing`.
    fn apply(&self, x: &mut Array2<f64>, missing: &[usize]) {
        for &row in missing {
            x[[row, self.feature]] = self.predict_row(x, row);
        }
    }
}

/// Serializable parameters for a fitted IterativeImputer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IterativeImputerParams {
    pub initial: SimpleImputerParams,
    pub steps: Vec<RegressionStep>,
    pub n_features: usize,
    pub n_iter: usize,
}

/// Rows with a NaN in each column.
fn missing_rows(data: &Array2<f64>) -> Vec<Vec<usize>> {
    data.axis_iter(Axis(1))
        .map(|col| {
            col.iter()
                .enumerate()
                .filter(|(_, v)| v.is_nan())
                .map(|(row, _)| row)
                .collect()
        })
        .collect()
}

impl Transformer for IterativeImputer {
    type Params = IterativeImputerParams;
    type Fitted = FittedIterativeImputer;

    fn fit(&self, data: &Array2<f64>) -> Result<Self::Fitted, PreprocessingError> {
        self.validate()?;
        let (rows, cols) = data.dim();
        if rows == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit IterativeImputer on empty data".to_string(),
            ));
        }

        let initial = SimpleImputer::new(self.initial_strategy.clone()).fit(data)?;
        let mut x = initial.transform(data)?;
        let missing = missing_rows(data);

        // Fully missing columns keep their initial fill; there is nothing to regress on.
        let mut order: Vec<usize> = (0..cols)
            .filter(|&c| !missing[c].is_empty() && missing[c].len() < rows)
            .collect();
        order.sort_by_key(|&c| missing[c].len());

        let mut steps = Vec::new();
        if order.is_empty() {
            tracing::debug!("No missing values to model; imputation is the identity");
            return Ok(FittedIterativeImputer {
                initial,
                steps,
                n_features: cols,
                n_iter: 0,
            });
        }

        let abs_max = data
            .iter()
            .filter(|v| !v.is_nan())
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let threshold = self.tol * abs_max;

        let mut change = f64::INFINITY;
        let mut n_iter = 0;
        for round in 1..=self.max_iter {
            let previous = x.clone();

            for &feature in &order {
                let predictors: Vec<usize> = (0..cols).filter(|&c| c != feature).collect();
                let observed: Vec<usize> = {
                    let miss = &missing[feature];
                    (0..rows).filter(|r| miss.binary_search(r).is_err()).collect()
                };

                let x_obs = x.select(Axis(0), &observed).select(Axis(1), &predictors);
                let y_obs: Array1<f64> = observed.iter().map(|&r| x[[r, feature]]).collect();
                let (coef, intercept) = fit_ridge(&x_obs, &y_obs, self.ridge_alpha)?;

                let step = RegressionStep {
                    feature,
                    predictors,
                    coef,
                    intercept,
                };
                step.apply(&mut x, &missing[feature]);
                steps.push(step);
            }

            n_iter = round;
            change = (&x - &previous)
                .iter()
                .fold(0.0_f64, |acc, d| acc.max(d.abs()));
            tracing::debug!(round, change, threshold, "Imputation round finished");
            if change <= threshold {
                break;
            }
        }

        if change > threshold {
            if self.fail_on_non_convergence {
                return Err(PreprocessingError::NotConverged {
                    max_iter: self.max_iter,
                    change,
                    threshold,
                });
            }
            tracing::warn!(
                max_iter = self.max_iter,
                change,
                threshold,
                "Iterative imputation reached max_iter without converging"
            );
        }

        if x.iter().any(|v| !v.is_finite()) {
            return Err(PreprocessingError::NumericalError(
                "Imputation produced non-finite values".to_string(),
            ));
        }

        tracing::info!(
            rounds = n_iter,
            features = order.len(),
            "Iterative imputer fitted"
        );
        Ok(FittedIterativeImputer {
            initial,
            steps,
            n_features: cols,
            n_iter,
        })
    }
}

/// Fitted IterativeImputer ready for inference.
#[derive(Clone, Debug)]
pub struct FittedIterativeImputer {
    initial: FittedSimpleImputer,
    steps: Vec<RegressionStep>,
    n_features: usize,
    n_iter: usize,
}

impl FittedIterativeImputer {
    /// Number of rounds run during fit.
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    pub fn steps(&self) -> &[RegressionStep] {
        &self.steps
    }

    pub fn initial_statistics(&self) -> &[f64] {
        self.initial.statistics()
    }
}

impl FittedTransformer for FittedIterativeImputer {
    type Params = IterativeImputerParams;

    fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, PreprocessingError> {
        self.check_features(data)?;

        let mut x = self.initial.transform(data)?;
        let missing = missing_rows(data);
        for step in &self.steps {
            step.apply(&mut x, &missing[step.feature]);
        }
        Ok(x)
    }

    fn extract_params(&self) -> Self::Params {
        IterativeImputerParams {
            initial: self.initial.extract_params(),
            steps: self.steps.clone(),
            n_features: self.n_features,
            n_iter: self.n_iter,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        let initial = FittedSimpleImputer::from_params(params.initial)?;
        if initial.n_features_in() != params.n_features {
            return Err(PreprocessingError::SerializationError(format!(
                "Initial imputer has {} features, expected {}",
                initial.n_features_in(),
                params.n_features
            )));
        }
        let out_of_range = params.steps.iter().any(|s| {
            s.feature >= params.n_features
                || s.predictors.len() != s.coef.len()
                || s.predictors.iter().any(|&p| p >= params.n_features)
        });
        if out_of_range {
            return Err(PreprocessingError::SerializationError(
                "Regression step refers to an unknown feature".to_string(),
            ));
        }
        Ok(Self {
            initial,
            steps: params.steps,
            n_features: params.n_features,
            n_iter: params.n_iter,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// b = 2a + 1 over 20 rows, with b missing at rows 3 and 10.
    fn linear_with_gaps() -> Array2<f64> {
        let mut data = Array2::<f64>::zeros((20, 2));
        for r in 0..20 {
            data[[r, 0]] = r as f64;
            data[[r, 1]] = 2.0 * r as f64 + 1.0;
        }
        data[[3, 1]] = f64::NAN;
        data[[10, 1]] = f64::NAN;
        data
    }

    #[test]
    fn test_no_missing_values_is_identity() {
        let data = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]];
        let fitted = IterativeImputer::new().fit(&data).unwrap();
        assert_eq!(fitted.n_iter(), 0);
        assert!(fitted.steps().is_empty());
        assert_eq!(fitted.transform(&data).unwrap(), data);
    }

    #[test]
    fn test_imputes_from_linear_relation() {
        let data = linear_with_gaps();
        let out = IterativeImputer::new().fit_transform(&data).unwrap();
        assert!((out[[3, 1]] - 7.0).abs() < 0.1, "got {}", out[[3, 1]]);
        assert!((out[[10, 1]] - 21.0).abs() < 0.1, "got {}", out[[10, 1]]);
    }

    #[test]
    fn test_observed_cells_untouched() {
        let data = linear_with_gaps();
        let out = IterativeImputer::new().fit_transform(&data).unwrap();
        for ((r, c), &v) in data.indexed_iter() {
            if !v.is_nan() {
                assert_eq!(out[[r, c]], v);
            }
        }
    }

    #[test]
    fn test_transform_replays_fit() {
        let data = linear_with_gaps();
        let fitted = IterativeImputer::new().fit(&data).unwrap();
        let a = fitted.transform(&data).unwrap();
        let b = IterativeImputer::new().fit_transform(&data).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_transform_new_rows() {
        let fitted = IterativeImputer::new().fit(&linear_with_gaps()).unwrap();
        let fresh = array![[5.0, f64::NAN], [f64::NAN, 9.0]];
        let out = fitted.transform(&fresh).unwrap();
        assert!((out[[0, 1]] - 11.0).abs() < 0.2);
        // Column 0 had no gaps at fit time: only the mean fill applies.
        assert!((out[[1, 0]] - 9.5).abs() < 1e-12);
    }

    #[test]
    fn test_not_converged_is_error() {
        let err = IterativeImputer::new()
            .with_max_iter(1)
            .fit(&linear_with_gaps())
            .unwrap_err();
        assert!(matches!(
            err,
            PreprocessingError::NotConverged { max_iter: 1, .. }
        ));
    }

    #[test]
    fn test_not_converged_can_warn_instead() {
        let fitted = IterativeImputer::new()
            .with_max_iter(1)
            .with_fail_on_non_convergence(false)
            .fit(&linear_with_gaps())
            .unwrap();
        assert_eq!(fitted.n_iter(), 1);
    }

    #[test]
    fn test_fully_missing_column_keeps_zero_fill() {
        let data = array![[1.0, f64::NAN], [2.0, f64::NAN], [3.0, f64::NAN]];
        let out = IterativeImputer::new().fit_transform(&data).unwrap();
        assert_eq!(out.column(1).to_vec(), vec![0.0, 0.0, 0.0]);
        assert_eq!(out.ncols(), 2);
    }

    #[test]
    fn test_feature_mismatch() {
        let fitted = IterativeImputer::new().fit(&linear_with_gaps()).unwrap();
        let err = fitted.transform(&Array2::zeros((1, 3))).unwrap_err();
        assert!(matches!(err, PreprocessingError::FeatureMismatch { .. }));
    }

    #[test]
    fn test_invalid_parameters() {
        let data = linear_with_gaps();
        assert!(IterativeImputer::new().with_max_iter(0).fit(&data).is_err());
        assert!(IterativeImputer::new().with_tol(-1.0).fit(&data).is_err());
        assert!(IterativeImputer::new()
            .with_ridge_alpha(f64::NAN)
            .fit(&data)
            .is_err());
    }

    #[test]
    fn test_params_round_trip() {
        let fitted = IterativeImputer::new().fit(&linear_with_gaps()).unwrap();
        let restored = FittedIterativeImputer::from_params(fitted.extract_params()).unwrap();
        let fresh = array![[7.0, f64::NAN]];
        assert_eq!(
            restored.transform(&fresh).unwrap(),
            fitted.transform(&fresh).unwrap()
        );
    }
}

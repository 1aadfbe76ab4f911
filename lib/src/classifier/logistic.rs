//! L2-regularized logistic regression trained with full-batch gradient descent.
//!
//! Features are standardized internally before training; the fitted model
//! stores the per-column mean and scale and applies them at predict time.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    check_predict_input, validate_training_data, Classifier, ClassifierError, FittedClassifier,
};

/// Unfitted logistic regression hyperparameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticRegression {
    pub learning_rate: f64,
    pub max_epochs: usize,
    /// L2 penalty on the weights (not the bias).
    pub l2: f64,
    /// Stop once the loss improves by less than this between epochs.
    pub tol: f64,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            max_epochs: 1000,
            l2: 1e-4,
            tol: 1e-8,
        }
    }
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_max_epochs(mut self, max_epochs: usize) -> Self {
        self.max_epochs = max_epochs;
        self
    }

    pub fn with_l2(mut self, l2: f64) -> Self {
        self.l2 = l2;
        self
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ClassifierError::InvalidParameter(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.l2.is_finite() && self.l2 >= 0.0) {
            return Err(ClassifierError::InvalidParameter(format!(
                "l2 must be non-negative, got {}",
                self.l2
            )));
        }
        if !(self.tol.is_finite() && self.tol >= 0.0) {
            return Err(ClassifierError::InvalidParameter(format!(
                "tol must be non-negative, got {}",
                self.tol
            )));
        }
        if self.max_epochs == 0 {
            return Err(ClassifierError::InvalidParameter(
                "max_epochs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Mean binary cross-entropy on logits, numerically stable form.
fn bce_with_logits(logits: &Array1<f64>, targets: &Array1<f64>) -> f64 {
    let n = logits.len() as f64;
    logits
        .iter()
        .zip(targets.iter())
        .map(|(&z, &t)| z.max(0.0) - z * t + (-z.abs()).exp().ln_1p())
        .sum::<f64>()
        / n
}

impl Classifier for LogisticRegression {
    type Fitted = FittedLogisticRegression;

    fn fit(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
    ) -> Result<FittedLogisticRegression, ClassifierError> {
        self.validate()?;
        let targets = validate_training_data(x, y)?;
        let t: Array1<f64> = targets.signs.iter().map(|&s| if s > 0.0 { 1.0 } else { 0.0 }).collect();

        let n = x.nrows() as f64;
        let mean = x.mean_axis(Axis(0)).ok_or_else(|| {
            ClassifierError::EmptyData("Cannot standardize zero rows".to_string())
        })?;
        let scale = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > 0.0 { s } else { 1.0 });
        let xs = (x - &mean) / &scale;

        let mut weights = Array1::<f64>::zeros(x.ncols());
        let mut bias = 0.0;
        let mut prev_loss = f64::INFINITY;
        let mut epochs = 0;

        for epoch in 0..self.max_epochs {
            epochs = epoch + 1;
            let logits = xs.dot(&weights) + bias;
            let loss = bce_with_logits(&logits, &t) + 0.5 * self.l2 * weights.dot(&weights);
            if epoch % 100 == 0 {
                debug!(epoch, loss, "Logistic regression epoch");
            }
            if (prev_loss - loss).abs() < self.tol {
                break;
            }
            prev_loss = loss;

            let residual = logits.mapv(sigmoid) - &t;
            let grad_w = xs.t().dot(&residual) / n + &(&weights * self.l2);
            let grad_b = residual.sum() / n;
            weights.scaled_add(-self.learning_rate, &grad_w);
            bias -= self.learning_rate * grad_b;
        }

        if weights.iter().any(|w| !w.is_finite()) || !bias.is_finite() {
            return Err(ClassifierError::NonFinite("trained weights".to_string()));
        }
        debug!(epochs, loss = prev_loss, "Logistic regression fitted");

        Ok(FittedLogisticRegression {
            weights,
            bias,
            mean,
            scale,
            classes: targets.classes,
        })
    }
}

/// Serializable state of a [`FittedLogisticRegression`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    pub classes: [f64; 2],
}

#[derive(Clone, Debug)]
pub struct FittedLogisticRegression {
    weights: Array1<f64>,
    bias: f64,
    mean: Array1<f64>,
    scale: Array1<f64>,
    classes: [f64; 2],
}

impl FittedLogisticRegression {
    /// Probability of `classes[1]` for each row.
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>, ClassifierError> {
        check_predict_input(x, self.weights.len())?;
        let xs = (x - &self.mean) / &self.scale;
        Ok((xs.dot(&self.weights) + self.bias).mapv(sigmoid))
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub fn extract_params(&self) -> LogisticParams {
        LogisticParams {
            weights: self.weights.to_vec(),
            bias: self.bias,
            mean: self.mean.to_vec(),
            scale: self.scale.to_vec(),
            classes: self.classes,
        }
    }

    pub fn from_params(params: LogisticParams) -> Result<Self, ClassifierError> {
        let n = params.weights.len();
        if params.mean.len() != n || params.scale.len() != n {
            return Err(ClassifierError::InvalidParameter(format!(
                "Inconsistent parameter lengths: {} weights, {} means, {} scales",
                n,
                params.mean.len(),
                params.scale.len()
            )));
        }
        Ok(Self {
            weights: Array1::from(params.weights),
            bias: params.bias,
            mean: Array1::from(params.mean),
            scale: Array1::from(params.scale),
            classes: params.classes,
        })
    }
}

impl FittedClassifier for FittedLogisticRegression {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, ClassifierError> {
        let proba = self.predict_proba(x)?;
        Ok(proba.mapv(|p| if p >= 0.5 { self.classes[1] } else { self.classes[0] }))
    }

    fn n_features_in(&self) -> usize {
        self.weights.len()
    }

    fn classes(&self) -> [f64; 2] {
        self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::test_data::two_clusters;
    use ndarray::array;

    #[test]
    fn test_sigmoid_is_stable() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(800.0) <= 1.0);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bce_at_zero_logits_is_ln2() {
        let loss = bce_with_logits(&array![0.0, 0.0], &array![0.0, 1.0]);
        assert!((loss - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn test_separates_two_clusters() {
        let (x, y) = two_clusters();
        let model = LogisticRegression::new().fit(&x, &y).unwrap();
        assert_eq!(model.score(&x, &y).unwrap(), 1.0);
        let proba = model.predict_proba(&array![[4.0, 4.0]]).unwrap();
        assert!(proba[0] > 0.9);
    }

    #[test]
    fn test_constant_column_does_not_break_scaling() {
        let x = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];
        let y = array![0.0, 0.0, 1.0, 1.0];
        let model = LogisticRegression::new().fit(&x, &y).unwrap();
        assert!(model.weights().iter().all(|w| w.is_finite()));
        assert_eq!(model.score(&x, &y).unwrap(), 1.0);
    }

    #[test]
    fn test_params_round_trip() {
        let (x, y) = two_clusters();
        let model = LogisticRegression::new().with_max_epochs(50).fit(&x, &y).unwrap();
        let restored = FittedLogisticRegression::from_params(model.extract_params()).unwrap();
        assert_eq!(
            restored.predict_proba(&x).unwrap(),
            model.predict_proba(&x).unwrap()
        );
    }

    #[test]
    fn test_rejects_bad_learning_rate() {
        let (x, y) = two_clusters();
        let err = LogisticRegression::new()
            .with_learning_rate(-1.0)
            .fit(&x, &y)
            .unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidParameter(_)));
    }

    #[test]
    fn test_with_tol() {
        let (x, y) = two_clusters();
        let model = LogisticRegression::new().with_tol(1e-3);
        assert_eq!(model.tol, 1e-3);
        assert_eq!(model.fit(&x, &y).unwrap().score(&x, &y).unwrap(), 1.0);

        let err = LogisticRegression::new().with_tol(-1.0).fit(&x, &y).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidParameter(_)));
    }
}

//! Binary classifiers with a strict fit/predict split.
//!
//! An unfitted classifier carries only hyperparameters; [`Classifier::fit`]
//! consumes training data and returns a separate fitted type that carries
//! only what prediction needs. Fitted types round-trip through plain-data
//! parameter structs for persistence.
//!
//! | Classifier | Fitted | Notes |
//! |------------|--------|-------|
//! | [`SupportVectorClassifier`] | [`FittedSvc`] | C-SVC, RBF kernel, SMO solver |
//! | [`LogisticRegression`] | [`FittedLogisticRegression`] | Full-batch gradient descent |
//!
//! [`ClassifierKind`] selects one from configuration and [`TrainedClassifier`]
//! holds either fitted variant.

mod error;
mod logistic;
mod svc;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

pub use error::ClassifierError;
pub use logistic::{FittedLogisticRegression, LogisticParams, LogisticRegression};
pub use svc::{FittedSvc, Gamma, SupportVectorClassifier, SvcParams};

/// An unfitted classifier.
pub trait Classifier {
    type Fitted: FittedClassifier;

    /// Fits on features `x` (rows = samples) and binary labels `y`.
    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Self::Fitted, ClassifierError>;
}

/// A fitted classifier ready for inference.
pub trait FittedClassifier {
    /// Predicted label for every row of `x`.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, ClassifierError>;

    fn n_features_in(&self) -> usize;

    /// The two labels seen during fit, ascending.
    fn classes(&self) -> [f64; 2];

    /// Mean accuracy of `predict(x)` against `y`.
    fn score(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<f64, ClassifierError> {
        if x.nrows() != y.len() {
            return Err(ClassifierError::LengthMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }
        if y.is_empty() {
            return Err(ClassifierError::EmptyData(
                "Cannot score on empty data".to_string(),
            ));
        }
        let predicted = self.predict(x)?;
        let correct = predicted
            .iter()
            .zip(y.iter())
            .filter(|(p, t)| p == t)
            .count();
        Ok(correct as f64 / y.len() as f64)
    }
}

/// Validated binary training targets.
#[derive(Clone, Debug)]
pub(crate) struct BinaryTargets {
    /// The two labels, ascending.
    pub classes: [f64; 2],
    /// `+1.0` for `classes[1]`, `-1.0` for `classes[0]`.
    pub signs: Vec<f64>,
}

/// Checks shapes and finiteness and maps labels onto ±1.
pub(crate) fn validate_training_data(
    x: &Array2<f64>,
    y: &Array1<f64>,
) -> Result<BinaryTargets, ClassifierError> {
    if x.nrows() == 0 {
        return Err(ClassifierError::EmptyData(
            "Cannot fit a classifier on zero rows".to_string(),
        ));
    }
    if x.nrows() != y.len() {
        return Err(ClassifierError::LengthMismatch {
            rows: x.nrows(),
            labels: y.len(),
        });
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(ClassifierError::NonFinite("features".to_string()));
    }
    if y.iter().any(|v| !v.is_finite()) {
        return Err(ClassifierError::NonFinite("labels".to_string()));
    }

    let mut classes: Vec<f64> = y.to_vec();
    classes.sort_by(f64::total_cmp);
    classes.dedup();
    if classes.len() != 2 {
        return Err(ClassifierError::UnsupportedClasses {
            found: classes.len(),
        });
    }
    let classes = [classes[0], classes[1]];
    let signs = y
        .iter()
        .map(|&v| if v == classes[1] { 1.0 } else { -1.0 })
        .collect();
    Ok(BinaryTargets { classes, signs })
}

pub(crate) fn check_predict_input(x: &Array2<f64>, n_features: usize) -> Result<(), ClassifierError> {
    if x.ncols() != n_features {
        return Err(ClassifierError::FeatureMismatch {
            expected_features: n_features,
            got_features: x.ncols(),
        });
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(ClassifierError::NonFinite("features".to_string()));
    }
    Ok(())
}

/// Classifier choice as read from configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierKind {
    Svc(SupportVectorClassifier),
    Logistic(LogisticRegression),
}

impl Default for ClassifierKind {
    fn default() -> Self {
        ClassifierKind::Svc(SupportVectorClassifier::default())
    }
}

impl ClassifierKind {
    pub fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<TrainedClassifier, ClassifierError> {
        Ok(match self {
            ClassifierKind::Svc(c) => TrainedClassifier::Svc(c.fit(x, y)?),
            ClassifierKind::Logistic(c) => TrainedClassifier::Logistic(c.fit(x, y)?),
        })
    }
}

/// Either fitted classifier.
#[derive(Clone, Debug)]
pub enum TrainedClassifier {
    Svc(FittedSvc),
    Logistic(FittedLogisticRegression),
}

/// Serializable parameters of a [`TrainedClassifier`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TrainedClassifierParams {
    Svc(SvcParams),
    Logistic(LogisticParams),
}

impl TrainedClassifier {
    pub fn kind_name(&self) -> &'static str {
        match self {
            TrainedClassifier::Svc(_) => "svc",
            TrainedClassifier::Logistic(_) => "logistic",
        }
    }

    pub fn extract_params(&self) -> TrainedClassifierParams {
        match self {
            TrainedClassifier::Svc(m) => TrainedClassifierParams::Svc(m.extract_params()),
            TrainedClassifier::Logistic(m) => {
                TrainedClassifierParams::Logistic(m.extract_params())
            }
        }
    }

    pub fn from_params(params: TrainedClassifierParams) -> Result<Self, ClassifierError> {
        Ok(match params {
            TrainedClassifierParams::Svc(p) => TrainedClassifier::Svc(FittedSvc::from_params(p)?),
            TrainedClassifierParams::Logistic(p) => {
                TrainedClassifier::Logistic(FittedLogisticRegression::from_params(p)?)
            }
        })
    }
}

impl FittedClassifier for TrainedClassifier {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, ClassifierError> {
        match self {
            TrainedClassifier::Svc(m) => m.predict(x),
            TrainedClassifier::Logistic(m) => m.predict(x),
        }
    }

    fn n_features_in(&self) -> usize {
        match self {
            TrainedClassifier::Svc(m) => m.n_features_in(),
            TrainedClassifier::Logistic(m) => m.n_features_in(),
        }
    }

    fn classes(&self) -> [f64; 2] {
        match self {
            TrainedClassifier::Svc(m) => m.classes(),
            TrainedClassifier::Logistic(m) => m.classes(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_validate_maps_larger_label_to_plus_one() {
        let x = array![[0.0], [1.0], [2.0]];
        let y = array![5.0, 2.0, 5.0];
        let targets = validate_training_data(&x, &y).unwrap();
        assert_eq!(targets.classes, [2.0, 5.0]);
        assert_eq!(targets.signs, vec![1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_validate_rejects_single_class() {
        let x = array![[0.0], [1.0]];
        let y = array![1.0, 1.0];
        assert!(matches!(
            validate_training_data(&x, &y),
            Err(ClassifierError::UnsupportedClasses { found: 1 })
        ));
    }

    #[test]
    fn test_validate_rejects_three_classes() {
        let x = array![[0.0], [1.0], [2.0]];
        let y = array![0.0, 1.0, 2.0];
        assert!(matches!(
            validate_training_data(&x, &y),
            Err(ClassifierError::UnsupportedClasses { found: 3 })
        ));
    }

    #[test]
    fn test_validate_rejects_nan_features() {
        let x = array![[f64::NAN], [1.0]];
        let y = array![0.0, 1.0];
        assert!(matches!(
            validate_training_data(&x, &y),
            Err(ClassifierError::NonFinite(_))
        ));
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        let x = array![[0.0], [1.0]];
        let y = array![0.0];
        assert!(matches!(
            validate_training_data(&x, &y),
            Err(ClassifierError::LengthMismatch { rows: 2, labels: 1 })
        ));
    }

    #[test]
    fn test_kind_fits_both_variants() {
        let (x, y) = test_data::two_clusters();
        for kind in [
            ClassifierKind::default(),
            ClassifierKind::Logistic(LogisticRegression::default()),
        ] {
            let model = kind.fit(&x, &y).unwrap();
            assert_eq!(model.score(&x, &y).unwrap(), 1.0, "{}", model.kind_name());
        }
    }

    #[test]
    fn test_trained_params_round_trip() {
        let (x, y) = test_data::two_clusters();
        let model = ClassifierKind::default().fit(&x, &y).unwrap();
        let restored = TrainedClassifier::from_params(model.extract_params()).unwrap();
        assert_eq!(restored.predict(&x).unwrap(), model.predict(&x).unwrap());
    }

    #[test]
    fn test_kind_from_toml() {
        let kind: ClassifierKind = toml::from_str("kind = \"logistic\"\nmax_epochs = 50\n").unwrap();
        match kind {
            ClassifierKind::Logistic(l) => assert_eq!(l.max_epochs, 50),
            other => panic!("unexpected {other:?}"),
        }
    }
}

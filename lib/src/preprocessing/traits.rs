//! Core traits for fitted and unfitted transformers.
//!
//! - [`Transformer`]: holds hyperparameters and learns from data.
//! - [`FittedTransformer`]: holds learned state; transforms new data and
//!   round-trips through a serializable parameter struct.

use ndarray::Array2;

use crate::preprocessing::error::PreprocessingError;
use crate::serialization::SerializableParams;

/// Trait for unfitted transformers with hyperparameters.
///
/// # Example
/// ```
/// use ndarray::array;
/// use titanic_survival::preprocessing::{
///     FittedTransformer, ImputeStrategy, SimpleImputer, Transformer,
/// };
///
/// let data = array![[1.0, f64::NAN], [3.0, 4.0]];
/// let fitted = SimpleImputer::new(ImputeStrategy::Mean).fit(&data).unwrap();
/// let filled = fitted.transform(&data).unwrap();
/// assert_eq!(filled[[0, 1]], 4.0);
/// ```
pub trait Transformer: Clone {
    /// Serializable representation of learned parameters.
    type Params: SerializableParams;
    /// The fitted transformer type ready for inference.
    type Fitted: FittedTransformer<Params = Self::Params>;

    /// Learn parameters from the training data.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if the data is empty, the
    /// hyperparameters are invalid, or fitting fails numerically.
    fn fit(&self, data: &Array2<f64>) -> Result<Self::Fitted, PreprocessingError>;

    /// Fit the transformer and transform the data in one step.
    fn fit_transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, PreprocessingError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Trait for fitted transformers ready for inference.
///
/// # Guarantees
/// - `extract_params()` + `from_params()` is a round-trip.
/// - `transform` never mutates the learned state.
pub trait FittedTransformer: Clone {
    /// Serializable representation of learned parameters.
    type Params: SerializableParams;

    /// Transform data using learned parameters.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::FeatureMismatch`] if the column count
    /// differs from the one seen during fit.
    fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, PreprocessingError>;

    /// Extract learned parameters as a serializable representation.
    fn extract_params(&self) -> Self::Params;

    /// Reconstruct a fitted transformer from parameters.
    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError>
    where
        Self: Sized;

    /// Save the fitted transformer to a file.
    fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        let params = self.extract_params();
        let bytes = params.to_bytes().map_err(std::io::Error::other)?;
        std::fs::write(path, bytes)
    }

    /// Load a fitted transformer from a file.
    fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, PreprocessingError>
    where
        Self: Sized,
    {
        let bytes = std::fs::read(path)?;
        let params = Self::Params::from_bytes(&bytes)
            .map_err(|e| PreprocessingError::SerializationError(e.to_string()))?;
        Self::from_params(params)
    }

    /// Returns the number of features seen during fit.
    fn n_features_in(&self) -> usize;

    /// Fails with [`PreprocessingError::FeatureMismatch`] unless `data` has
    /// the fitted column count.
    fn check_features(&self, data: &Array2<f64>) -> Result<(), PreprocessingError> {
        let got = data.ncols();
        if got != self.n_features_in() {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.n_features_in(),
                got_features: got,
            });
        }
        Ok(())
    }
}

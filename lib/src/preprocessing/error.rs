//! Error types for preprocessing operations.

use crate::table::SchemaError;

/// Error type for preprocessing and imputation.
///
/// Variants are grouped so callers can tell a schema mismatch from a
/// numerical failure from a convergence failure.
#[derive(Debug, thiserror::Error)]
pub enum PreprocessingError {
    /// The input table does not have the expected columns or types.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// Feature dimension mismatch between fit and transform.
    #[error("Feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },
    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),
    /// Invalid hyperparameter value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Numerical computation error (singular system, non-finite result).
    #[error("Numerical error: {0}")]
    NumericalError(String),
    /// Iterative imputation did not settle within its round budget.
    #[error(
        "Imputation did not converge after {max_iter} rounds: last change {change:.6} exceeds {threshold:.6}"
    )]
    NotConverged {
        max_iter: usize,
        change: f64,
        threshold: f64,
    },
    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<bincode::Error> for PreprocessingError {
    fn from(err: bincode::Error) -> Self {
        PreprocessingError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_feature_mismatch() {
        let err = PreprocessingError::FeatureMismatch {
            expected_features: 12,
            got_features: 7,
        };
        assert!(err.to_string().contains("expected 12 features, got 7"));
    }

    #[test]
    fn test_error_display_not_converged() {
        let err = PreprocessingError::NotConverged {
            max_iter: 10,
            change: 0.5,
            threshold: 0.01,
        };
        let msg = err.to_string();
        assert!(msg.contains("did not converge after 10 rounds"));
    }

    #[test]
    fn test_schema_error_is_transparent() {
        let err: PreprocessingError = SchemaError::MissingColumn {
            name: "FARE".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Missing column: FARE");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: PreprocessingError = io_err.into();
        assert!(matches!(err, PreprocessingError::IoError(_)));
    }

    #[test]
    fn test_error_from_bincode_error() {
        let bad_bytes: &[u8] = &[0xff, 0xff, 0xff, 0xff];
        let bincode_result: Result<String, bincode::Error> = bincode::deserialize(bad_bytes);
        if let Err(e) = bincode_result {
            let err: PreprocessingError = e.into();
            assert!(matches!(err, PreprocessingError::SerializationError(_)));
        }
    }
}

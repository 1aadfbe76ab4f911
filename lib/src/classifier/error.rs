//! Error types for classifier fitting and prediction.

/// Error type for classifiers.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Empty data: {0}")]
    EmptyData(String),
    /// Feature rows and labels differ in length.
    #[error("Got {rows} feature rows but {labels} labels")]
    LengthMismatch { rows: usize, labels: usize },
    /// Only binary targets are supported.
    #[error("Expected exactly 2 classes, found {found}")]
    UnsupportedClasses { found: usize },
    /// NaN or infinite values in features or labels.
    #[error("Non-finite value in {0}")]
    NonFinite(String),
    #[error("Feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<bincode::Error> for ClassifierError {
    fn from(err: bincode::Error) -> Self {
        ClassifierError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_unsupported_classes() {
        let err = ClassifierError::UnsupportedClasses { found: 1 };
        assert_eq!(err.to_string(), "Expected exactly 2 classes, found 1");
    }

    #[test]
    fn test_display_length_mismatch() {
        let err = ClassifierError::LengthMismatch { rows: 3, labels: 2 };
        assert!(err.to_string().contains("3 feature rows but 2 labels"));
    }
}

//! Crate-level error type.
//!
//! Each layer has its own error enum; [`Error`] wraps them all so the
//! training entry point and the CLI can use a single `Result`.

use thiserror::Error;

use crate::classifier::ClassifierError;
use crate::config::ConfigError;
use crate::model::ModelError;
use crate::preprocessing::PreprocessingError;
use crate::registry::RegistryError;
use crate::table::{SchemaError, TableError};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Preprocessing error: {0}")]
    Preprocessing(#[from] PreprocessingError),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_layer_errors() {
        let err: Error = SchemaError::MissingColumn {
            name: "AGE".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Schema(_)));
        assert!(err.to_string().starts_with("Schema error:"));
        assert!(err.to_string().contains("AGE"));
    }
}

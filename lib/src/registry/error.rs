use std::io;

use crate::model::ModelError;

/// Errors raised by a model registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Artifact encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Version names are unique per model.
    #[error("Model {name} already has a version {version}")]
    VersionExists { name: String, version: String },

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Model {name} has no version {version}")]
    UnknownVersion { name: String, version: String },

    #[error("Model {0} has no default version")]
    NoDefault(String),

    /// Model and version names become directory names.
    #[error("Invalid name {0:?}: use letters, digits, '-', '_' or '.'")]
    InvalidName(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

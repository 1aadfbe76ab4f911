//! Inference wrapper, signatures and the packaged training result.
//!
//! A [`SurvivalModel`] owns a [`ModelContext`] holding the fitted imputer and
//! classifier. Its only operation, [`SurvivalModel::predict`], maps a
//! passenger [`Table`](crate::table::Table) to a one-column table of labels.
//! Training wraps it in a [`ModelPackage`] together with a
//! [`ModelSignature`], version name and train score.

mod context;
mod package;
mod signature;
mod survival;

pub use context::{ModelContext, ModelContextParams};
pub use package::{version_name, ModelPackage, PREDICT_METHOD, SCORE_METRIC};
pub use signature::{infer_signature, FeatureSpec, ModelSignature};
pub use survival::{SurvivalModel, OUTPUT_COLUMN};

use crate::classifier::ClassifierError;
use crate::preprocessing::PreprocessingError;
use crate::table::SchemaError;

/// Errors raised while predicting or restoring a model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error(transparent)]
    Preprocessing(#[from] PreprocessingError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// Restored artifacts disagree on the feature count.
    #[error("Inconsistent model artifacts: {0}")]
    ArtifactMismatch(String),
}

//! Immutable bundle of the fitted artifacts used at inference time.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ModelError;
use crate::classifier::{FittedClassifier, TrainedClassifier, TrainedClassifierParams};
use crate::preprocessing::{
    FeatureSchema, FittedIterativeImputer, FittedTransformer, InputFeature, IterativeImputerParams,
    Preprocessor,
};

/// Fitted classifier and imputer, bound once after training.
///
/// The artifacts sit behind `Arc`, so cloning a context (and the
/// [`SurvivalModel`](super::SurvivalModel) that wraps it) shares them
/// instead of copying support vectors and regression steps.
#[derive(Clone, Debug)]
pub struct ModelContext {
    classifier: Arc<TrainedClassifier>,
    imputer: Arc<FittedIterativeImputer>,
    preprocessor: Preprocessor,
}

/// Serializable form of a [`ModelContext`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelContextParams {
    pub schema: Vec<InputFeature>,
    pub imputer: IterativeImputerParams,
    pub classifier: TrainedClassifierParams,
}

impl ModelContext {
    /// Binds artifacts fitted against the default passenger schema.
    pub fn new(classifier: TrainedClassifier, imputer: FittedIterativeImputer) -> Self {
        Self::with_preprocessor(classifier, imputer, Preprocessor::default())
    }

    pub fn with_preprocessor(
        classifier: TrainedClassifier,
        imputer: FittedIterativeImputer,
        preprocessor: Preprocessor,
    ) -> Self {
        Self {
            classifier: Arc::new(classifier),
            imputer: Arc::new(imputer),
            preprocessor,
        }
    }

    pub fn classifier(&self) -> &TrainedClassifier {
        &self.classifier
    }

    pub fn imputer(&self) -> &FittedIterativeImputer {
        &self.imputer
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn extract_params(&self) -> ModelContextParams {
        ModelContextParams {
            schema: self.preprocessor.schema().inputs().to_vec(),
            imputer: self.imputer.extract_params(),
            classifier: self.classifier.extract_params(),
        }
    }

    pub fn from_params(params: ModelContextParams) -> Result<Self, ModelError> {
        let schema = FeatureSchema::new(params.schema)?;
        let imputer = FittedIterativeImputer::from_params(params.imputer)?;
        let classifier = TrainedClassifier::from_params(params.classifier)?;
        let n_features = schema.n_features_out();
        if imputer.n_features_in() != n_features || classifier.n_features_in() != n_features {
            return Err(ModelError::ArtifactMismatch(format!(
                "schema has {} features, imputer {}, classifier {}",
                n_features,
                imputer.n_features_in(),
                classifier.n_features_in()
            )));
        }
        Ok(Self::with_preprocessor(
            classifier,
            imputer,
            Preprocessor::new(schema),
        ))
    }
}

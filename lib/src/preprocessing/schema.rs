//! Declared input and output layout of the preprocessor.

use serde::{Deserialize, Serialize};

use super::encoding::Category;
use super::error::PreprocessingError;

/// How one selected input column is turned into features.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FeatureKind {
    /// Passed through as a single float feature.
    Numeric,
    /// Expanded into one indicator per domain value.
    Categorical(Vec<Category>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputFeature {
    pub name: String,
    pub kind: FeatureKind,
}

impl InputFeature {
    pub fn numeric(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FeatureKind::Numeric,
        }
    }

    pub fn categorical(name: &str, domain: Vec<Category>) -> Self {
        Self {
            name: name.to_string(),
            kind: FeatureKind::Categorical(domain),
        }
    }
}

/// The fixed feature layout shared by training and inference.
///
/// Output order: numeric inputs in selection order, then one indicator
/// group per categorical input in selection order, each group in domain
/// order and named `<COLUMN>_<value>`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    inputs: Vec<InputFeature>,
    outputs: Vec<String>,
}

impl FeatureSchema {
    /// Validates the declaration and computes the output layout.
    pub fn new(inputs: Vec<InputFeature>) -> Result<Self, PreprocessingError> {
        if inputs.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "FeatureSchema needs at least one input column".to_string(),
            ));
        }
        for (i, feature) in inputs.iter().enumerate() {
            if inputs[..i].iter().any(|f| f.name == feature.name) {
                return Err(PreprocessingError::InvalidParameter(format!(
                    "Column {} declared twice",
                    feature.name
                )));
            }
            if let FeatureKind::Categorical(domain) = &feature.kind {
                if domain.is_empty() {
                    return Err(PreprocessingError::InvalidParameter(format!(
                        "Categorical column {} has an empty domain",
                        feature.name
                    )));
                }
            }
        }

        Ok(Self::from_valid(inputs))
    }

    fn from_valid(inputs: Vec<InputFeature>) -> Self {
        let mut outputs: Vec<String> = inputs
            .iter()
            .filter(|f| f.kind == FeatureKind::Numeric)
            .map(|f| f.name.clone())
            .collect();
        for feature in &inputs {
            if let FeatureKind::Categorical(domain) = &feature.kind {
                outputs.extend(domain.iter().map(|c| format!("{}_{}", feature.name, c)));
            }
        }

        Self { inputs, outputs }
    }

    /// Passenger features: `PCLASS, SEX, AGE, SIBSP, PARCH, FARE, EMBARKED`
    /// with PCLASS ∈ {1,2,3}, SEX ∈ {male, female}, EMBARKED ∈ {C,Q,S}.
    pub fn titanic() -> Self {
        Self::from_valid(vec![
            InputFeature::categorical(
                "PCLASS",
                vec![Category::Int(1), Category::Int(2), Category::Int(3)],
            ),
            InputFeature::categorical("SEX", vec!["male".into(), "female".into()]),
            InputFeature::numeric("AGE"),
            InputFeature::numeric("SIBSP"),
            InputFeature::numeric("PARCH"),
            InputFeature::numeric("FARE"),
            InputFeature::categorical("EMBARKED", vec!["C".into(), "Q".into(), "S".into()]),
        ])
    }

    pub fn inputs(&self) -> &[InputFeature] {
        &self.inputs
    }

    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(|f| f.name.as_str())
    }

    /// Output column names in matrix order.
    pub fn output_names(&self) -> &[String] {
        &self.outputs
    }

    pub fn n_features_out(&self) -> usize {
        self.outputs.len()
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::titanic()
    }
}

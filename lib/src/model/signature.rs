//! Declared input/output schema of an inference method.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::{DataType, Table};

/// One named, typed column of a signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub name: String,
    pub dtype: DataType,
}

impl FeatureSpec {
    pub fn new(name: impl Into<String>, dtype: DataType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

impl fmt::Display for FeatureSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.dtype)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSignature {
    pub inputs: Vec<FeatureSpec>,
    pub outputs: Vec<FeatureSpec>,
}

fn specs(table: &Table) -> Vec<FeatureSpec> {
    table
        .iter()
        .map(|(name, column)| FeatureSpec::new(name, column.dtype()))
        .collect()
}

/// Describes every column of `inputs` and `outputs`, in table order.
pub fn infer_signature(inputs: &Table, outputs: &Table) -> ModelSignature {
    ModelSignature {
        inputs: specs(inputs),
        outputs: specs(outputs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    #[test]
    fn test_infers_names_and_types_in_order() {
        let inputs = Table::from_columns(vec![
            ("PCLASS", Column::Int(vec![Some(1)])),
            ("NAME", Column::Text(vec![Some("Allen".into())])),
            ("FARE", Column::Float(vec![None])),
        ])
        .unwrap();
        let outputs = Table::from_columns(vec![("SURVIVED", Column::Int(vec![Some(1)]))]).unwrap();

        let sig = infer_signature(&inputs, &outputs);
        assert_eq!(
            sig.inputs,
            vec![
                FeatureSpec::new("PCLASS", DataType::Int64),
                FeatureSpec::new("NAME", DataType::String),
                FeatureSpec::new("FARE", DataType::Double),
            ]
        );
        assert_eq!(sig.outputs, vec![FeatureSpec::new("SURVIVED", DataType::Int64)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            FeatureSpec::new("AGE", DataType::Double).to_string(),
            "AGE: DOUBLE"
        );
    }

    #[test]
    fn test_json_shape() {
        let sig = ModelSignature {
            inputs: vec![FeatureSpec::new("AGE", DataType::Double)],
            outputs: vec![],
        };
        let json = serde_json::to_value(&sig).unwrap();
        assert_eq!(json["inputs"][0]["name"], "AGE");
        assert_eq!(json["inputs"][0]["dtype"], "Double");
    }
}

//! The record handed to a model registry after training.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::{ModelSignature, SurvivalModel};

/// Metric key the train score is reported under.
///
/// The value is mean accuracy; the key is kept for registry compatibility.
pub const SCORE_METRIC: &str = "r2_score";

/// Name of the inference method described by the package signature.
pub const PREDICT_METHOD: &str = "predict";

/// Fitted model plus registry metadata.
#[derive(Clone, Debug)]
pub struct ModelPackage {
    pub model: SurvivalModel,
    /// Signatures keyed by inference method name.
    pub signatures: BTreeMap<String, ModelSignature>,
    pub version_name: String,
    pub metrics: BTreeMap<String, f64>,
    pub comment: String,
    /// Whether the registry should make this version the default.
    pub set_default: bool,
}

/// `V` followed by the date as `YYYYMMDD`.
pub fn version_name(date: NaiveDate) -> String {
    date.format("V%Y%m%d").to_string()
}

impl ModelPackage {
    /// Packages a trained model with its `predict` signature and train score.
    pub fn new(model: SurvivalModel, signature: ModelSignature, score: f64, date: NaiveDate) -> Self {
        let mut signatures = BTreeMap::new();
        signatures.insert(PREDICT_METHOD.to_string(), signature);
        let mut metrics = BTreeMap::new();
        metrics.insert(SCORE_METRIC.to_string(), score);

        Self {
            model,
            signatures,
            version_name: version_name(date),
            metrics,
            comment: format!("{SCORE_METRIC}: {score}"),
            set_default: true,
        }
    }

    pub fn score(&self) -> Option<f64> {
        self.metrics.get(SCORE_METRIC).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_name_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(version_name(date), "V20240307");
    }
}

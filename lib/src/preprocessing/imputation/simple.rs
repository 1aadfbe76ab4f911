//! Simple Imputer.
//!
//! Per-column fill with mean, median, most_frequent, or a constant.
//! NaN marks a missing value. Also used as the starting point of
//! [`IterativeImputer`](super::IterativeImputer).

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};

/// Strategy for imputing missing values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputeStrategy {
    /// Replace missing values with the mean of each column.
    #[default]
    Mean,
    /// Replace missing values with the median of each column.
    Median,
    /// Replace missing values with the most frequent value of each column.
    MostFrequent,
    /// Replace missing values with a constant value.
    Constant(f64),
}

/// Serializable parameters for a fitted SimpleImputer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimpleImputerParams {
    pub strategy: ImputeStrategy,
    /// Fill value for each feature.
    pub statistics: Vec<f64>,
    pub n_features: usize,
}

/// SimpleImputer transformer (unfitted).
#[derive(Clone, Debug, Default)]
pub struct SimpleImputer {
    strategy: ImputeStrategy,
}

impl SimpleImputer {
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self { strategy }
    }
}

/// Fill value for one column, ignoring NaN. Fully missing columns get 0.0.
fn column_statistic(values: &[f64], strategy: &ImputeStrategy) -> f64 {
    if let ImputeStrategy::Constant(val) = strategy {
        return *val;
    }
    if values.is_empty() {
        return 0.0;
    }
    match strategy {
        ImputeStrategy::Mean => values.iter().sum::<f64>() / values.len() as f64,
        ImputeStrategy::Median => {
            let mut sorted = values.to_vec();
            sorted.sort_by(f64::total_cmp);
            let n = sorted.len();
            if n % 2 == 0 {
                (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
            } else {
                sorted[n / 2]
            }
        }
        ImputeStrategy::MostFrequent => {
            // Ties resolve to the smallest value.
            let mut sorted = values.to_vec();
            sorted.sort_by(f64::total_cmp);
            let mut best = sorted[0];
            let mut best_count = 0;
            let mut i = 0;
            while i < sorted.len() {
                let mut j = i;
                while j < sorted.len() && sorted[j] == sorted[i] {
                    j += 1;
                }
                if j - i > best_count {
                    best_count = j - i;
                    best = sorted[i];
                }
                i = j;
            }
            best
        }
        ImputeStrategy::Constant(val) => *val,
    }
}

impl Transformer for SimpleImputer {
    type Params = SimpleImputerParams;
    type Fitted = FittedSimpleImputer;

    fn fit(&self, data: &Array2<f64>) -> Result<Self::Fitted, PreprocessingError> {
        if data.nrows() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit SimpleImputer on empty data".to_string(),
            ));
        }

        let statistics = data
            .columns()
            .into_iter()
            .map(|col| {
                let observed: Vec<f64> = col.iter().copied().filter(|v| !v.is_nan()).collect();
                column_statistic(&observed, &self.strategy)
            })
            .collect();

        Ok(FittedSimpleImputer {
            strategy: self.strategy.clone(),
            statistics,
            n_features: data.ncols(),
        })
    }
}

/// Fitted SimpleImputer ready for inference.
#[derive(Clone, Debug)]
pub struct FittedSimpleImputer {
    strategy: ImputeStrategy,
    statistics: Vec<f64>,
    n_features: usize,
}

impl FittedSimpleImputer {
    /// Fill value for each feature.
    pub fn statistics(&self) -> &[f64] {
        &self.statistics
    }
}

impl FittedTransformer for FittedSimpleImputer {
    type Params = SimpleImputerParams;

    fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, PreprocessingError> {
        self.check_features(data)?;

        let mut out = data.clone();
        for (mut col, &fill) in out.columns_mut().into_iter().zip(&self.statistics) {
            col.mapv_inplace(|v| if v.is_nan() { fill } else { v });
        }
        Ok(out)
    }

    fn extract_params(&self) -> Self::Params {
        SimpleImputerParams {
            strategy: self.strategy.clone(),
            statistics: self.statistics.clone(),
            n_features: self.n_features,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.statistics.len() != params.n_features {
            return Err(PreprocessingError::SerializationError(format!(
                "SimpleImputer has {} statistics for {} features",
                params.statistics.len(),
                params.n_features
            )));
        }
        Ok(Self {
            strategy: params.strategy,
            statistics: params.statistics,
            n_features: params.n_features,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn data() -> Array2<f64> {
        array![
            [1.0, 10.0],
            [f64::NAN, 20.0],
            [3.0, f64::NAN],
            [3.0, 40.0],
        ]
    }

    #[test]
    fn test_mean_strategy() {
        let fitted = SimpleImputer::new(ImputeStrategy::Mean).fit(&data()).unwrap();
        let stats = fitted.statistics();
        assert!((stats[0] - 7.0 / 3.0).abs() < 1e-12);
        assert!((stats[1] - 70.0 / 3.0).abs() < 1e-12);

        let out = fitted.transform(&data()).unwrap();
        assert!((out[[1, 0]] - 7.0 / 3.0).abs() < 1e-12);
        assert_eq!(out[[0, 0]], 1.0);
    }

    #[test]
    fn test_median_strategy() {
        let fitted = SimpleImputer::new(ImputeStrategy::Median).fit(&data()).unwrap();
        assert_eq!(fitted.statistics(), &[3.0, 20.0]);
    }

    #[test]
    fn test_most_frequent_strategy() {
        let fitted = SimpleImputer::new(ImputeStrategy::MostFrequent)
            .fit(&data())
            .unwrap();
        // Column 1 has no repeats; the smallest value wins.
        assert_eq!(fitted.statistics(), &[3.0, 10.0]);
    }

    #[test]
    fn test_constant_strategy() {
        let out = SimpleImputer::new(ImputeStrategy::Constant(-1.0))
            .fit_transform(&data())
            .unwrap();
        assert_eq!(out[[1, 0]], -1.0);
        assert_eq!(out[[2, 1]], -1.0);
    }

    #[test]
    fn test_all_missing_column_filled_with_zero() {
        let d = array![[f64::NAN, 1.0], [f64::NAN, 2.0]];
        let out = SimpleImputer::default().fit_transform(&d).unwrap();
        assert_eq!(out.column(0).to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_data_rejected() {
        let d = Array2::<f64>::zeros((0, 3));
        let err = SimpleImputer::default().fit(&d).unwrap_err();
        assert!(matches!(err, PreprocessingError::EmptyData(_)));
    }

    #[test]
    fn test_feature_mismatch() {
        let fitted = SimpleImputer::default().fit(&data()).unwrap();
        let err = fitted.transform(&Array2::zeros((2, 3))).unwrap_err();
        assert!(matches!(
            err,
            PreprocessingError::FeatureMismatch {
                expected_features: 2,
                got_features: 3
            }
        ));
    }

    #[test]
    fn test_params_round_trip() {
        let fitted = SimpleImputer::new(ImputeStrategy::Median).fit(&data()).unwrap();
        let restored = FittedSimpleImputer::from_params(fitted.extract_params()).unwrap();
        assert_eq!(restored.statistics(), fitted.statistics());
        assert_eq!(restored.n_features_in(), 2);
    }
}

//! Imputation transformers for handling missing values.
//!
//! | Transformer | Description |
//! |-------------|-------------|
//! | [`SimpleImputer`] | Impute with mean, median, most_frequent, or constant |
//! | [`IterativeImputer`] | Round-robin ridge regression of each feature on the others |
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use titanic_survival::preprocessing::{FittedTransformer, IterativeImputer, Transformer};
//!
//! let data = array![[1.0, 3.0], [2.0, 5.0], [3.0, f64::NAN], [4.0, 9.0]];
//! let fitted = IterativeImputer::new().fit(&data).unwrap();
//! let imputed = fitted.transform(&data).unwrap();
//! assert!(imputed.iter().all(|v| v.is_finite()));
//! ```

mod iterative;
mod ridge;
mod simple;

pub use iterative::{
    FittedIterativeImputer, IterativeImputer, IterativeImputerParams, RegressionStep,
};
pub use simple::{FittedSimpleImputer, ImputeStrategy, SimpleImputer, SimpleImputerParams};

//! Feature preprocessing: table encoding and missing value imputation.
//!
//! # Design
//!
//! - **Declared layout**: [`Preprocessor`] turns a [`Table`](crate::table::Table)
//!   into a [`FeatureMatrix`] whose columns are fixed by a [`FeatureSchema`],
//!   never by the values seen in a batch. Training and inference share it.
//! - **Fitted/unfitted split**: imputers follow the [`Transformer`] →
//!   [`FittedTransformer`] pattern. Fitted state is immutable and
//!   round-trips through a serializable parameter struct.
//!
//! # Example
//!
//! ```
//! use titanic_survival::preprocessing::{
//!     FittedTransformer, IterativeImputer, Preprocessor, Transformer,
//! };
//! use titanic_survival::table::{Column, Table};
//!
//! let table = Table::from_columns(vec![
//!     ("PCLASS", Column::Int(vec![Some(1), Some(3), Some(2)])),
//!     ("SEX", Column::Text(vec![Some("female".into()), Some("male".into()), Some("male".into())])),
//!     ("AGE", Column::Float(vec![Some(29.0), None, Some(40.0)])),
//!     ("SIBSP", Column::Int(vec![Some(0), Some(1), Some(0)])),
//!     ("PARCH", Column::Int(vec![Some(0), Some(0), Some(1)])),
//!     ("FARE", Column::Float(vec![Some(211.3), Some(7.9), Some(13.0)])),
//!     ("EMBARKED", Column::Text(vec![Some("S".into()), Some("Q".into()), None])),
//! ])
//! .unwrap();
//!
//! let features = Preprocessor::default().transform(&table).unwrap();
//! assert_eq!(features.n_features(), 12);
//!
//! let imputer = IterativeImputer::new().fit(&features.values).unwrap();
//! let filled = imputer.transform(&features.values).unwrap();
//! assert!(filled.iter().all(|v| v.is_finite()));
//! ```

pub mod encoding;
pub mod error;
pub mod imputation;
pub mod preprocessor;
pub mod schema;
pub mod traits;

pub use encoding::{Category, OneHotEncoder};
pub use error::PreprocessingError;
pub use imputation::{
    FittedIterativeImputer, FittedSimpleImputer, ImputeStrategy, IterativeImputer,
    IterativeImputerParams, RegressionStep, SimpleImputer, SimpleImputerParams,
};
pub use preprocessor::{FeatureMatrix, Preprocessor};
pub use schema::{FeatureKind, FeatureSchema, InputFeature};
pub use traits::{FittedTransformer, Transformer};

//! # titanic-survival
//!
//! A custom model transformation for a data-build pipeline: it trains a
//! passenger survival classifier from a named table and hands the result,
//! wrapped in an inference interface, to a model registry.
//!
//! ## Core Design Principles
//!
//! - **Declared feature layout**: categorical columns are one-hot encoded
//!   against fixed domains in an order fixed by a
//!   [`FeatureSchema`](preprocessing::FeatureSchema), so training and
//!   inference always see the same columns.
//! - **Training/Inference Separation**: imputers and classifiers have an
//!   unfitted type holding hyperparameters and a fitted type holding only
//!   what prediction needs. Fitted artifacts are immutable and shared.
//! - **Plain-data persistence**: every fitted artifact round-trips through a
//!   serializable parameter struct (bincode).
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use titanic_survival::table::{Column, Table};
//! use titanic_survival::training::{train_table, TrainOptions};
//!
//! let text = |v: &[&str]| Column::Text(v.iter().map(|s| Some(s.to_string())).collect());
//! let ints = |v: &[i64]| Column::Int(v.iter().map(|&x| Some(x)).collect());
//!
//! let table = Table::from_columns(vec![
//!     ("PCLASS", ints(&[1, 3, 2, 3])),
//!     ("SEX", text(&["female", "male", "female", "male"])),
//!     ("AGE", Column::Float(vec![Some(38.0), None, Some(26.0), Some(35.0)])),
//!     ("SIBSP", ints(&[1, 0, 0, 0])),
//!     ("PARCH", ints(&[0, 0, 0, 0])),
//!     ("FARE", Column::Float(vec![Some(71.3), Some(8.05), Some(7.9), Some(8.05)])),
//!     ("EMBARKED", text(&["C", "S", "S", "S"])),
//!     ("SURVIVED", ints(&[1, 0, 1, 0])),
//! ])
//! .unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let package = train_table(&table, &TrainOptions::default(), date).unwrap();
//! assert_eq!(package.version_name, "V20240101");
//!
//! let predictions = package.model.predict(&table).unwrap();
//! assert_eq!(predictions.n_rows(), 4);
//! ```
//!
//! ## Module Structure
//!
//! - `table` — typed in-memory tables, CSV I/O and named table sources
//! - `preprocessing` — feature encoding and missing value imputation
//! - `classifier` — binary classifiers (SVC, logistic regression)
//! - `model` — inference wrapper, signatures and model packages
//! - `registry` — model version storage
//! - `training` — the training entry point
//! - `config`, `logging`, `cli` — the command line tool

/// Command line interface.
pub mod cli;

/// Binary classifiers with a fit/predict split.
pub mod classifier;

/// Model configuration loaded from TOML.
pub mod config;

/// Crate-level error type.
pub mod error;

/// Logging setup for the command line tool.
pub mod logging;

/// Inference wrapper, signatures and model packages.
pub mod model;

/// Feature preprocessing transformers.
pub mod preprocessing;

/// Model version storage.
pub mod registry;

/// Parameter persistence.
pub mod serialization;

/// Typed in-memory tables.
pub mod table;

/// The training entry point.
pub mod training;

pub use error::{Error, Result};
pub use model::{ModelPackage, SurvivalModel};
pub use training::{train, train_table, TrainOptions};

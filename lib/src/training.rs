//! The training entry point.
//!
//! Strictly sequential: resolve the table, encode, impute, fit, score and
//! package. Any failure aborts the run; there is no retry or partial result.

use chrono::{Local, NaiveDate};
use ndarray::Array1;
use tracing::info;

use crate::classifier::{ClassifierKind, FittedClassifier, TrainedClassifier};
use crate::config::ModelConfig;
use crate::error::Result;
use crate::model::{infer_signature, ModelContext, ModelPackage, SurvivalModel};
use crate::preprocessing::{
    FeatureSchema, FittedTransformer, IterativeImputer, Preprocessor, Transformer,
};
use crate::table::{Cell, SchemaError, Table, TableSource};

/// Everything training needs besides the data itself.
#[derive(Clone, Debug)]
pub struct TrainOptions {
    pub label: String,
    pub schema: FeatureSchema,
    pub imputer: IterativeImputer,
    pub classifier: ClassifierKind,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            label: "SURVIVED".to_string(),
            schema: FeatureSchema::titanic(),
            imputer: IterativeImputer::default(),
            classifier: ClassifierKind::default(),
        }
    }
}

impl From<&ModelConfig> for TrainOptions {
    fn from(config: &ModelConfig) -> Self {
        Self {
            label: config.label.clone(),
            schema: FeatureSchema::titanic(),
            imputer: config.imputer.clone(),
            classifier: config.classifier.clone(),
        }
    }
}

/// Resolves the configured table through `source` and trains on it.
///
/// The version name uses today's local date.
pub fn train(config: &ModelConfig, source: &dyn TableSource) -> Result<ModelPackage> {
    let table = source.resolve(&config.source.table)?;
    info!(
        table = %config.source.table,
        rows = table.n_rows(),
        columns = table.n_columns(),
        "Loaded training table"
    );
    train_table(&table, &TrainOptions::from(config), Local::now().date_naive())
}

/// Trains on an already loaded table; `date` fixes the version name.
pub fn train_table(table: &Table, options: &TrainOptions, date: NaiveDate) -> Result<ModelPackage> {
    let preprocessor = Preprocessor::new(options.schema.clone());
    let features = preprocessor.transform(table)?;
    let y = label_vector(table, &options.label)?;
    info!(
        rows = features.n_rows(),
        features = features.n_features(),
        "Encoded features"
    );

    let imputer = options.imputer.fit(&features.values)?;
    let x = imputer.transform(&features.values)?;
    info!(
        rounds = imputer.n_iter(),
        regressions = imputer.steps().len(),
        "Fitted imputer"
    );

    let classifier = options.classifier.fit(&x, &y)?;
    match &classifier {
        TrainedClassifier::Svc(svc) => {
            info!(support_vectors = svc.n_support(), gamma = svc.gamma(), "Fitted SVC")
        }
        TrainedClassifier::Logistic(_) => info!("Fitted logistic regression"),
    }

    let score = classifier.score(&x, &y)?;
    info!(score, "Training accuracy");

    let model = SurvivalModel::new(ModelContext::with_preprocessor(
        classifier,
        imputer,
        preprocessor,
    ));
    let signature = infer_signature(
        &table.drop_column(&options.label)?,
        &table.select(&[options.label.as_str()])?,
    );
    let package = ModelPackage::new(model, signature, score, date);
    info!(version = %package.version_name, "Built model package");
    Ok(package)
}

/// Reads the label column as integral values.
fn label_vector(table: &Table, label: &str) -> std::result::Result<Array1<f64>, SchemaError> {
    let column = table.column(label)?;
    let mismatch = || SchemaError::TypeMismatch {
        column: label.to_string(),
        expected: "INT64",
        found: column.dtype(),
    };
    (0..table.n_rows())
        .map(|row| match column.cell(row) {
            Cell::Int(v) => Ok(v as f64),
            Cell::Float(v) if v.fract() == 0.0 && v.is_finite() => Ok(v),
            Cell::Float(_) | Cell::Text(_) => Err(mismatch()),
            Cell::Missing => Err(SchemaError::MissingLabel {
                column: label.to_string(),
                row,
            }),
        })
        .collect()
}

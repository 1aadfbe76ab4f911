//! The inference wrapper handed to the registry.

use tracing::debug;

use super::{ModelContext, ModelError};
use crate::classifier::FittedClassifier;
use crate::preprocessing::FittedTransformer;
use crate::table::{Column, Table};

/// Name of the single column returned by [`SurvivalModel::predict`].
pub const OUTPUT_COLUMN: &str = "output";

/// Survival predictor over passenger tables.
///
/// Reapplies the preprocessing used at training time, fills missing values
/// with the already fitted imputer (never refitting it) and classifies.
/// Cloning is cheap and the model is `Send + Sync`.
#[derive(Clone, Debug)]
pub struct SurvivalModel {
    context: ModelContext,
}

impl SurvivalModel {
    pub fn new(context: ModelContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &ModelContext {
        &self.context
    }

    /// Predicts one label per input row.
    ///
    /// Returns a table with a single integer column named `output`. Columns
    /// not used by the model are ignored; a missing required column fails
    /// with [`SchemaError::MissingColumn`](crate::table::SchemaError::MissingColumn).
    pub fn predict(&self, input: &Table) -> Result<Table, ModelError> {
        let features = self.context.preprocessor().transform(input)?;
        let imputed = self.context.imputer().transform(&features.values)?;
        let labels = self.context.classifier().predict(&imputed)?;
        debug!(rows = labels.len(), "Predicted survival");

        let output = labels.iter().map(|&label| Some(label as i64)).collect();
        Ok(Table::from_columns(vec![(OUTPUT_COLUMN, Column::Int(output))])?)
    }
}

//! Table → feature matrix conversion.

use ndarray::{s, Array2};

use super::encoding::OneHotEncoder;
use super::error::PreprocessingError;
use super::schema::{FeatureKind, FeatureSchema};
use crate::table::Table;

/// An encoded feature matrix together with its column names.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureMatrix {
    pub columns: Vec<String>,
    pub values: Array2<f64>,
}

impl FeatureMatrix {
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.values.ncols()
    }
}

/// Selects the declared input columns and one-hot encodes the categorical ones.
///
/// Stateless: the same table always yields the same matrix, and the column
/// layout is [`FeatureSchema::output_names`] regardless of the data. Columns
/// not named by the schema are ignored. Missing numeric cells become NaN for
/// the imputer to fill; missing or out-of-domain categorical cells yield an
/// all-zero indicator group.
#[derive(Clone, Debug, Default)]
pub struct Preprocessor {
    schema: FeatureSchema,
}

impl Preprocessor {
    pub fn new(schema: FeatureSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn transform(&self, table: &Table) -> Result<FeatureMatrix, PreprocessingError> {
        // Report the first absent column before doing any work.
        for name in self.schema.input_names() {
            table.column(name)?;
        }

        let rows = table.n_rows();
        let mut values = Array2::<f64>::zeros((rows, self.schema.n_features_out()));

        let n_numeric = self
            .schema
            .inputs()
            .iter()
            .filter(|f| f.kind == FeatureKind::Numeric)
            .count();
        let mut numeric_col = 0;
        let mut indicator_col = n_numeric;

        for feature in self.schema.inputs() {
            let column = table.column(&feature.name)?;
            match &feature.kind {
                FeatureKind::Numeric => {
                    let numbers = column.to_f64(&feature.name)?;
                    for (row, v) in numbers.into_iter().enumerate() {
                        values[[row, numeric_col]] = v;
                    }
                    numeric_col += 1;
                }
                FeatureKind::Categorical(domain) => {
                    let block = OneHotEncoder::new(domain.clone()).encode(column);
                    let width = block.ncols();
                    values
                        .slice_mut(s![.., indicator_col..indicator_col + width])
                        .assign(&block);
                    indicator_col += width;
                }
            }
        }

        Ok(FeatureMatrix {
            columns: self.schema.output_names().to_vec(),
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, SchemaError};

    fn passengers() -> Table {
        Table::from_columns(vec![
            ("NAME", Column::Text(vec![Some("a".into()), Some("b".into())])),
            ("PCLASS", Column::Int(vec![Some(1), Some(3)])),
            (
                "SEX",
                Column::Text(vec![Some("female".into()), Some("male".into())]),
            ),
            ("AGE", Column::Float(vec![Some(29.0), None])),
            ("SIBSP", Column::Int(vec![Some(0), Some(1)])),
            ("PARCH", Column::Int(vec![Some(0), Some(2)])),
            ("FARE", Column::Float(vec![Some(211.3375), Some(20.25)])),
            ("EMBARKED", Column::Text(vec![Some("S".into()), Some("X".into())])),
            ("SURVIVED", Column::Int(vec![Some(1), Some(0)])),
        ])
        .unwrap()
    }

    #[test]
    fn test_transform_layout() {
        let matrix = Preprocessor::default().transform(&passengers()).unwrap();
        assert_eq!(matrix.values.dim(), (2, 12));
        assert_eq!(matrix.columns, FeatureSchema::titanic().output_names());

        let row0 = matrix.values.row(0).to_vec();
        assert_eq!(
            row0,
            vec![29.0, 0.0, 0.0, 211.3375, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_missing_numeric_becomes_nan() {
        let matrix = Preprocessor::default().transform(&passengers()).unwrap();
        assert!(matrix.values[[1, 0]].is_nan());
    }

    #[test]
    fn test_out_of_domain_gives_all_zero_group() {
        let matrix = Preprocessor::default().transform(&passengers()).unwrap();
        let embarked: Vec<f64> = matrix.values.slice(s![1, 9..12]).to_vec();
        assert_eq!(embarked, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_same_input_same_columns_and_values() {
        let pre = Preprocessor::default();
        let a = pre.transform(&passengers()).unwrap();
        let b = pre.transform(&passengers()).unwrap();
        assert_eq!(a.columns, b.columns);
        // NaN != NaN, so compare bitwise.
        let bits = |m: &FeatureMatrix| m.values.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_column_order_in_table_does_not_matter() {
        let table = passengers();
        let mut names: Vec<&str> = table.column_names().collect();
        names.reverse();
        let shuffled = table.select(&names).unwrap();

        let pre = Preprocessor::default();
        let a = pre.transform(&table).unwrap();
        let b = pre.transform(&shuffled).unwrap();
        assert_eq!(a.values.row(0), b.values.row(0));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let table = passengers().drop_column("FARE").unwrap();
        let err = Preprocessor::default().transform(&table).unwrap_err();
        assert!(matches!(
            err,
            PreprocessingError::Schema(SchemaError::MissingColumn { ref name }) if name == "FARE"
        ));
    }

    #[test]
    fn test_text_in_numeric_column_is_schema_error() {
        let table = passengers()
            .drop_column("AGE")
            .and_then(|mut t| {
                t.push_column("AGE", Column::Text(vec![Some("old".into()), None]))?;
                Ok(t)
            })
            .unwrap();
        let err = Preprocessor::default().transform(&table).unwrap_err();
        assert!(matches!(
            err,
            PreprocessingError::Schema(SchemaError::TypeMismatch { .. })
        ));
    }
}

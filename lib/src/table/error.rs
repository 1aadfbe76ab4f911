//! Error types for table construction, lookup and loading.

use std::path::PathBuf;

use super::DataType;

/// Shape and schema violations detected while reading a table.
///
/// These are the "data-shape" failures surfaced unmodified to callers of
/// training and inference.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A required column is absent.
    #[error("Missing column: {name}")]
    MissingColumn { name: String },
    /// A column holds values of an unexpected type.
    #[error("Type mismatch in column {column}: expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: DataType,
    },
    /// A column's length differs from the table's row count.
    #[error("Column {column} has {got} rows, table has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },
    /// A column name was added twice.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
    /// The label column has a missing cell.
    #[error("Missing label in column {column} at row {row}")]
    MissingLabel { column: String, row: usize },
}

/// Errors raised while loading or resolving tables.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// The table reference could not be resolved by the source.
    #[error("Unknown table {name} (looked in {location})")]
    UnknownTable { name: String, location: PathBuf },
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_display() {
        let err = SchemaError::MissingColumn {
            name: "AGE".to_string(),
        };
        assert_eq!(err.to_string(), "Missing column: AGE");
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = SchemaError::TypeMismatch {
            column: "FARE".to_string(),
            expected: "numeric",
            found: DataType::String,
        };
        assert!(err.to_string().contains("expected numeric"));
        assert!(err.to_string().contains("STRING"));
    }

    #[test]
    fn test_table_error_from_schema() {
        let err: TableError = SchemaError::DuplicateColumn("SEX".to_string()).into();
        assert!(matches!(err, TableError::Schema(_)));
    }
}

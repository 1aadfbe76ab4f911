//! Column-oriented in-memory tables.
//!
//! A [`Table`] is the unit exchanged with the surrounding pipeline: the
//! training entry point receives one from a [`TableSource`], and the
//! inference wrapper accepts and returns one. Columns are typed and carry
//! explicit missingness (`None`), so a missing `AGE` is distinguishable from
//! an age of zero.
//!
//! # Example
//!
//! ```
//! use titanic_survival::table::{Column, Table};
//!
//! let table = Table::from_columns(vec![
//!     ("PCLASS", Column::Int(vec![Some(1), Some(3)])),
//!     ("SEX", Column::Text(vec![Some("female".into()), None])),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.n_rows(), 2);
//! assert!(table.column("SEX").unwrap().is_missing(1));
//! ```

mod error;
mod io;
mod source;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use error::{SchemaError, TableError};
pub use source::{CsvDirectorySource, InMemorySource, TableSource};

/// Logical type of a column, as reported in model signatures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Int64,
    Double,
    String,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Int64 => "INT64",
            DataType::Double => "DOUBLE",
            DataType::String => "STRING",
        };
        f.write_str(name)
    }
}

/// A single typed column with optional cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

/// Borrowed view of one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell<'a> {
    Int(i64),
    Float(f64),
    Text(&'a str),
    Missing,
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DataType {
        match self {
            Column::Int(_) => DataType::Int64,
            Column::Float(_) => DataType::Double,
            Column::Text(_) => DataType::String,
        }
    }

    /// Returns the cell at `row`. Panics if `row` is out of bounds.
    pub fn cell(&self, row: usize) -> Cell<'_> {
        match self {
            Column::Int(v) => v[row].map_or(Cell::Missing, Cell::Int),
            Column::Float(v) => match v[row] {
                Some(x) if !x.is_nan() => Cell::Float(x),
                _ => Cell::Missing,
            },
            Column::Text(v) => v[row].as_deref().map_or(Cell::Missing, Cell::Text),
        }
    }

    pub fn is_missing(&self, row: usize) -> bool {
        matches!(self.cell(row), Cell::Missing)
    }

    pub fn missing_count(&self) -> usize {
        (0..self.len()).filter(|&row| self.is_missing(row)).count()
    }

    /// Numeric view of the column with missing cells as NaN.
    ///
    /// Text columns are rejected; `name` is only used for the error.
    pub fn to_f64(&self, name: &str) -> Result<Vec<f64>, SchemaError> {
        match self {
            Column::Int(v) => Ok(v.iter().map(|x| x.map_or(f64::NAN, |x| x as f64)).collect()),
            Column::Float(v) => Ok(v.iter().map(|x| x.unwrap_or(f64::NAN)).collect()),
            Column::Text(_) => Err(SchemaError::TypeMismatch {
                column: name.to_string(),
                expected: "numeric",
                found: DataType::String,
            }),
        }
    }
}

/// An ordered collection of equally long, uniquely named columns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Creates an empty table with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(name, column)` pairs, validating lengths and names.
    pub fn from_columns<S: Into<String>>(
        columns: impl IntoIterator<Item = (S, Column)>,
    ) -> Result<Self, SchemaError> {
        let mut table = Self::new();
        for (name, column) in columns {
            table.push_column(name, column)?;
        }
        Ok(table)
    }

    /// Appends a column. The first column fixes the row count.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<(), SchemaError> {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(SchemaError::DuplicateColumn(name));
        }
        if self.columns.is_empty() {
            self.n_rows = column.len();
        } else if column.len() != self.n_rows {
            return Err(SchemaError::LengthMismatch {
                column: name,
                expected: self.n_rows,
                got: column.len(),
            });
        }
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }

    pub fn get(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| &self.columns[idx])
    }

    /// Looks up a column, failing with [`SchemaError::MissingColumn`].
    pub fn column(&self, name: &str) -> Result<&Column, SchemaError> {
        self.get(name).ok_or_else(|| SchemaError::MissingColumn {
            name: name.to_string(),
        })
    }

    /// Projects the table onto `names`, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<Table, SchemaError> {
        let mut out = Table::new();
        for &name in names {
            out.push_column(name, self.column(name)?.clone())?;
        }
        out.n_rows = self.n_rows;
        Ok(out)
    }

    /// Returns a copy of the table without `name`.
    pub fn drop_column(&self, name: &str) -> Result<Table, SchemaError> {
        self.column(name)?;
        let mut out = Table::new();
        for (n, column) in self.iter().filter(|(n, _)| *n != name) {
            out.push_column(n, column.clone())?;
        }
        out.n_rows = self.n_rows;
        Ok(out)
    }
}

//! Resolution of named table references.

use std::collections::HashMap;
use std::path::PathBuf;

use super::{Table, TableError};

/// Resolves a table reference (e.g. `"titanic3"`) to its full contents.
///
/// This is the seam where an external pipeline runner plugs in; the
/// training entry point only ever sees a name.
pub trait TableSource {
    fn resolve(&self, name: &str) -> Result<Table, TableError>;
}

/// Resolves `name` to `<root>/<name>.csv`.
#[derive(Clone, Debug)]
pub struct CsvDirectorySource {
    root: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TableSource for CsvDirectorySource {
    fn resolve(&self, name: &str) -> Result<Table, TableError> {
        let path = self.root.join(format!("{name}.csv"));
        if !path.is_file() {
            return Err(TableError::UnknownTable {
                name: name.to_string(),
                location: self.root.clone(),
            });
        }
        tracing::debug!("Resolving table {name} from {}", path.display());
        Table::read_csv(path)
    }
}

/// Tables held in memory, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    tables: HashMap<String, Table>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: impl Into<String>, table: Table) -> Self {
        self.tables.insert(name.into(), table);
        self
    }
}

impl TableSource for InMemorySource {
    fn resolve(&self, name: &str) -> Result<Table, TableError> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| TableError::UnknownTable {
                name: name.to_string(),
                location: PathBuf::from("<memory>"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    #[test]
    fn test_csv_directory_source_resolves_by_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("titanic3.csv"), "A,B\n1,x\n2,y\n").unwrap();

        let source = CsvDirectorySource::new(dir.path());
        let table = source.resolve("titanic3").unwrap();
        assert_eq!(table.n_rows(), 2);

        let err = source.resolve("missing").unwrap_err();
        assert!(matches!(err, TableError::UnknownTable { .. }));
    }

    #[test]
    fn test_in_memory_source() {
        let table = Table::from_columns(vec![("A", Column::Int(vec![Some(1)]))]).unwrap();
        let source = InMemorySource::new().with_table("t", table.clone());
        assert_eq!(source.resolve("t").unwrap(), table);
        assert!(source.resolve("u").is_err());
    }
}

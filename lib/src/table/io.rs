//! CSV reading and writing with per-column type inference.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use super::{Cell, Column, Table, TableError};

/// Cell spellings treated as missing when reading CSV.
const NA_VALUES: &[&str] = &["", "NA", "N/A", "NaN", "nan", "NULL", "null", "None"];

fn is_na(raw: &str) -> bool {
    NA_VALUES.contains(&raw.trim())
}

/// Infers the narrowest column type that fits every non-missing cell:
/// integer, then float, then text.
fn infer_column(raw: Vec<String>) -> Column {
    let present = || raw.iter().map(|s| s.trim()).filter(|s| !is_na(s));

    if present().all(|s| s.parse::<i64>().is_ok()) {
        return Column::Int(
            raw.iter()
                .map(|s| if is_na(s) { None } else { s.trim().parse().ok() })
                .collect(),
        );
    }
    if present().all(|s| s.parse::<f64>().is_ok()) {
        return Column::Float(
            raw.iter()
                .map(|s| if is_na(s) { None } else { s.trim().parse().ok() })
                .collect(),
        );
    }
    Column::Text(
        raw.into_iter()
            .map(|s| if is_na(&s) { None } else { Some(s) })
            .collect(),
    )
}

impl Table {
    /// Reads a headed CSV file.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Table, TableError> {
        let file = File::open(path)?;
        Self::read_csv_from(BufReader::new(file))
    }

    /// Reads headed CSV from any reader. Rows must all have the header's width.
    pub fn read_csv_from<R: Read>(reader: R) -> Result<Table, TableError> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in rdr.records() {
            let record = record?;
            for (col, value) in record.iter().enumerate() {
                raw[col].push(value.to_string());
            }
        }

        let columns = headers
            .into_iter()
            .zip(raw)
            .map(|(name, values)| (name, infer_column(values)));
        Ok(Table::from_columns(columns)?)
    }

    /// Writes the table as headed CSV; missing cells are written empty.
    pub fn write_csv_to<W: Write>(&self, writer: W) -> Result<(), TableError> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        wtr.write_record(self.column_names())?;

        for row in 0..self.n_rows() {
            let record: Vec<String> = self
                .iter()
                .map(|(_, column)| match column.cell(row) {
                    Cell::Int(v) => v.to_string(),
                    Cell::Float(v) => v.to_string(),
                    Cell::Text(v) => v.to_string(),
                    Cell::Missing => String::new(),
                })
                .collect();
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        self.write_csv_to(File::create(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::DataType;

    const CSV: &str = "\
PCLASS,SURVIVED,NAME,SEX,AGE,SIBSP,PARCH,FARE,EMBARKED
1,1,Allen,female,29,0,0,211.3375,S
1,0,Allison,male,,1,2,151.55,
3,0,Abbott,male,0.9167,1,1,20.25,NA
";

    #[test]
    fn test_read_csv_infers_types() {
        let table = Table::read_csv_from(CSV.as_bytes()).unwrap();
        assert_eq!(table.n_rows(), 3);
        assert_eq!(table.column("PCLASS").unwrap().dtype(), DataType::Int64);
        assert_eq!(table.column("AGE").unwrap().dtype(), DataType::Double);
        assert_eq!(table.column("FARE").unwrap().dtype(), DataType::Double);
        assert_eq!(table.column("SEX").unwrap().dtype(), DataType::String);
    }

    #[test]
    fn test_read_csv_missing_cells() {
        let table = Table::read_csv_from(CSV.as_bytes()).unwrap();
        assert!(table.column("AGE").unwrap().is_missing(1));
        let embarked = table.column("EMBARKED").unwrap();
        assert_eq!(embarked.cell(0), Cell::Text("S"));
        assert!(embarked.is_missing(1));
        assert!(embarked.is_missing(2));
    }

    #[test]
    fn test_ragged_rows_fail() {
        let ragged = "A,B\n1,2\n3\n";
        let err = Table::read_csv_from(ragged.as_bytes()).unwrap_err();
        assert!(matches!(err, TableError::Csv(_)));
    }

    #[test]
    fn test_write_then_read_preserves_values() {
        let table = Table::read_csv_from(CSV.as_bytes()).unwrap();
        let mut buf = Vec::new();
        table.write_csv_to(&mut buf).unwrap();
        let reread = Table::read_csv_from(buf.as_slice()).unwrap();
        assert_eq!(reread, table);
    }
}

//! Reading employee records from the CSV input table.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::error::BadgeError;
use crate::model::EmployeeRecord;

/// Columns every input table must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = ["name", "title", "photo_filename"];

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(default)]
    name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    photo_filename: String,
}

impl From<Row> for EmployeeRecord {
    fn from(row: Row) -> Self {
        EmployeeRecord::new(row.name, row.title, row.photo_filename)
    }
}

/// Parses records from any CSV source with a header row.
///
/// Columns may appear in any order and extra columns are ignored; a missing
/// required column is reported before any row is read.
pub fn parse_records<R: io::Read>(reader: R) -> Result<Vec<EmployeeRecord>, BadgeError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header.trim() == column) {
            return Err(BadgeError::MissingColumn { column });
        }
    }
    let trimmed: csv::StringRecord = headers.iter().map(str::trim).collect();
    reader.set_headers(trimmed);

    reader
        .deserialize::<Row>()
        .map(|row| row.map(EmployeeRecord::from).map_err(BadgeError::from))
        .collect()
}

/// Reads the table at `path`.
///
/// Returns `Ok(None)` when the file does not exist so the caller can report it
/// and stop without treating it as a failure.
pub fn read_records(path: impl AsRef<Path>) -> Result<Option<Vec<EmployeeRecord>>, BadgeError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Ok(None);
    }
    let file = File::open(path).map_err(|err| BadgeError::io(path, err))?;
    parse_records(file).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_trimmed_and_ordered() {
        let input = "name,title,photo_filename\n Jane Doe ,Engineer,jane.png\nBob, Ops ,\n";
        let records = parse_records(input.as_bytes()).expect("parse");
        assert_eq!(
            records,
            vec![
                EmployeeRecord::new("Jane Doe", "Engineer", "jane.png"),
                EmployeeRecord::new("Bob", "Ops", ""),
            ]
        );
    }

    #[test]
    fn column_order_and_extra_columns_are_ignored() {
        let input = "photo_filename,id,title,name\nj.png,7,CFO,Jo\n";
        let records = parse_records(input.as_bytes()).expect("parse");
        assert_eq!(records, vec![EmployeeRecord::new("Jo", "CFO", "j.png")]);
    }

    #[test]
    fn missing_column_is_reported() {
        let input = "name,title\nJo,CFO\n";
        let err = parse_records(input.as_bytes()).expect_err("missing column");
        assert!(matches!(
            err,
            BadgeError::MissingColumn {
                column: "photo_filename"
            }
        ));
    }

    #[test]
    fn header_only_table_has_no_records() {
        let records = parse_records("name,title,photo_filename\n".as_bytes()).expect("parse");
        assert!(records.is_empty());
    }

    #[test]
    fn absent_file_is_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let outcome = read_records(dir.path().join("employee.csv")).expect("no error");
        assert!(outcome.is_none());
    }
}

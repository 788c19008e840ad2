//! CSV schema source
//!
//! Reads the two tables from separate CSV files, typically the workbook's
//! "Salesforce Entities" and "Detailed Attribute List" sheets exported as CSV.

use std::path::{Path, PathBuf};
use crate::source::{LoadError, SchemaSource};
use crate::table::{Cell, RawTable, RawTables, ATTRIBUTES_TABLE, ENTITIES_TABLE};

/// Schema source backed by two CSV files
#[derive(Debug, Clone)]
pub struct CsvSource {
    entities_path: PathBuf,
    attributes_path: PathBuf,
}

impl CsvSource {
    /// Create a source from the Entities and Attributes CSV paths
    pub fn new(entities_path: impl Into<PathBuf>, attributes_path: impl Into<PathBuf>) -> Self {
        Self {
            entities_path: entities_path.into(),
            attributes_path: attributes_path.into(),
        }
    }
}

impl SchemaSource for CsvSource {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn read_raw(&self) -> Result<RawTables, LoadError> {
        Ok(RawTables {
            entities: read_csv(&self.entities_path, ENTITIES_TABLE)?,
            attributes: read_csv(&self.attributes_path, ATTRIBUTES_TABLE)?,
        })
    }
}

fn read_csv(path: &Path, table_name: &str) -> Result<RawTable, LoadError> {
    let file = std::fs::File::open(path)
        .map_err(|e| LoadError::IoError(path.display().to_string(), e.to_string()))?;

    // Spreadsheet exports drop trailing empty cells, so rows may be short
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| LoadError::CsvError(path.display().to_string(), e.to_string()))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut table = RawTable::new(table_name, headers);

    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            LoadError::CsvError(path.display().to_string(), format!("row {}: {}", idx + 1, e))
        })?;
        table.push_row(record.iter().map(Cell::text).collect());
    }

    tracing::debug!(
        path = %path.display(),
        table = table_name,
        rows = table.rows.len(),
        "Read CSV table"
    );

    Ok(table)
}

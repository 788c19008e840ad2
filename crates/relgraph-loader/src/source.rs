//! Schema source trait

use relgraph_core::{ColumnAliases, SchemaTables};
use crate::table::{read_tables, RawTables};

/// Errors that can occur while loading schema tables
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {0}: {1}")]
    IoError(String, String),

    #[error("Failed to parse CSV {0}: {1}")]
    CsvError(String, String),

    #[error("Failed to parse JSON {0}: {1}")]
    JsonError(String, String),

    #[error("Required table '{0}' not found")]
    MissingTable(String),

    #[error("Required column '{column}' not found in {table} table (found: {found})")]
    MissingColumn {
        table: String,
        column: String,
        found: String,
    },

    #[error("Invalid {0} table: {1}")]
    InvalidShape(String, String),
}

impl LoadError {
    /// Whether the error is a structural problem with the input
    /// (missing table or column) rather than an I/O or syntax failure
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::MissingTable(_) | Self::MissingColumn { .. })
    }
}

/// Trait for anything that can supply the two schema tables
pub trait SchemaSource {
    /// Get the source name (e.g., "csv", "json")
    fn name(&self) -> &'static str;

    /// Read both tables as untyped rows
    fn read_raw(&self) -> Result<RawTables, LoadError>;

    /// Read both tables and convert them to typed records
    ///
    /// Fails before producing any records when a required column is absent.
    fn load(&self, aliases: &ColumnAliases) -> Result<SchemaTables, LoadError> {
        let raw = self.read_raw()?;
        let tables = read_tables(&raw, aliases)?;

        tracing::info!(
            source = self.name(),
            entities = tables.entities.len(),
            attributes = tables.attributes.len(),
            diagnostics = tables.diagnostics.len(),
            "Loaded schema tables"
        );

        Ok(tables)
    }
}

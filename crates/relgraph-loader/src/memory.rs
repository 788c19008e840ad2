//! In-memory schema source
//!
//! Builds the two tables in code, with the standard headers. Useful for
//! unit tests and for embedding the graph builder without touching disk.
//!
//! ```rust,ignore
//! let tables = InMemorySource::new()
//!     .with_entity("Account", "Top")
//!     .with_attribute("Contact", "AccountId", "Lookup", "Account")
//!     .load(&ColumnAliases::default())?;
//! ```

use crate::source::{LoadError, SchemaSource};
use crate::table::{
    Cell, RawTable, RawTables, ATTRIBUTES_TABLE, DATA_TYPE, DESCRIPTION, ENTITIES_TABLE, FIELD_NAME,
    OBJECT, RELATIONSHIP,
};

/// Schema source holding its tables in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemorySource {
    tables: RawTables,
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySource {
    /// Create empty tables with the standard headers
    pub fn new() -> Self {
        let headers = |names: &[&str]| -> Vec<String> { names.iter().map(|s| s.to_string()).collect() };

        Self {
            tables: RawTables {
                entities: RawTable::new(ENTITIES_TABLE, headers(&[OBJECT, DESCRIPTION])),
                attributes: RawTable::new(
                    ATTRIBUTES_TABLE,
                    headers(&[OBJECT, FIELD_NAME, DATA_TYPE, RELATIONSHIP]),
                ),
            },
        }
    }

    /// Create a source from prebuilt tables (custom headers or cells)
    pub fn from_tables(tables: RawTables) -> Self {
        Self { tables }
    }

    /// Add an Entities row
    pub fn with_entity(mut self, name: &str, description: &str) -> Self {
        self.tables
            .entities
            .push_row(vec![Cell::text(name), Cell::text(description)]);
        self
    }

    /// Add an Attributes row; pass `""` as `refers_to` for a plain attribute
    pub fn with_attribute(mut self, owner: &str, field_name: &str, data_type: &str, refers_to: &str) -> Self {
        self.tables.attributes.push_row(vec![
            Cell::text(owner),
            Cell::text(field_name),
            Cell::text(data_type),
            Cell::text(refers_to),
        ]);
        self
    }
}

impl SchemaSource for InMemorySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn read_raw(&self) -> Result<RawTables, LoadError> {
        Ok(self.tables.clone())
    }
}

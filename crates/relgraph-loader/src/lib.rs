//! Schema table loading
//!
//! This crate handles:
//! - Reading the Entities and Attributes tables from CSV, JSON or memory
//! - Resolving column headers (including aliases) to typed record fields
//! - Rejecting inputs that lack a required column
//! - Substituting empty strings for missing or malformed cells

pub mod table;
pub mod source;
pub mod csv_source;
pub mod json_source;
pub mod memory;

pub use table::{Cell, RawTable, RawTables, read_tables, ENTITIES_TABLE, ATTRIBUTES_TABLE};
pub use source::{SchemaSource, LoadError};
pub use csv_source::CsvSource;
pub use json_source::JsonSource;
pub use memory::InMemorySource;

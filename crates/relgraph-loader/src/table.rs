//! Untyped tables and their conversion to typed records
//!
//! Column names exist only in this module; everything downstream works on
//! [`EntityRecord`] and [`AttributeRecord`].

use relgraph_core::{
    AttributeRecord, ColumnAliases, Diagnostic, DiagnosticCode, EntityRecord, Location, SchemaTables,
};
use crate::source::LoadError;

pub const ENTITIES_TABLE: &str = "Entities";
pub const ATTRIBUTES_TABLE: &str = "Attributes";

pub const OBJECT: &str = "Object";
pub const DESCRIPTION: &str = "Description";
pub const FIELD_NAME: &str = "Field Name";
pub const DATA_TYPE: &str = "Data Type";
pub const RELATIONSHIP: &str = "Relationship/RefersTo";

/// A single table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Non-empty text
    Text(String),

    /// Empty or absent cell
    Empty,

    /// A value that is not text (number, boolean, nested value), with its kind
    Unsupported(&'static str),
}

impl Cell {
    /// Build a cell from text, mapping the empty string to [`Cell::Empty`]
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }
}

/// A table as read from a source: headers plus rows of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Table name used in messages
    pub name: String,

    /// Header names
    pub headers: Vec<String>,

    /// Data rows; short rows are padded with [`Cell::Empty`] on read
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Create an empty table with the given headers
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Index of a column, trying the expected name first and then each alias
    fn column_index(&self, column: &str, aliases: &[String]) -> Result<usize, LoadError> {
        std::iter::once(column)
            .chain(aliases.iter().map(String::as_str))
            .find_map(|name| self.headers.iter().position(|h| h == name))
            .ok_or_else(|| LoadError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
                found: self.headers.join(", "),
            })
    }
}

/// The Entities and Attributes tables together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTables {
    pub entities: RawTable,
    pub attributes: RawTable,
}

/// Cell reader that records a diagnostic for every substituted value
struct CellReader<'a> {
    table: &'a str,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> CellReader<'a> {
    fn new(table: &'a str) -> Self {
        Self {
            table,
            diagnostics: Vec::new(),
        }
    }

    /// Text of a cell, or an empty string
    ///
    /// `report_empty` controls whether an empty cell is a data-quality
    /// finding; unsupported values are always reported.
    fn text(
        &mut self,
        row: &[Cell],
        index: usize,
        row_number: usize,
        column: &str,
        report_empty: bool,
    ) -> String {
        match row.get(index).unwrap_or(&Cell::Empty) {
            Cell::Text(value) => value.clone(),
            Cell::Empty => {
                if report_empty {
                    self.push(
                        DiagnosticCode::DataMissingValue,
                        format!("Empty '{}' replaced with an empty string", column),
                        row_number,
                        column,
                    );
                }
                String::new()
            }
            Cell::Unsupported(kind) => {
                self.push(
                    DiagnosticCode::DataCoercedValue,
                    format!("Unexpected {} in '{}' replaced with an empty string", kind, column),
                    row_number,
                    column,
                );
                String::new()
            }
        }
    }

    fn push(&mut self, code: DiagnosticCode, message: String, row_number: usize, column: &str) {
        let diagnostic = Diagnostic::new(code, message)
            .with_location(Location::cell(self.table, row_number, column));

        match code {
            DiagnosticCode::DataCoercedValue => tracing::warn!("{}", diagnostic),
            _ => tracing::debug!("{}", diagnostic),
        }

        self.diagnostics.push(diagnostic);
    }

    /// Tag diagnostics recorded since `from` with the row's entity
    fn tag_entity(&mut self, from: usize, entity: &str) {
        if entity.is_empty() {
            return;
        }
        for diagnostic in &mut self.diagnostics[from..] {
            diagnostic.entity = Some(entity.to_string());
        }
    }
}

struct EntityColumns {
    object: usize,
    description: usize,
}

struct AttributeColumns {
    object: usize,
    field_name: usize,
    data_type: usize,
    relationship: usize,
}

fn entity_columns(table: &RawTable, aliases: &ColumnAliases) -> Result<EntityColumns, LoadError> {
    Ok(EntityColumns {
        object: table.column_index(OBJECT, &aliases.object)?,
        description: table.column_index(DESCRIPTION, &aliases.description)?,
    })
}

fn attribute_columns(table: &RawTable, aliases: &ColumnAliases) -> Result<AttributeColumns, LoadError> {
    Ok(AttributeColumns {
        object: table.column_index(OBJECT, &aliases.object)?,
        field_name: table.column_index(FIELD_NAME, &aliases.field_name)?,
        data_type: table.column_index(DATA_TYPE, &aliases.data_type)?,
        relationship: table.column_index(RELATIONSHIP, &aliases.relationship)?,
    })
}

fn read_entities(
    table: &RawTable,
    columns: &EntityColumns,
    reader: &mut CellReader<'_>,
) -> Vec<EntityRecord> {
    table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let row_number = idx + 1;
            let first_diagnostic = reader.diagnostics.len();

            let name = reader.text(row, columns.object, row_number, OBJECT, true);
            let description = reader.text(row, columns.description, row_number, DESCRIPTION, true);
            reader.tag_entity(first_diagnostic, &name);

            EntityRecord::new(name, description)
        })
        .collect()
}

fn read_attributes(
    table: &RawTable,
    columns: &AttributeColumns,
    reader: &mut CellReader<'_>,
) -> Vec<AttributeRecord> {
    table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let row_number = idx + 1;
            let first_diagnostic = reader.diagnostics.len();

            let owner = reader.text(row, columns.object, row_number, OBJECT, true);
            let field_name = reader.text(row, columns.field_name, row_number, FIELD_NAME, true);
            let data_type = reader.text(row, columns.data_type, row_number, DATA_TYPE, true);
            // Most attributes are not relationships, so an empty cell is expected here
            let refers_to = reader.text(row, columns.relationship, row_number, RELATIONSHIP, false);
            reader.tag_entity(first_diagnostic, &owner);

            AttributeRecord::with_raw_targets(owner, field_name, data_type, &refers_to)
        })
        .collect()
}

/// Convert both raw tables to typed schema tables
///
/// Every required column of both tables is checked before any row is read.
pub fn read_tables(raw: &RawTables, aliases: &ColumnAliases) -> Result<SchemaTables, LoadError> {
    let entity_cols = entity_columns(&raw.entities, aliases)?;
    let attribute_cols = attribute_columns(&raw.attributes, aliases)?;

    let mut entity_reader = CellReader::new(ENTITIES_TABLE);
    let entities = read_entities(&raw.entities, &entity_cols, &mut entity_reader);

    let mut attribute_reader = CellReader::new(ATTRIBUTES_TABLE);
    let attributes = read_attributes(&raw.attributes, &attribute_cols, &mut attribute_reader);

    let mut diagnostics = entity_reader.diagnostics;
    diagnostics.extend(attribute_reader.diagnostics);

    tracing::debug!(
        entities = entities.len(),
        attributes = attributes.len(),
        relationships = attributes.iter().filter(|a| a.is_relationship()).count(),
        "Converted raw tables"
    );

    Ok(SchemaTables::new(entities, attributes).with_diagnostics(diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn text_row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Cell::text(*c)).collect()
    }

    fn standard_tables() -> RawTables {
        let mut entities = RawTable::new(ENTITIES_TABLE, headers(&[OBJECT, DESCRIPTION]));
        entities.push_row(text_row(&["Account", "Top"]));
        entities.push_row(text_row(&["Contact", ""]));

        let mut attributes = RawTable::new(
            ATTRIBUTES_TABLE,
            headers(&[OBJECT, FIELD_NAME, DATA_TYPE, RELATIONSHIP]),
        );
        attributes.push_row(text_row(&["Account", "Name", "Text", ""]));
        attributes.push_row(text_row(&["Contact", "AccountId", "Lookup", " Account "]));

        RawTables { entities, attributes }
    }

    #[test]
    fn converts_rows_to_records() {
        let tables = read_tables(&standard_tables(), &ColumnAliases::default()).unwrap();

        assert_eq!(
            tables.entities,
            vec![EntityRecord::new("Account", "Top"), EntityRecord::new("Contact", "")]
        );
        assert_eq!(
            tables.attributes,
            vec![
                AttributeRecord::plain("Account", "Name", "Text"),
                AttributeRecord::with_raw_targets("Contact", "AccountId", "Lookup", "Account"),
            ]
        );
        assert_eq!(tables.attributes[1].relationship_targets, vec!["Account"]);
    }

    #[test]
    fn empty_relationship_cell_is_not_reported() {
        let tables = read_tables(&standard_tables(), &ColumnAliases::default()).unwrap();

        // Only the empty Contact description is a finding
        assert_eq!(tables.diagnostics.len(), 1);
        let diag = &tables.diagnostics[0];
        assert_eq!(diag.code, DiagnosticCode::DataMissingValue);
        assert_eq!(diag.entity.as_deref(), Some("Contact"));
        assert_eq!(diag.location, Some(Location::cell(ENTITIES_TABLE, 2, DESCRIPTION)));
    }

    #[test]
    fn description_alias_is_accepted() {
        let mut raw = standard_tables();
        raw.entities.headers = headers(&[OBJECT, "Unnamed: 7"]);

        let tables = read_tables(&raw, &ColumnAliases::default()).unwrap();
        assert_eq!(tables.description_of("Account"), "Top");
    }

    #[test]
    fn exact_header_wins_over_alias() {
        let mut raw = standard_tables();
        raw.entities.headers = headers(&["Unnamed: 7", OBJECT, DESCRIPTION]);
        raw.entities.rows = vec![text_row(&["ignored", "Account", "Top"])];

        let tables = read_tables(&raw, &ColumnAliases::default()).unwrap();
        assert_eq!(tables.description_of("Account"), "Top");
    }

    #[test]
    fn missing_column_is_fatal() {
        let mut raw = standard_tables();
        raw.attributes.headers = headers(&[OBJECT, FIELD_NAME, RELATIONSHIP]);

        let err = read_tables(&raw, &ColumnAliases::default()).unwrap_err();
        assert!(err.is_configuration_error());
        match err {
            LoadError::MissingColumn { table, column, .. } => {
                assert_eq!(table, ATTRIBUTES_TABLE);
                assert_eq!(column, DATA_TYPE);
            }
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn unsupported_cells_are_coerced() {
        let mut raw = standard_tables();
        raw.attributes.rows = vec![vec![
            Cell::text("Task"),
            Cell::text("WhatId"),
            Cell::Unsupported("number"),
            Cell::Unsupported("boolean"),
        ]];

        let tables = read_tables(&raw, &ColumnAliases::default()).unwrap();
        let attr = &tables.attributes[0];
        assert_eq!(attr.data_type, "");
        assert!(!attr.is_relationship());

        let coerced: Vec<_> = tables
            .diagnostics
            .iter()
            .filter(|d| d.code == DiagnosticCode::DataCoercedValue)
            .collect();
        assert_eq!(coerced.len(), 2);
        assert!(coerced.iter().all(|d| d.entity.as_deref() == Some("Task")));
    }

    #[test]
    fn short_rows_are_padded() {
        let mut raw = standard_tables();
        raw.attributes.rows = vec![text_row(&["Account", "Website"])];

        let tables = read_tables(&raw, &ColumnAliases::default()).unwrap();
        assert_eq!(tables.attributes[0], AttributeRecord::plain("Account", "Website", ""));
    }
}

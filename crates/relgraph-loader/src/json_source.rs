//! JSON schema source
//!
//! Expects a document with one array of row objects per table:
//!
//! ```json
//! {
//!   "entities":   [ {"Object": "Account", "Description": "Top"} ],
//!   "attributes": [ {"Object": "Contact", "Field Name": "AccountId",
//!                    "Data Type": "Lookup", "Relationship/RefersTo": "Account"} ]
//! }
//! ```
//!
//! Columns are the union of keys over all rows of a table, so a table with
//! no rows has no columns and fails the required-column check.

use serde_json::Value;
use std::path::PathBuf;
use crate::source::{LoadError, SchemaSource};
use crate::table::{Cell, RawTable, RawTables, ATTRIBUTES_TABLE, ENTITIES_TABLE};

#[derive(Debug, Clone)]
enum JsonOrigin {
    File(PathBuf),
    Inline(String),
}

/// Schema source backed by a JSON document
#[derive(Debug, Clone)]
pub struct JsonSource {
    origin: JsonOrigin,
}

impl JsonSource {
    /// Read the document from a file
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: JsonOrigin::File(path.into()),
        }
    }

    /// Use an in-memory document
    pub fn from_json(json: impl Into<String>) -> Self {
        Self {
            origin: JsonOrigin::Inline(json.into()),
        }
    }

    fn origin_name(&self) -> String {
        match &self.origin {
            JsonOrigin::File(path) => path.display().to_string(),
            JsonOrigin::Inline(_) => "<inline>".to_string(),
        }
    }

    fn contents(&self) -> Result<String, LoadError> {
        match &self.origin {
            JsonOrigin::File(path) => std::fs::read_to_string(path)
                .map_err(|e| LoadError::IoError(path.display().to_string(), e.to_string())),
            JsonOrigin::Inline(json) => Ok(json.clone()),
        }
    }
}

impl SchemaSource for JsonSource {
    fn name(&self) -> &'static str {
        "json"
    }

    fn read_raw(&self) -> Result<RawTables, LoadError> {
        let contents = self.contents()?;
        let document: Value = serde_json::from_str(&contents)
            .map_err(|e| LoadError::JsonError(self.origin_name(), e.to_string()))?;

        Ok(RawTables {
            entities: table_from_value(&document, "entities", ENTITIES_TABLE)?,
            attributes: table_from_value(&document, "attributes", ATTRIBUTES_TABLE)?,
        })
    }
}

fn table_from_value(document: &Value, key: &str, table_name: &str) -> Result<RawTable, LoadError> {
    let rows = document
        .get(key)
        .ok_or_else(|| LoadError::MissingTable(key.to_string()))?
        .as_array()
        .ok_or_else(|| LoadError::InvalidShape(table_name.to_string(), "expected an array of rows".to_string()))?;

    let mut objects = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let object = row.as_object().ok_or_else(|| {
            LoadError::InvalidShape(table_name.to_string(), format!("row {} is not an object", idx + 1))
        })?;
        objects.push(object);
    }

    let mut headers: Vec<String> = Vec::new();
    for object in &objects {
        for key in object.keys() {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
        }
    }

    let mut table = RawTable::new(table_name, headers);
    for object in objects {
        let row = table
            .headers
            .iter()
            .map(|h| object.get(h).map(cell_from_value).unwrap_or(Cell::Empty))
            .collect();
        table.push_row(row);
    }

    Ok(table)
}

fn cell_from_value(value: &Value) -> Cell {
    match value {
        Value::String(s) => Cell::text(s.as_str()),
        Value::Null => Cell::Empty,
        Value::Bool(_) => Cell::Unsupported("boolean"),
        Value::Number(_) => Cell::Unsupported("number"),
        Value::Array(_) => Cell::Unsupported("array"),
        Value::Object(_) => Cell::Unsupported("object"),
    }
}

//! Schema records loaded from the Entities and Attributes tables

use serde::{Deserialize, Serialize};
use crate::diagnostic::Diagnostic;

/// Parse a raw relationship cell into its target entity names.
///
/// Splits on `,`, trims whitespace around each token, drops empty tokens
/// and keeps the original order. `"Account, Contact,, Lead "` yields
/// `["Account", "Contact", "Lead"]`; an empty or blank cell yields `[]`.
pub fn parse_relationship_targets(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// A row of the Entities table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Entity name (unique key)
    pub name: String,

    /// Free-form description, empty when absent
    #[serde(default)]
    pub description: String,
}

impl EntityRecord {
    /// Create a new entity record
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A row of the Attributes table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeRecord {
    /// Entity that owns the field
    pub owner_entity: String,

    /// Field name
    pub field_name: String,

    /// Declared data type (free text, e.g. "Lookup")
    pub data_type: String,

    /// Parsed relationship targets, empty for plain attributes
    #[serde(default)]
    pub relationship_targets: Vec<String>,
}

impl AttributeRecord {
    /// Create a plain (non-relationship) attribute
    pub fn plain(
        owner_entity: impl Into<String>,
        field_name: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            owner_entity: owner_entity.into(),
            field_name: field_name.into(),
            data_type: data_type.into(),
            relationship_targets: Vec::new(),
        }
    }

    /// Create an attribute from a raw relationship cell
    ///
    /// The cell is parsed with [`parse_relationship_targets`], so a blank
    /// cell produces a plain attribute.
    pub fn with_raw_targets(
        owner_entity: impl Into<String>,
        field_name: impl Into<String>,
        data_type: impl Into<String>,
        raw_targets: &str,
    ) -> Self {
        Self {
            relationship_targets: parse_relationship_targets(raw_targets),
            ..Self::plain(owner_entity, field_name, data_type)
        }
    }

    /// Whether this row encodes a relationship
    pub fn is_relationship(&self) -> bool {
        !self.relationship_targets.is_empty()
    }
}

/// The two input tables, typed, in input row order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaTables {
    /// Entities table rows
    pub entities: Vec<EntityRecord>,

    /// Attributes table rows
    pub attributes: Vec<AttributeRecord>,

    /// Data-quality findings collected while loading
    pub diagnostics: Vec<Diagnostic>,
}

impl SchemaTables {
    /// Create tables from typed rows
    pub fn new(entities: Vec<EntityRecord>, attributes: Vec<AttributeRecord>) -> Self {
        Self {
            entities,
            attributes,
            diagnostics: Vec::new(),
        }
    }

    /// Attach load-time diagnostics
    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Find an entity by name
    ///
    /// When a name is listed more than once the last row wins.
    pub fn entity(&self, name: &str) -> Option<&EntityRecord> {
        self.entities.iter().rev().find(|e| e.name == name)
    }

    /// Description of an entity, empty for unknown entities
    pub fn description_of(&self, name: &str) -> &str {
        self.entity(name).map(|e| e.description.as_str()).unwrap_or("")
    }

    /// All attributes owned by an entity, in row order
    pub fn attributes_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a AttributeRecord> + 'a {
        self.attributes.iter().filter(move |a| a.owner_entity == name)
    }

    /// Distinct entity names from the Entities table, in first-seen order
    pub fn entity_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.entities
            .iter()
            .map(|e| e.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

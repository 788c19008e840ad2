//! relgraph Core
//!
//! Core domain model: schema records, the relationship graph, and the
//! stable React Flow output document.
//! Never rename diagnostic codes or output keys - the front end depends on them.

pub mod diagnostic;
pub mod model;
pub mod graph;
pub mod flow;
pub mod config;

pub use diagnostic::{Diagnostic, DiagnosticCode, Severity, Location};
pub use model::{EntityRecord, AttributeRecord, SchemaTables, parse_relationship_targets};
pub use graph::{Direction, Position, PlaceholderLayout, NodeAttribute, GraphNode, GraphEdge, RelationshipEdge, RelationshipGraph};
pub use flow::{FlowDocument, FlowStyle, FlowError};
pub use config::{Config, ConfigError, InputConfig, ColumnAliases};

//! Relationship resolution and graph construction
//!
//! This crate handles:
//! - Classifying attributes as outgoing or incoming relationships of a focal entity
//! - Building the deduplicated node and edge sets
//! - Summarising a run for the operator

pub mod resolver;
pub mod builder;
pub mod summary;

pub use resolver::{RelationshipResolver, ResolvedRelationships, references};
pub use builder::{GraphBuilder, GraphBuild};
pub use summary::{RunSummary, generate_markdown};

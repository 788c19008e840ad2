//! Graph construction
//!
//! Builds the node and edge sets of one focal entity in a single pass.
//! Every intermediate collection is local to [`GraphBuilder::build`]; the
//! returned graph is never mutated afterwards.

use std::collections::HashSet;
use relgraph_core::{
    Diagnostic, DiagnosticCode, GraphEdge, GraphNode, NodeAttribute, PlaceholderLayout,
    RelationshipEdge, RelationshipGraph, SchemaTables,
};
use crate::resolver::{RelationshipResolver, ResolvedRelationships};

/// Result of a build: the graph plus lookup findings
#[derive(Debug, Clone, PartialEq)]
pub struct GraphBuild {
    /// The focal entity's relationship graph
    pub graph: RelationshipGraph,

    /// Nodes whose entity is missing from the Entities table
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds relationship graphs from schema tables
#[derive(Debug, Clone)]
pub struct GraphBuilder<'a> {
    tables: &'a SchemaTables,
    layout: PlaceholderLayout,
}

impl<'a> GraphBuilder<'a> {
    /// Create a builder with the default placeholder layout
    pub fn new(tables: &'a SchemaTables) -> Self {
        Self {
            tables,
            layout: PlaceholderLayout::default(),
        }
    }

    /// Set the placeholder layout
    pub fn with_layout(mut self, layout: PlaceholderLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Build the graph rooted at `focal_entity`
    ///
    /// The focal entity is always a node, even when it has no relationships
    /// or is absent from both tables.
    pub fn build(&self, focal_entity: &str) -> GraphBuild {
        let resolved = RelationshipResolver::resolve(&self.tables.attributes, focal_entity);

        let names = node_names(&resolved);
        let (nodes, diagnostics) = self.build_nodes(&names, focal_entity);
        let edges = build_edges(&resolved.assertions());

        tracing::info!(
            focal = focal_entity,
            nodes = nodes.len(),
            edges = edges.len(),
            lookup_misses = diagnostics.len(),
            "Built relationship graph"
        );

        GraphBuild {
            graph: RelationshipGraph {
                focal_entity: focal_entity.to_string(),
                nodes,
                edges,
            },
            diagnostics,
        }
    }

    fn build_nodes(&self, names: &[&str], focal_entity: &str) -> (Vec<GraphNode>, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();

        let nodes = names
            .iter()
            .map(|&name| {
                if self.tables.entity(name).is_none() {
                    tracing::debug!(entity = name, "Entity not found in Entities table");
                    diagnostics.push(
                        Diagnostic::new(
                            DiagnosticCode::LookupMiss,
                            format!("Entity '{}' is not listed in the Entities table", name),
                        )
                        .with_entity(name),
                    );
                }

                GraphNode {
                    id: name.to_string(),
                    label: name.to_string(),
                    description: self.tables.description_of(name).to_string(),
                    attributes: self
                        .tables
                        .attributes_of(name)
                        .map(|a| NodeAttribute {
                            field_name: a.field_name.clone(),
                            data_type: a.data_type.clone(),
                        })
                        .collect(),
                    position: self.layout.position_for(name == focal_entity),
                }
            })
            .collect();

        (nodes, diagnostics)
    }
}

/// Focal entity, then outgoing targets, then incoming owners, deduplicated
fn node_names<'a>(resolved: &ResolvedRelationships<'a>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    std::iter::once(resolved.focal_entity)
        .chain(resolved.outgoing_targets())
        .chain(resolved.incoming_sources())
        .filter(|name| seen.insert(*name))
        .collect()
}

/// One edge per assertion, numbered from zero
fn build_edges(assertions: &[RelationshipEdge]) -> Vec<GraphEdge> {
    assertions
        .iter()
        .enumerate()
        .map(|(index, relationship)| GraphEdge::from_relationship(index, relationship))
        .collect()
}

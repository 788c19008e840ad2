//! Run summary and markdown rendering

use serde::{Deserialize, Serialize};
use relgraph_core::{Diagnostic, RelationshipGraph, Severity};

/// Counts reported to the operator at the end of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Entity the graph is rooted at
    pub focal_entity: String,

    /// Number of nodes
    pub nodes: usize,

    /// Number of edges
    pub edges: usize,

    /// Number of outgoing edges
    pub outgoing_edges: usize,

    /// Number of incoming edges
    pub incoming_edges: usize,

    /// Number of warn-level diagnostics
    pub warnings: usize,

    /// Number of info-level diagnostics
    pub info: usize,
}

impl RunSummary {
    /// Summarise a graph and the diagnostics gathered while producing it
    pub fn new(graph: &RelationshipGraph, diagnostics: &[Diagnostic]) -> Self {
        Self {
            focal_entity: graph.focal_entity.clone(),
            nodes: graph.nodes.len(),
            edges: graph.edges.len(),
            outgoing_edges: graph.outgoing().count(),
            incoming_edges: graph.incoming().count(),
            warnings: diagnostics.iter().filter(|d| d.severity == Severity::Warn).count(),
            info: diagnostics.iter().filter(|d| d.severity == Severity::Info).count(),
        }
    }

    /// One-line completion message
    pub fn message(&self) -> String {
        format!("Generated {} nodes and {} edges.", self.nodes, self.edges)
    }
}

/// Generate a markdown report of a run
pub fn generate_markdown(graph: &RelationshipGraph, summary: &RunSummary, diagnostics: &[Diagnostic]) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Relationship Graph: {}\n\n", summary.focal_entity));

    md.push_str("## Summary\n\n");
    md.push_str(&format!("- Nodes: {}\n", summary.nodes));
    md.push_str(&format!(
        "- Edges: {} ({} outgoing, {} incoming)\n",
        summary.edges, summary.outgoing_edges, summary.incoming_edges
    ));
    md.push_str(&format!("- Warnings: {}\n", summary.warnings));
    md.push_str(&format!("- Info: {}\n", summary.info));
    md.push('\n');

    md.push_str("## Entities\n\n");
    md.push_str("| Entity | Attributes | Description |\n");
    md.push_str("|---|---|---|\n");
    for node in &graph.nodes {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            escape_cell(&node.id),
            node.attributes.len(),
            escape_cell(&node.description)
        ));
    }
    md.push('\n');

    md.push_str("## Relationships\n\n");
    if graph.edges.is_empty() {
        md.push_str("_No relationships._\n\n");
    } else {
        md.push_str("| Id | Direction | Source | Target | Field | Map |\n");
        md.push_str("|---|---|---|---|---|---|\n");
        for edge in &graph.edges {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | `{}` |\n",
                edge.id,
                edge.relationship_type,
                escape_cell(&edge.source),
                escape_cell(&edge.target),
                escape_cell(&edge.label),
                edge.map
            ));
        }
        md.push('\n');
    }

    if !diagnostics.is_empty() {
        md.push_str("## Diagnostics\n\n");
        for diag in diagnostics {
            md.push_str(&format!("- **{}** `{}`: {}", diag.severity, diag.code, diag.message));
            if let Some(location) = &diag.location {
                md.push_str(&format!(" ({})", location));
            }
            md.push('\n');
        }
    }

    md
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use relgraph_core::{AttributeRecord, DiagnosticCode, EntityRecord, SchemaTables};

    fn sample_tables() -> SchemaTables {
        SchemaTables::new(
            vec![
                EntityRecord::new("Account", "Top | level"),
                EntityRecord::new("Contact", "Person"),
            ],
            vec![
                AttributeRecord::with_raw_targets("Account", "PrimaryContact", "Lookup", "Contact"),
                AttributeRecord::with_raw_targets("Contact", "AccountId", "Lookup", "Account"),
                AttributeRecord::with_raw_targets("Account", "OwnerId", "Lookup", "User"),
            ],
        )
    }

    #[test]
    fn summary_counts() {
        let tables = sample_tables();
        let build = GraphBuilder::new(&tables).build("Account");
        let summary = RunSummary::new(&build.graph, &build.diagnostics);

        assert_eq!(summary.nodes, 3);
        assert_eq!(summary.edges, 3);
        assert_eq!(summary.outgoing_edges, 2);
        assert_eq!(summary.incoming_edges, 1);
        assert_eq!(summary.info, 1);
        assert_eq!(summary.warnings, 0);
        assert_eq!(summary.message(), "Generated 3 nodes and 3 edges.");
    }

    #[test]
    fn markdown_lists_entities_edges_and_diagnostics() {
        let tables = sample_tables();
        let build = GraphBuilder::new(&tables).build("Account");
        let summary = RunSummary::new(&build.graph, &build.diagnostics);

        let md = generate_markdown(&build.graph, &summary, &build.diagnostics);

        assert!(md.starts_with("# Relationship Graph: Account\n"));
        assert!(md.contains("| Account | 2 | Top \\| level |"));
        assert!(md.contains("| e1 | Outgoing | Account | User | OwnerId | `Account.OwnerId -> User.Id` |"));
        assert!(md.contains("| e2 | Incoming | Contact | Account | AccountId |"));
        assert!(md.contains(DiagnosticCode::LookupMiss.as_str()));
    }

    #[test]
    fn markdown_for_isolated_entity() {
        let tables = SchemaTables::new(vec![EntityRecord::new("Account", "")], Vec::new());
        let build = GraphBuilder::new(&tables).build("Account");
        let summary = RunSummary::new(&build.graph, &build.diagnostics);

        let md = generate_markdown(&build.graph, &summary, &build.diagnostics);
        assert!(md.contains("_No relationships._"));
        assert!(!md.contains("## Diagnostics"));
    }
}

//! React Flow output document (stable v1)
//!
//! This shape is read directly by the visualization front end.
//! Key names (including "Field Name" / "Data Type") must not change.

use serde::{Deserialize, Serialize};
use crate::graph::{Direction, GraphEdge, GraphNode, Position, RelationshipGraph};

/// Presentation settings applied when rendering a graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStyle {
    /// React Flow node type
    #[serde(default = "default_node_type")]
    pub node_type: String,

    /// Whether edges are animated
    #[serde(default = "default_true")]
    pub animated: bool,

    /// Stroke color of outgoing edges
    #[serde(default = "default_outgoing_stroke")]
    pub outgoing_stroke: String,

    /// Stroke color of incoming edges
    #[serde(default = "default_incoming_stroke")]
    pub incoming_stroke: String,
}

fn default_node_type() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_outgoing_stroke() -> String {
    "#333".to_string()
}

fn default_incoming_stroke() -> String {
    "#007bff".to_string()
}

impl Default for FlowStyle {
    fn default() -> Self {
        Self {
            node_type: default_node_type(),
            animated: default_true(),
            outgoing_stroke: default_outgoing_stroke(),
            incoming_stroke: default_incoming_stroke(),
        }
    }
}

impl FlowStyle {
    /// Stroke color for an edge direction
    pub fn stroke_for(&self, direction: Direction) -> &str {
        match direction {
            Direction::Outgoing => &self.outgoing_stroke,
            Direction::Incoming => &self.incoming_stroke,
        }
    }
}

/// Attribute row displayed inside a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowAttribute {
    #[serde(rename = "Field Name")]
    pub field_name: String,

    #[serde(rename = "Data Type")]
    pub data_type: String,
}

/// Node payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNodeData {
    pub label: String,
    pub description: String,
    pub attributes: Vec<FlowAttribute>,
}

/// React Flow node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,

    #[serde(rename = "type")]
    pub node_type: String,

    pub data: FlowNodeData,

    pub position: Position,
}

/// Edge stroke
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdgeStyle {
    pub stroke: String,
}

/// Edge payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdgeData {
    #[serde(rename = "relationshipType")]
    pub relationship_type: Direction,

    pub map: String,
}

/// React Flow edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    pub animated: bool,
    pub style: FlowEdgeStyle,
    pub data: FlowEdgeData,
}

/// Complete output document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowDocument {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowDocument {
    /// Render a relationship graph
    pub fn from_graph(graph: &RelationshipGraph, style: &FlowStyle) -> Self {
        Self {
            nodes: graph.nodes.iter().map(|n| flow_node(n, style)).collect(),
            edges: graph.edges.iter().map(|e| flow_edge(e, style)).collect(),
        }
    }

    /// Parse a document from JSON
    pub fn from_json(json: &str) -> Result<Self, FlowError> {
        serde_json::from_str(json).map_err(|e| FlowError::ParseError(e.to_string()))
    }

    /// Serialize to a JSON string indented with four spaces
    pub fn to_json(&self) -> Result<String, FlowError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| FlowError::SerializeError(e.to_string()))?;

        String::from_utf8(buf).map_err(|e| FlowError::SerializeError(e.to_string()))
    }

    /// Save to file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), FlowError> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(|e| FlowError::IoError(path.display().to_string(), e.to_string()))
    }
}

fn flow_node(node: &GraphNode, style: &FlowStyle) -> FlowNode {
    FlowNode {
        id: node.id.clone(),
        node_type: style.node_type.clone(),
        data: FlowNodeData {
            label: node.label.clone(),
            description: node.description.clone(),
            attributes: node
                .attributes
                .iter()
                .map(|a| FlowAttribute {
                    field_name: a.field_name.clone(),
                    data_type: a.data_type.clone(),
                })
                .collect(),
        },
        position: node.position,
    }
}

fn flow_edge(edge: &GraphEdge, style: &FlowStyle) -> FlowEdge {
    FlowEdge {
        id: edge.id.clone(),
        source: edge.source.clone(),
        target: edge.target.clone(),
        label: edge.label.clone(),
        animated: style.animated,
        style: FlowEdgeStyle {
            stroke: style.stroke_for(edge.relationship_type).to_string(),
        },
        data: FlowEdgeData {
            relationship_type: edge.relationship_type,
            map: edge.map.clone(),
        },
    }
}

/// Output document errors
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Failed to serialize graph document: {0}")]
    SerializeError(String),

    #[error("Failed to parse graph document: {0}")]
    ParseError(String),

    #[error("Failed to write {0}: {1}")]
    IoError(String, String),
}

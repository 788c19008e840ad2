//! Relationship graph types
//!
//! A [`RelationshipGraph`] is the focal entity's neighbourhood: one node per
//! distinct entity and one directed edge per relationship assertion.

use serde::{Deserialize, Serialize};

/// Edge direction relative to the focal entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Field owned by the focal entity pointing elsewhere
    Outgoing,

    /// Field owned by another entity pointing at the focal entity
    Incoming,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outgoing => write!(f, "Outgoing"),
            Self::Incoming => write!(f, "Incoming"),
        }
    }
}

/// Canvas coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Placeholder positions: one for the focal node, one shared by all others
///
/// Real layout is left to the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderLayout {
    /// Position of the focal node
    #[serde(default = "default_focal_position")]
    pub focal: Position,

    /// Position shared by every other node
    #[serde(default)]
    pub other: Position,
}

fn default_focal_position() -> Position {
    Position::new(250, 250)
}

impl Default for PlaceholderLayout {
    fn default() -> Self {
        Self {
            focal: default_focal_position(),
            other: Position::default(),
        }
    }
}

impl PlaceholderLayout {
    /// Position for a node
    pub fn position_for(&self, is_focal: bool) -> Position {
        if is_focal {
            self.focal
        } else {
            self.other
        }
    }
}

/// A single relationship assertion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipEdge {
    /// Entity owning the field
    pub source_entity: String,

    /// Entity the field points at
    pub target_entity: String,

    /// Field carrying the reference
    pub via_field: String,

    /// Direction relative to the focal entity
    pub direction: Direction,
}

impl RelationshipEdge {
    /// Attribute-map hint, e.g. `Contact.AccountId -> Account.Id`
    pub fn map_hint(&self) -> String {
        format!("{}.{} -> {}.Id", self.source_entity, self.via_field, self.target_entity)
    }
}

/// Field name and data type shown inside a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeAttribute {
    pub field_name: String,
    pub data_type: String,
}

/// A graph node (one per entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Entity name
    pub id: String,

    /// Display label (the entity name)
    pub label: String,

    /// Entity description, empty when unknown
    pub description: String,

    /// The entity's own attributes, in row order
    pub attributes: Vec<NodeAttribute>,

    /// Placeholder position
    pub position: Position,
}

/// A directed graph edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Sequential id, `e<N>`
    pub id: String,

    /// Source entity
    pub source: String,

    /// Target entity
    pub target: String,

    /// Field name creating the relationship
    pub label: String,

    /// Direction relative to the focal entity
    pub relationship_type: Direction,

    /// Attribute-map hint
    pub map: String,
}

impl GraphEdge {
    /// Create the `index`-th edge of a run from a relationship assertion
    pub fn from_relationship(index: usize, relationship: &RelationshipEdge) -> Self {
        Self {
            id: format!("e{}", index),
            source: relationship.source_entity.clone(),
            target: relationship.target_entity.clone(),
            label: relationship.via_field.clone(),
            relationship_type: relationship.direction,
            map: relationship.map_hint(),
        }
    }
}

/// The focal entity's relationship graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipGraph {
    /// Entity the graph is rooted at
    pub focal_entity: String,

    /// Nodes, focal entity first
    pub nodes: Vec<GraphNode>,

    /// Edges, outgoing before incoming
    pub edges: Vec<GraphEdge>,
}

impl RelationshipGraph {
    /// Find a node by entity name
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Whether an entity is part of the node set
    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Edges with the given direction
    pub fn edges_with(&self, direction: Direction) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.relationship_type == direction)
    }

    /// Outgoing edges
    pub fn outgoing(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges_with(Direction::Outgoing)
    }

    /// Incoming edges
    pub fn incoming(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges_with(Direction::Incoming)
    }

    /// Entities adjacent to the focal entity, excluding the focal entity itself
    pub fn neighbors(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .map(|n| n.id.as_str())
            .filter(|id| *id != self.focal_entity)
            .collect()
    }

    /// Edges whose source or target is missing from the node set
    pub fn dangling_edges(&self) -> Vec<&GraphEdge> {
        self.edges
            .iter()
            .filter(|e| !self.contains_node(&e.source) || !self.contains_node(&e.target))
            .collect()
    }
}

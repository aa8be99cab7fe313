//! Knowledge graph module: breadth-first expansion of entity relationships.
//!
//! Starting from one [`EntityView`](crate::entity::EntityView), follows
//! entity-valued edges up to a depth limit and collects a serializable graph
//! of identifiers.

mod traversal;

pub use traversal::expand_graph;

use serde::Serialize;

use crate::entity::EntityId;

/// Target of a graph edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeTarget {
    Entity(EntityId),
    Literal(String),
}

/// A single edge (source --relation--> target).
#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub source: EntityId,
    /// `alias` or a property id such as `P31`.
    pub relation: String,
    pub target: EdgeTarget,
}

/// Result of [`expand_graph`].
#[derive(Debug, Clone, Serialize)]
pub struct EntityGraph {
    pub root: EntityId,
    /// Every entity seen, in discovery order, expanded or not.
    pub nodes: Vec<EntityId>,
    pub edges: Vec<GraphEdge>,
}

impl EntityGraph {
    /// Edges leaving `id`, in recorded order.
    pub fn edges_from<'a>(&'a self, id: &'a EntityId) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |edge| &edge.source == id)
    }
}

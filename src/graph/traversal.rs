//! BFS expansion over entity-valued relationships.

use std::collections::{HashSet, VecDeque};

use super::{EdgeTarget, EntityGraph, GraphEdge};
use crate::entity::{EntityView, RelationValue};
use crate::Result;

/// Expand the graph around `root` using BFS.
///
/// Entities at depth `< max_depth` are expanded, which fetches their page.
/// Each entity id is expanded at most once. When `properties` is given only
/// edges whose relation key (`alias` or a property id) is listed are recorded
/// and followed.
pub fn expand_graph(
    root: &EntityView,
    max_depth: usize,
    properties: Option<&[String]>,
) -> Result<EntityGraph> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    let mut graph = EntityGraph {
        root: root.id().clone(),
        nodes: vec![root.id().clone()],
        edges: Vec::new(),
    };

    queue.push_back((root, 0));
    visited.insert(root.id().clone());

    while let Some((view, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }

        log::debug!("Expanding {} at depth {}", view, depth);

        for edge in view.relationships()? {
            let key = edge.relation.key();
            if let Some(allowed) = properties {
                if !allowed.iter().any(|p| p.eq_ignore_ascii_case(key)) {
                    continue;
                }
            }

            let target = match &edge.value {
                RelationValue::Literal(text) => EdgeTarget::Literal(text.clone()),
                RelationValue::Entity(next) => {
                    if visited.insert(next.id().clone()) {
                        graph.nodes.push(next.id().clone());
                        queue.push_back((next, depth + 1));
                    }
                    EdgeTarget::Entity(next.id().clone())
                }
            };

            graph.edges.push(GraphEdge {
                source: view.id().clone(),
                relation: key.to_string(),
                target,
            });
        }
    }

    log::info!(
        "Expanded {} to {} nodes and {} edges",
        graph.root,
        graph.nodes.len(),
        graph.edges.len()
    );

    Ok(graph)
}

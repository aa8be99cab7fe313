pub mod config;
pub mod error;
pub mod entity;
pub mod fetch;
pub mod graph;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use entity::{EntityId, EntityView, Relation, RelationValue, RelationshipEdge};
pub use error::{Result, WikigraphError};
pub use fetch::{EntityFetcher, WikidataFetcher};
pub use graph::{expand_graph, EntityGraph};

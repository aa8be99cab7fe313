//! Entity retrieval: one request per call, no caching.

mod wikidata;

pub use wikidata::WikidataFetcher;

use serde_json::Value;

use crate::entity::EntityId;
use crate::Result;

/// Retrieves the raw JSON document for one entity.
///
/// Implementations return the decoded response body verbatim; extracting the
/// entity record from `entities` is the caller's job.
pub trait EntityFetcher: Send + Sync {
    fn fetch(&self, id: &EntityId) -> Result<Value>;
}

//! Lazily-fetched entity views and their relationship edges.
//!
//! An [`EntityView`] performs no I/O until one of its accessors is called.
//! The decoded record and the parsed relationships are each cached once per
//! view; views created while parsing share the parent's fetcher but have
//! their own, still empty, caches.

mod relationships;

pub use relationships::parse_relationships;

use serde::Serialize;
use serde_json::{Map, Value};
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::fetch::EntityFetcher;
use crate::{Result, WikigraphError};

/// Decoded JSON record for one entity (`entities[<id>]` of the API response).
pub type RawEntity = Map<String, Value>;

/// Values starting with this character are treated as entity references.
pub const ENTITY_PREFIX: char = 'Q';

/// Only English labels and descriptions are read.
const LANGUAGE: &str = "en";

/// Uppercase-normalized entity identifier, e.g. `Q42` or `P31`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: &str) -> Self {
        Self(id.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a claim value names another entity rather than a literal.
pub fn is_entity_reference(candidate: &str) -> bool {
    candidate.starts_with(ENTITY_PREFIX)
}

/// The relation half of an edge.
#[derive(Debug)]
pub enum Relation {
    /// Alternate name of the entity itself.
    Alias,
    /// Claim property; shared by every edge parsed from the same claims key.
    Property(Rc<EntityView>),
}

impl Relation {
    /// `"alias"` or the property id.
    pub fn key(&self) -> &str {
        match self {
            Relation::Alias => "alias",
            Relation::Property(view) => view.id().as_str(),
        }
    }

    /// Human-readable form; fetches the property entity on first use.
    pub fn display_name(&self) -> Result<&str> {
        match self {
            Relation::Alias => Ok("alias"),
            Relation::Property(view) => view.name(),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The value half of an edge.
#[derive(Debug)]
pub enum RelationValue {
    /// Alias text, monolingual text, time string or raw scalar.
    Literal(String),
    /// Referenced entity, not yet fetched.
    Entity(EntityView),
}

impl RelationValue {
    /// Literal text, or the referenced entity's name (fetching it on first use).
    pub fn display_name(&self) -> Result<&str> {
        match self {
            RelationValue::Literal(text) => Ok(text.as_str()),
            RelationValue::Entity(view) => view.name(),
        }
    }
}

impl fmt::Display for RelationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationValue::Literal(text) => f.write_str(text),
            RelationValue::Entity(view) => write!(f, "{}", view),
        }
    }
}

/// One `(relation, value)` pair of an entity.
#[derive(Debug)]
pub struct RelationshipEdge {
    pub relation: Relation,
    pub value: RelationValue,
}

/// Lazy view over a single entity.
pub struct EntityView {
    id: EntityId,
    fetcher: Arc<dyn EntityFetcher>,
    page: OnceCell<RawEntity>,
    relationships: OnceCell<Vec<RelationshipEdge>>,
}

impl EntityView {
    /// Create a view without touching the network.
    pub fn new(id: &str, fetcher: Arc<dyn EntityFetcher>) -> Self {
        Self {
            id: EntityId::new(id),
            fetcher,
            page: OnceCell::new(),
            relationships: OnceCell::new(),
        }
    }

    /// Create a view and fetch its page immediately, failing fast.
    pub fn fetched(id: &str, fetcher: Arc<dyn EntityFetcher>) -> Result<Self> {
        let view = Self::new(id, fetcher);
        view.page()?;
        Ok(view)
    }

    /// Create a view around an already decoded record.
    pub fn with_page(id: &str, page: RawEntity, fetcher: Arc<dyn EntityFetcher>) -> Self {
        let view = Self::new(id, fetcher);
        let _ = view.page.set(page);
        view
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Whether the page has been fetched (or seeded) yet.
    pub fn is_fetched(&self) -> bool {
        self.page.get().is_some()
    }

    /// The entity record, fetched on first call and cached thereafter.
    pub fn page(&self) -> Result<&RawEntity> {
        if let Some(page) = self.page.get() {
            return Ok(page);
        }

        let body = self.fetcher.fetch(&self.id)?;
        let page = extract_entity(&self.id, &body)?;
        Ok(self.page.get_or_init(|| page))
    }

    /// English label.
    pub fn name(&self) -> Result<&str> {
        self.english_value("labels")
    }

    /// English description.
    pub fn description(&self) -> Result<&str> {
        self.english_value("descriptions")
    }

    /// Aliases then claims, parsed once from the cached page.
    pub fn relationships(&self) -> Result<&[RelationshipEdge]> {
        if let Some(edges) = self.relationships.get() {
            return Ok(edges);
        }

        let edges = parse_relationships(self.page()?, &self.fetcher);
        Ok(self.relationships.get_or_init(|| edges))
    }

    fn english_value(&self, section: &str) -> Result<&str> {
        self.page()?
            .get(section)
            .and_then(|langs| langs.get(LANGUAGE))
            .and_then(|entry| entry.get("value"))
            .and_then(Value::as_str)
            .ok_or_else(|| WikigraphError::MissingField {
                entity: self.id.to_string(),
                field: format!("{}.{}", section, LANGUAGE),
            })
    }
}

impl fmt::Display for EntityView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for EntityView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityView")
            .field("id", &self.id)
            .field("fetched", &self.is_fetched())
            .finish()
    }
}

/// Pull `entities[<id>]` out of a `wbgetentities` response body.
///
/// The API answers unknown ids either with an `error` object and no
/// `entities`, or with a record flagged `missing`; both count as absent.
fn extract_entity(id: &EntityId, body: &Value) -> Result<RawEntity> {
    match body.get("entities").and_then(|entities| entities.get(id.as_str())) {
        Some(Value::Object(record)) if !record.contains_key("missing") => Ok(record.clone()),
        _ => Err(WikigraphError::NotFound(id.to_string())),
    }
}

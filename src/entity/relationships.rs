//! Turning an entity record into ordered `(relation, value)` edges.

use serde_json::Value;
use std::rc::Rc;
use std::sync::Arc;

use super::{is_entity_reference, EntityView, RawEntity, Relation, RelationValue, RelationshipEdge};
use crate::fetch::EntityFetcher;

/// Fields tried, in order, on a structured claim value.
const VALUE_FIELDS: [&str; 3] = ["id", "text", "time"];

/// Parse aliases and claims of an entity record.
///
/// Aliases come first (language buckets in record order, each list in order),
/// then claims in key order with statements in listed order. Statements whose
/// value cannot be read are logged and skipped. No network I/O happens here:
/// every view created is empty.
pub fn parse_relationships(entity: &RawEntity, fetcher: &Arc<dyn EntityFetcher>) -> Vec<RelationshipEdge> {
    let mut edges = Vec::new();

    if let Some(aliases) = entity.get("aliases").and_then(Value::as_object) {
        for (language, entries) in aliases {
            for alias in entries.as_array().into_iter().flatten() {
                match alias_text(alias) {
                    Some(text) => edges.push(RelationshipEdge {
                        relation: Relation::Alias,
                        value: RelationValue::Literal(text.to_string()),
                    }),
                    None => log::warn!("Unable to read {} alias: {}", language, alias),
                }
            }
        }
    }

    let claims = match entity.get("claims").and_then(Value::as_object) {
        Some(claims) if !claims.is_empty() => claims,
        _ => return edges,
    };

    for (property, statements) in claims {
        let relation = Rc::new(EntityView::new(property, fetcher.clone()));

        for statement in statements.as_array().into_iter().flatten() {
            let Some(value) = statement.pointer("/mainsnak/datavalue/value") else {
                log::warn!("Statement for {} has no value, skipping", property);
                continue;
            };

            let Some(candidate) = claim_candidate(value) else {
                log::warn!("Unable to find value: {}", value);
                continue;
            };

            let value = if is_entity_reference(&candidate) {
                RelationValue::Entity(EntityView::new(&candidate, fetcher.clone()))
            } else {
                RelationValue::Literal(candidate)
            };

            edges.push(RelationshipEdge {
                relation: Relation::Property(Rc::clone(&relation)),
                value,
            });
        }
    }

    edges
}

/// Alias entries are `{language, value}` objects; bare strings are accepted too.
fn alias_text(alias: &Value) -> Option<&str> {
    match alias {
        Value::String(text) => Some(text.as_str()),
        Value::Object(entry) => entry.get("value").and_then(Value::as_str),
        _ => None,
    }
}

/// Identifier or literal text carried by a claim value.
fn claim_candidate(value: &Value) -> Option<String> {
    match value {
        Value::Object(fields) => VALUE_FIELDS
            .iter()
            .find_map(|field| fields.get(*field).and_then(Value::as_str))
            .map(str::to_string),
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

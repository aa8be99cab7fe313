//! In-memory fetcher that records every call.

use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::entity::EntityId;
use crate::fetch::EntityFetcher;
use crate::{Result, WikigraphError};

enum Canned {
    Body(Value),
    Failure(String),
}

/// Serves canned `wbgetentities` bodies; unknown ids get an empty `entities` map.
pub struct StaticFetcher {
    responses: HashMap<String, Canned>,
    calls: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Respond to `id` with `{"entities": {id: record}}`.
    pub fn with_entity(self, id: &str, record: Value) -> Self {
        let body = json!({ "entities": { id: record } });
        self.with_response(id, body)
    }

    /// Respond to `id` with an arbitrary body.
    pub fn with_response(mut self, id: &str, body: Value) -> Self {
        self.responses.insert(id.to_string(), Canned::Body(body));
        self
    }

    /// Respond to `id` as a non-success HTTP status would.
    pub fn with_failure(mut self, id: &str, body: &str) -> Self {
        self.responses.insert(id.to_string(), Canned::Failure(body.to_string()));
        self
    }

    pub fn calls_for(&self, id: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.as_str() == id).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl EntityFetcher for StaticFetcher {
    fn fetch(&self, id: &EntityId) -> Result<Value> {
        self.calls.lock().unwrap().push(id.to_string());

        match self.responses.get(id.as_str()) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Failure(body)) => Err(WikigraphError::Fetch {
                url: format!("memory://wbgetentities?ids={}", id),
                body: body.clone(),
            }),
            None => Ok(json!({ "entities": {} })),
        }
    }
}

use thiserror::Error;

/// Main error type for wikigraph
#[derive(Error, Debug)]
pub enum WikigraphError {
    /// Non-success HTTP status from the entity endpoint
    #[error("Unable to fetch url={url}. Error={body}")]
    Fetch { url: String, body: String },

    /// Request succeeded but the entity is absent from the response
    #[error("Unable to find Wikidata info for {0}")]
    NotFound(String),

    /// Expected field absent from an entity record
    #[error("Entity {entity} has no field {field}")]
    MissingField { entity: String, field: String },

    /// Transport-level HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenient Result type using WikigraphError
pub type Result<T> = std::result::Result<T, WikigraphError>;

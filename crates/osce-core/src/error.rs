use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid scenario catalog: {0}")]
    InvalidCatalog(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
